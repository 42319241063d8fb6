//! Error types for the configuration store.
//!
//! Responsibilities:
//! - Define one error enum for every store, credential and project operation.
//! - Classify each variant as a usage, corruption or filesystem failure.
//!
//! Does NOT handle:
//! - Printing errors or choosing exit codes (see the CLI crate).
//!
//! Invariants:
//! - Usage errors carry the offending name or key so they can be shown verbatim.
//! - Filesystem and parse errors keep their underlying source and the file path.
//! - Secrets are never part of an error message.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification used by callers to decide how to react to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The user asked for something that cannot be done; they can fix the input.
    Usage,
    /// The config file exists but its content cannot be understood.
    Corruption,
    /// The config file or its directory could not be read or written.
    Filesystem,
}

/// Errors returned by the configuration store.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("already have credential with name {0}")]
    DuplicateCredential(String),

    #[error("could not find credential with name {0}")]
    CredentialNotFound(String),

    #[error("could not find credential with name {0} to remove")]
    CredentialNotFoundForRemoval(String),

    #[error("no default credential found")]
    NoDefaultCredential,

    #[error("already have a project with the name {0}")]
    DuplicateProject(String),

    #[error("could not find a project with the name {0}")]
    ProjectNotFound(String),

    #[error("could not find a project with the name {0} to remove")]
    ProjectNotFoundForRemoval(String),

    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("invalid config key '{key}', valid keys are: {valid}")]
    InvalidKey { key: String, valid: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected value at '{at}' in config file: expected {expected}, found {found}")]
    UnexpectedShape {
        at: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Failed to decode '{at}' in config file: {source}")]
    Decode {
        at: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode config: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to determine the preferences directory")]
    PrefsDirUnavailable,
}

impl ConfigError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateCredential(_)
            | Self::CredentialNotFound(_)
            | Self::CredentialNotFoundForRemoval(_)
            | Self::NoDefaultCredential
            | Self::DuplicateProject(_)
            | Self::ProjectNotFound(_)
            | Self::ProjectNotFoundForRemoval(_)
            | Self::EmptyName { .. }
            | Self::InvalidKey { .. }
            | Self::InvalidValue { .. } => ErrorKind::Usage,
            Self::Parse { .. }
            | Self::UnexpectedShape { .. }
            | Self::Decode { .. }
            | Self::Encode(_) => ErrorKind::Corruption,
            Self::Read { .. }
            | Self::Write { .. }
            | Self::CreateDir { .. }
            | Self::PrefsDirUnavailable => ErrorKind::Filesystem,
        }
    }

    /// Returns true if the user can correct this error by changing their input.
    pub fn is_usage(&self) -> bool {
        self.kind() == ErrorKind::Usage
    }

    pub(crate) fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

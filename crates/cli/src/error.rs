//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map config store errors to the matching exit code.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Argument parsing errors (clap exits with its own code 2).
//!
//! Invariants:
//! - Codes 5, 9 and 10 are reserved for usage, corruption and filesystem errors.

use aura_config::{ConfigError, ErrorKind};

/// Structured exit codes for aura-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Usage error - unknown name, duplicate name, invalid key or value.
    ///
    /// Scripts should fix the input and not retry the same command.
    UsageError = 5,

    /// The config file exists but cannot be parsed.
    ///
    /// The file is left as it is; a person has to repair or remove it.
    ConfigCorrupt = 9,

    /// The config file or its directory could not be read or written.
    FilesystemError = 10,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err.kind() {
            ErrorKind::Usage => ExitCode::UsageError,
            ErrorKind::Corruption => ExitCode::ConfigCorrupt,
            ErrorKind::Filesystem => ExitCode::FilesystemError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no ConfigError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}

//! Reading and patching the on-disk configuration document.
//!
//! Responsibilities:
//! - Own the config file path and the filesystem it lives on.
//! - Read the full document, apply dotted-path patches, write the full document back.
//! - Decode typed sections (credentials, projects) out of the untyped document.
//! - Resolve the OS preferences directory and the config file location.
//! - Seed the first-run document and upgrade historical schema shapes.
//!
//! Does NOT handle:
//! - Typed accessors or validation of scalar settings (see `store`).
//! - Credential or project semantics (see `credentials` and `projects`).
//! - Locking between processes. Concurrent writers race and the last write wins.
//!
//! Invariants:
//! - Every write replaces the whole file with the whole document, never a struct projection of it.
//! - Keys that no patch names are written back unchanged and in their original order.
//! - Nothing is written when a read or a patch fails.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::document;
use crate::error::ConfigError;
use crate::fs::FileSystem;

mod defaults;
mod migration;
mod path;

pub(crate) use defaults::seed_document;
pub(crate) use migration::upgrade_document;
pub use path::{config_file_path, default_prefs_dir};

/// A set of values to write at dotted paths in one read-modify-write cycle.
#[derive(Debug, Default)]
pub(crate) struct Patch {
    entries: Vec<(&'static str, Value)>,
}

impl Patch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(mut self, path: &'static str, value: impl Into<Value>) -> Self {
        self.entries.push((path, value.into()));
        self
    }

    fn paths(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(path, _)| *path).collect()
    }

    /// Applies every entry to `document` in order.
    pub(crate) fn apply_to(self, document: &mut Value) -> Result<(), ConfigError> {
        for (path, value) in self.entries {
            document::set(document, path, value)?;
        }
        Ok(())
    }
}

/// Handle on the config file.
#[derive(Clone)]
pub(crate) struct ConfigFile {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl std::fmt::Debug for ConfigFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigFile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl ConfigFile {
    pub(crate) fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    /// Reads and parses the whole document.
    ///
    /// The root must be a JSON object.
    pub(crate) fn read(&self) -> Result<Value, ConfigError> {
        let bytes = self.fs.read(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        let document: Value =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;

        if !document.is_object() {
            return Err(ConfigError::UnexpectedShape {
                at: "<root>".to_string(),
                expected: "an object",
                found: document::type_name(&document),
            });
        }

        Ok(document)
    }

    /// Serializes `document` and replaces the file with it.
    pub(crate) fn write(&self, document: &Value) -> Result<(), ConfigError> {
        let mut bytes = serde_json::to_vec_pretty(document).map_err(ConfigError::Encode)?;
        bytes.push(b'\n');

        self.fs
            .write(&self.path, &bytes)
            .map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Wrote config file");
        Ok(())
    }

    pub(crate) fn create_parent_dir(&self) -> Result<(), ConfigError> {
        let Some(parent) = self.path.parent() else {
            return Ok(());
        };
        self.fs
            .create_dir_all(parent)
            .map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })
    }

    /// Reads the current document, applies `patch` and writes the result.
    ///
    /// Returns the document as written.
    pub(crate) fn apply(&self, patch: Patch) -> Result<Value, ConfigError> {
        self.commit(self.read()?, patch)
    }

    /// Applies `patch` to a document obtained from [`ConfigFile::read`] and writes it.
    ///
    /// Used when the caller needs to inspect the document before deciding
    /// what to patch, so the whole operation works on a single read.
    pub(crate) fn commit(&self, mut document: Value, patch: Patch) -> Result<Value, ConfigError> {
        let paths = patch.paths();
        patch.apply_to(&mut document)?;
        self.write(&document)?;

        tracing::debug!(path = %self.path.display(), keys = ?paths, "Patched config file");
        Ok(document)
    }
}

/// Decodes the value at `path` into `T`.
///
/// A missing value or `null` decodes as `None`.
pub(crate) fn decode_section<T: DeserializeOwned>(
    document: &Value,
    path: &str,
) -> Result<Option<T>, ConfigError> {
    match document::get(document, path) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|source| ConfigError::Decode {
                at: path.to_string(),
                source,
            }),
    }
}

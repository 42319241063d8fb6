//! Local configuration and credential store for the Aura CLI.
//!
//! This crate owns the JSON config file: scalar settings under `aura`,
//! named client credentials with cached tokens, and named project bindings
//! with a default. Every update patches the paths it changes and writes the
//! rest of the document back untouched.

pub mod bootstrap;
pub mod clock;
pub mod constants;
pub mod credentials;
pub mod document;
pub mod endpoint;
pub mod env;
pub mod error;
pub mod fs;
mod persistence;
pub mod projects;
pub mod store;
pub mod types;

pub use bootstrap::Bootstrap;
pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::Credentials;
pub use endpoint::{api_version, normalize_base_url};
pub use env::{EnvOverrides, env_var_or_none};
pub use error::{ConfigError, ErrorKind};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use persistence::{config_file_path, default_prefs_dir};
pub use projects::{Projects, RemoveOutcome};
pub use store::{ConfigKey, ConfigStore, Output, PollingConfig};
pub use types::{Credential, Project, ProjectList, ProjectScope};

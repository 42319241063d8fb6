//! Opening the config file at process start.
//!
//! Responsibilities:
//! - Locate `<prefs>/neo4j/cli/config.json`.
//! - Create the file with seeded defaults on first run.
//! - Parse an existing file and apply the one-time schema upgrade.
//!
//! Does NOT handle:
//! - Loading `.env` files (the CLI does that before capturing overrides).
//!
//! Invariants:
//! - An existing file that fails to parse is reported, never replaced.
//! - An existing file is only written when the upgrade changed something.

use std::path::PathBuf;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::env::EnvOverrides;
use crate::error::ConfigError;
use crate::fs::{FileSystem, OsFileSystem};
use crate::persistence::{
    ConfigFile, config_file_path, default_prefs_dir, seed_document, upgrade_document,
};
use crate::store::ConfigStore;

/// Builder that opens (and if needed creates) the config file.
///
/// ```rust,ignore
/// let store = Bootstrap::new(Arc::new(OsFileSystem), prefs_dir)
///     .with_env(EnvOverrides::from_env())
///     .run()?;
/// ```
pub struct Bootstrap {
    fs: Arc<dyn FileSystem>,
    prefs_dir: PathBuf,
    env: EnvOverrides,
    clock: Arc<dyn Clock>,
}

impl Bootstrap {
    /// Starts a bootstrap with no environment overrides and the system clock.
    pub fn new(fs: Arc<dyn FileSystem>, prefs_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            prefs_dir: prefs_dir.into(),
            env: EnvOverrides::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_env(mut self, env: EnvOverrides) -> Self {
        self.env = env;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn run(self) -> Result<ConfigStore, ConfigError> {
        let file = ConfigFile::new(self.fs, config_file_path(&self.prefs_dir));

        if file.exists() {
            let mut document = file.read()?;
            if upgrade_document(&mut document) {
                file.write(&document)?;
            }
        } else {
            file.create_parent_dir()?;
            file.write(&seed_document(&self.env))?;
            tracing::info!(path = %file.path().display(), "Created config file with defaults");
        }

        Ok(ConfigStore::from_parts(file, self.env, self.clock))
    }
}

impl ConfigStore {
    /// Opens the config file on the real filesystem.
    ///
    /// Uses `prefs_dir` when given, otherwise the OS preferences directory.
    /// Overrides are read from the process environment.
    pub fn bootstrap(prefs_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let prefs_dir = match prefs_dir {
            Some(dir) => dir,
            None => default_prefs_dir()?,
        };
        tracing::debug!(prefs_dir = %prefs_dir.display(), "Bootstrapping config store");

        Bootstrap::new(Arc::new(OsFileSystem), prefs_dir)
            .with_env(EnvOverrides::from_env())
            .run()
    }
}

//! Path helpers for the configuration file location.
//!
//! Responsibilities:
//! - Determine the OS preferences directory using the `directories` crate.
//! - Join the vendor/tool/file segments under a preferences directory.
//!
//! Does NOT handle:
//! - File I/O operations.

use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILE_NAME, CONFIG_TOOL, CONFIG_VENDOR};
use crate::error::ConfigError;

/// Returns the platform preferences directory:
/// - Linux: `$XDG_CONFIG_HOME` or `~/.config`
/// - macOS: `~/Library/Preferences`
/// - Windows: `%LOCALAPPDATA%`
pub fn default_prefs_dir() -> Result<PathBuf, ConfigError> {
    let dirs = directories::BaseDirs::new().ok_or(ConfigError::PrefsDirUnavailable)?;

    if cfg!(windows) {
        Ok(dirs.data_local_dir().to_path_buf())
    } else {
        Ok(dirs.preference_dir().to_path_buf())
    }
}

/// Returns `<prefs_dir>/neo4j/cli/config.json`.
pub fn config_file_path(prefs_dir: &Path) -> PathBuf {
    prefs_dir
        .join(CONFIG_VENDOR)
        .join(CONFIG_TOOL)
        .join(CONFIG_FILE_NAME)
}

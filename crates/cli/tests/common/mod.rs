//! Shared test utilities for aura-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory bound to a temp preferences directory.
//! - Read the resulting config file back for assertions.
//!
//! Invariants / Assumptions:
//! - Commands never load a local `.env` and never see the host's `AURA_*` variables.
//! - Every test gets its own preferences directory, so tests can run in parallel.

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns a hermetic `aura-cli` command that keeps its config under `prefix`.
pub fn aura_cmd(prefix: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("aura-cli");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("AURA_CONFIG_PREFIX", prefix);

    // Clear potential host leakage
    cmd.env_remove("AURA_BASE_URL")
        .env_remove("AURA_AUTH_URL")
        .env_remove("RUST_LOG");

    cmd
}

/// Creates a fresh preferences directory.
pub fn prefs_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Path of the config file under `prefix`.
pub fn config_path(prefix: &Path) -> PathBuf {
    prefix.join("neo4j").join("cli").join("config.json")
}

/// Parses the config file under `prefix`.
pub fn read_config(prefix: &Path) -> Value {
    let raw = std::fs::read_to_string(config_path(prefix)).expect("config file should exist");
    serde_json::from_str(&raw).expect("config file should be valid JSON")
}

/// Writes `contents` as the config file under `prefix`.
pub fn write_config(prefix: &Path, contents: &str) {
    let path = config_path(prefix);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

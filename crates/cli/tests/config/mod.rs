//! Integration tests for `aura-cli config` subcommands.
//!
//! Responsibilities:
//! - Test settings (get, set, list), credentials and projects end to end.
//!
//! Invariants:
//! - All tests use hermetic CLI commands via `aura_cmd()` and a temp preferences directory.

mod credential_tests;
mod project_tests;
mod settings_tests;

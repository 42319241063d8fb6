//! Command dispatch.
//!
//! Responsibilities:
//! - Open the config store for the selected preferences directory.
//! - Route each parsed command to its implementation.
//!
//! Does NOT handle:
//! - Logging or `.env` setup (see `main`).

use anyhow::{Context, Result};
use aura_config::ConfigStore;

use crate::args::{Cli, Commands};
use crate::commands;

pub fn run_command(cli: Cli) -> Result<()> {
    let store = ConfigStore::bootstrap(cli.config_prefix()).context("Failed to open config")?;
    tracing::debug!(path = %store.path().display(), "Opened config store");

    match cli.command {
        Commands::Config { command } => commands::config::run(command, &store),
    }
}

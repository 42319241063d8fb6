//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Resolve the preferences directory override.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "aura-cli")]
#[command(about = "Aura CLI - Manage Neo4j Aura settings, credentials and projects", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  aura-cli config set output json\n  aura-cli config credential add --name prod --client-id ID --client-secret SECRET\n  aura-cli config project add --name main --organization-id ORG --project-id PROJ\n  aura-cli config project list\n"
)]
pub struct Cli {
    /// Directory under which `neo4j/cli/config.json` is kept (overrides the OS preferences directory).
    #[arg(long, global = true, env = "AURA_CONFIG_PREFIX", value_name = "DIR")]
    pub config_prefix: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the configured prefix, ignoring blank values.
    pub fn config_prefix(&self) -> Option<PathBuf> {
        self.config_prefix
            .as_ref()
            .filter(|p| !p.to_string_lossy().trim().is_empty())
            .cloned()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage settings, credentials and projects
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommand,
    },
}

//! Aura CLI - Command-line access to the local Aura configuration store.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging to stderr.
//! - Execute `config` commands against the store and map failures to exit codes.
//!
//! Does NOT handle:
//! - File format or registry rules (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap env defaults
//!   and the `AURA_*` overrides read at bootstrap.
//! - Command output goes to stdout; logs and errors go to stderr.

mod args;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Loads `.env` from the working directory unless `DOTENV_DISABLED` is set.
///
/// A missing file is not an error.
fn load_dotenv() -> anyhow::Result<()> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => {
            anyhow::bail!("Failed to parse .env file at position {idx}")
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to load .env file")),
    }
}

fn main() {
    if let Err(e) = load_dotenv() {
        eprintln!("Failed to load environment: {:#}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

//! Configuration management commands.

use anyhow::{Context, Result};
use aura_config::{ConfigKey, ConfigStore, Credential};
use clap::Subcommand;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the value of a setting
    Get {
        /// One of: auth-url, base-url, default-tenant, output, beta-enabled
        key: String,
    },

    /// Change a setting
    Set {
        /// One of: auth-url, base-url, default-tenant, output, beta-enabled
        key: String,

        /// New value
        value: String,
    },

    /// Print all settings
    List,

    /// Manage client credentials
    Credential {
        #[command(subcommand)]
        command: CredentialCommand,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
}

#[derive(Subcommand)]
pub enum CredentialCommand {
    /// Add a credential; the first one added becomes the default
    Add {
        /// Credential name
        #[arg(long)]
        name: String,

        /// OAuth client id
        #[arg(long)]
        client_id: String,

        /// OAuth client secret
        #[arg(long)]
        client_secret: String,
    },

    /// Remove a credential
    Remove {
        /// Credential name
        name: String,
    },

    /// Make a credential the default
    Use {
        /// Credential name
        name: String,
    },

    /// List credentials (secrets are not shown)
    List,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Add a project; the first one added becomes the default
    Add {
        /// Project name
        #[arg(long)]
        name: String,

        /// Organization id
        #[arg(long)]
        organization_id: String,

        /// Project id
        #[arg(long)]
        project_id: String,
    },

    /// Remove a project
    Remove {
        /// Project name
        name: String,
    },

    /// Make a project the default
    Use {
        /// Project name
        name: String,
    },

    /// List projects and the default project
    List,
}

#[derive(Serialize)]
struct CredentialDisplay<'a> {
    name: &'a str,
    #[serde(rename = "client-id")]
    client_id: &'a str,
    default: bool,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

pub fn run(command: ConfigCommand, store: &ConfigStore) -> Result<()> {
    match command {
        ConfigCommand::Get { key } => run_get(store, &key),
        ConfigCommand::Set { key, value } => {
            let key: ConfigKey = key.parse()?;
            store
                .set(key, &value)
                .with_context(|| format!("Failed to set {key}"))
        }
        ConfigCommand::List => print_json(&store.aura_section()?),
        ConfigCommand::Credential { command } => run_credential(command, store),
        ConfigCommand::Project { command } => run_project(command, store),
    }
}

fn run_get(store: &ConfigStore, key: &str) -> Result<()> {
    let key: ConfigKey = key.parse()?;
    match store.get(key)? {
        Some(Value::String(s)) => println!("{s}"),
        Some(other) => println!("{other}"),
        None => println!(),
    }
    Ok(())
}

fn run_credential(command: CredentialCommand, store: &ConfigStore) -> Result<()> {
    let credentials = store.credentials();
    match command {
        CredentialCommand::Add {
            name,
            client_id,
            client_secret,
        } => {
            credentials.add(&name, &client_id, SecretString::new(client_secret.into()))?;
        }
        CredentialCommand::Remove { name } => credentials.remove(&name)?,
        CredentialCommand::Use { name } => {
            let credential = credentials.set_default(&name)?;
            println!(
                "Set {} as default credential with client ID {}",
                credential.name, credential.client_id
            );
        }
        CredentialCommand::List => {
            let default_name = credentials.default_name()?;
            let list = credentials.list()?;
            let display: Vec<CredentialDisplay<'_>> = list
                .iter()
                .map(|c: &Credential| CredentialDisplay {
                    name: &c.name,
                    client_id: &c.client_id,
                    default: default_name.as_deref() == Some(c.name.as_str()),
                })
                .collect();
            print_json(&display)?;
        }
    }
    Ok(())
}

fn run_project(command: ProjectCommand, store: &ConfigStore) -> Result<()> {
    let projects = store.projects();
    match command {
        ProjectCommand::Add {
            name,
            organization_id,
            project_id,
        } => {
            projects.add(&name, &organization_id, &project_id)?;
        }
        ProjectCommand::Remove { name } => {
            let outcome = projects.remove(&name)?;
            if let Some(notice) = outcome.notice() {
                println!("{notice}");
            }
        }
        ProjectCommand::Use { name } => {
            let project = projects.set_default(&name)?;
            println!(
                "Set {} as default project with organization ID {} and project ID {}",
                project.name, project.organization_id, project.project_id
            );
        }
        ProjectCommand::List => print_json(&projects.list()?)?,
    }
    Ok(())
}

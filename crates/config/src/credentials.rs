//! Named OAuth client credentials and their cached access tokens.
//!
//! Responsibilities:
//! - Add, remove, list and look up credentials stored under `aura.credentials`.
//! - Track the default credential in `aura.default-credential`.
//! - Cache access tokens and decide whether a cached token is still usable.
//!
//! Does NOT handle:
//! - Exchanging client credentials for a token (the caller does that and hands the result in).
//!
//! Invariants:
//! - Credential names are unique and non-empty.
//! - The first credential added becomes the default.
//! - Removing the default credential clears the default; no other credential is promoted.
//! - Each operation reads the file once and, if it mutates, writes it once.

use secrecy::SecretString;
use serde_json::Value;

use crate::clock::Clock;
use crate::constants::{CREDENTIALS_PATH, DEFAULT_CREDENTIAL_PATH};
use crate::document;
use crate::error::ConfigError;
use crate::persistence::{ConfigFile, Patch, decode_section};
use crate::types::{Credential, token_expiry_from};

/// Credential registry bound to a config file.
///
/// Obtained from [`crate::ConfigStore::credentials`].
pub struct Credentials<'a> {
    file: &'a ConfigFile,
    clock: &'a dyn Clock,
}

impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("file", self.file)
            .finish_non_exhaustive()
    }
}

fn decode(document: &Value) -> Result<Vec<Credential>, ConfigError> {
    Ok(decode_section(document, CREDENTIALS_PATH)?.unwrap_or_default())
}

fn encode(credentials: &[Credential]) -> Result<Value, ConfigError> {
    serde_json::to_value(credentials).map_err(ConfigError::Encode)
}

fn default_name(document: &Value) -> Option<&str> {
    document::get_str(document, DEFAULT_CREDENTIAL_PATH).filter(|name| !name.is_empty())
}

impl<'a> Credentials<'a> {
    pub(crate) fn new(file: &'a ConfigFile, clock: &'a dyn Clock) -> Self {
        Self { file, clock }
    }

    /// Adds a credential with no cached token.
    pub fn add(
        &self,
        name: &str,
        client_id: &str,
        client_secret: SecretString,
    ) -> Result<Credential, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::EmptyName { kind: "credential" });
        }

        let document = self.file.read()?;
        let mut credentials = decode(&document)?;
        if credentials.iter().any(|c| c.name == name) {
            return Err(ConfigError::DuplicateCredential(name.to_string()));
        }

        let credential = Credential::new(name, client_id, client_secret);
        credentials.push(credential.clone());

        let mut patch = Patch::new().set(CREDENTIALS_PATH, encode(&credentials)?);
        if credentials.len() == 1 {
            patch = patch.set(DEFAULT_CREDENTIAL_PATH, name);
        }
        self.file.commit(document, patch)?;

        tracing::debug!(credential = %name, "Added credential");
        Ok(credential)
    }

    /// Removes the named credential, clearing the default if it pointed here.
    pub fn remove(&self, name: &str) -> Result<(), ConfigError> {
        let document = self.file.read()?;
        let mut credentials = decode(&document)?;

        let Some(index) = credentials.iter().position(|c| c.name == name) else {
            return Err(ConfigError::CredentialNotFoundForRemoval(name.to_string()));
        };
        credentials.remove(index);

        let mut patch = Patch::new().set(CREDENTIALS_PATH, encode(&credentials)?);
        if default_name(&document) == Some(name) {
            patch = patch.set(DEFAULT_CREDENTIAL_PATH, "");
        }
        self.file.commit(document, patch)?;

        tracing::debug!(credential = %name, "Removed credential");
        Ok(())
    }

    /// Makes the named credential the default.
    pub fn set_default(&self, name: &str) -> Result<Credential, ConfigError> {
        let document = self.file.read()?;
        let credential = decode(&document)?
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::CredentialNotFound(name.to_string()))?;

        self.file
            .commit(document, Patch::new().set(DEFAULT_CREDENTIAL_PATH, name))?;
        Ok(credential)
    }

    /// Returns the default credential.
    ///
    /// Fails when no default is set, or when the default names a credential
    /// that no longer exists.
    pub fn default(&self) -> Result<Credential, ConfigError> {
        let document = self.file.read()?;
        let name = default_name(&document).ok_or(ConfigError::NoDefaultCredential)?;

        match decode(&document)?.into_iter().find(|c| c.name == name) {
            Some(credential) => Ok(credential),
            None => {
                tracing::warn!(credential = %name, "Default credential does not exist");
                Err(ConfigError::CredentialNotFound(name.to_string()))
            }
        }
    }

    /// Name of the default credential, if one is set.
    pub fn default_name(&self) -> Result<Option<String>, ConfigError> {
        let document = self.file.read()?;
        Ok(default_name(&document).map(str::to_string))
    }

    /// All credentials in file order.
    pub fn list(&self) -> Result<Vec<Credential>, ConfigError> {
        decode(&self.file.read()?)
    }

    pub fn find(&self, name: &str) -> Result<Credential, ConfigError> {
        self.list()?
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::CredentialNotFound(name.to_string()))
    }

    /// True if `credential` holds a token that has not reached its expiry.
    pub fn has_valid_access_token(&self, credential: &Credential) -> bool {
        credential.has_valid_access_token_at(self.clock.now_millis())
    }

    /// Caches `token` for the named credential.
    ///
    /// The stored expiry is `now + (expires_in_secs - 60) * 1000`, so the token
    /// is treated as stale a minute before the server would reject it.
    pub fn update_access_token(
        &self,
        name: &str,
        token: SecretString,
        expires_in_secs: i64,
    ) -> Result<Credential, ConfigError> {
        let expiry = token_expiry_from(self.clock.now_millis(), expires_in_secs);
        let updated = self.modify(name, |credential| credential.store_token(token, expiry))?;
        tracing::debug!(credential = %name, expiry, "Stored access token");
        Ok(updated)
    }

    /// Drops the cached token of the named credential.
    pub fn clear_access_token(&self, name: &str) -> Result<(), ConfigError> {
        self.modify(name, Credential::clear_token)?;
        tracing::debug!(credential = %name, "Cleared access token");
        Ok(())
    }

    fn modify(
        &self,
        name: &str,
        change: impl FnOnce(&mut Credential),
    ) -> Result<Credential, ConfigError> {
        let document = self.file.read()?;
        let mut credentials = decode(&document)?;

        let credential = credentials
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::CredentialNotFound(name.to_string()))?;
        change(credential);
        let updated = credential.clone();

        self.file
            .commit(document, Patch::new().set(CREDENTIALS_PATH, encode(&credentials)?))?;
        Ok(updated)
    }
}

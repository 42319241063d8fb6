//! Environment variable overrides for the configuration store.
//!
//! Responsibilities:
//! - Read the recognized override variables (`AURA_BASE_URL`, `AURA_AUTH_URL`).
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - `.env` file loading (done by the CLI before bootstrap).
//! - Writing overrides to disk (see `bootstrap.rs`, which seeds them on first run).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Overrides are captured once at bootstrap and never re-read.

use crate::constants::{ENV_AUTH_URL, ENV_BASE_URL};
use crate::store::ConfigKey;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Values taken from the environment that win over the config file.
///
/// They are also used as the seed values when the config file is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// Value of `AURA_BASE_URL`.
    pub base_url: Option<String>,
    /// Value of `AURA_AUTH_URL`.
    pub auth_url: Option<String>,
}

impl EnvOverrides {
    /// Captures the recognized override variables from the process environment.
    pub fn from_env() -> Self {
        Self {
            base_url: env_var_or_none(ENV_BASE_URL),
            auth_url: env_var_or_none(ENV_AUTH_URL),
        }
    }

    /// Returns the override for `key`, if that key is overridable and set.
    pub(crate) fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::BaseUrl => self.base_url.as_deref(),
            ConfigKey::AuthUrl => self.auth_url.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key = "_AURA_TEST_UNSET_VAR";
        assert!(env_var_or_none(key).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key, Some(""))], || {
            assert!(env_var_or_none(key).is_none());
        });

        temp_env::with_vars([(key, Some("   "))], || {
            assert!(env_var_or_none(key).is_none());
        });

        temp_env::with_vars([(key, Some(" value "))], || {
            assert_eq!(env_var_or_none(key), Some("value".to_string()));
        });
    }

    #[test]
    #[serial]
    fn test_from_env_reads_both_overrides() {
        temp_env::with_vars(
            [
                (ENV_BASE_URL, Some("https://base.example.com")),
                (ENV_AUTH_URL, Some("https://auth.example.com/token")),
            ],
            || {
                let env = EnvOverrides::from_env();
                assert_eq!(env.get(ConfigKey::BaseUrl), Some("https://base.example.com"));
                assert_eq!(
                    env.get(ConfigKey::AuthUrl),
                    Some("https://auth.example.com/token")
                );
                assert_eq!(env.get(ConfigKey::Output), None);
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_without_variables_is_empty() {
        temp_env::with_vars_unset([ENV_BASE_URL, ENV_AUTH_URL], || {
            assert_eq!(EnvOverrides::from_env(), EnvOverrides::default());
        });
    }
}

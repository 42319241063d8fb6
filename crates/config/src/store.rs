//! Typed access to the scalar settings in the `aura` section.
//!
//! Responsibilities:
//! - Define the allow-list of user-settable keys and validate their values.
//! - Resolve each setting from environment override, file value and default, in that order.
//! - Write single settings through a path patch, keeping the rest of the document intact.
//! - Hand out the credential and project registries bound to the same file.
//! - Hold the per-process polling configuration.
//!
//! Does NOT handle:
//! - Creating the file or choosing its location (see `bootstrap`).
//! - Credential and project records (see `credentials` and `projects`).
//!
//! Invariants:
//! - Every getter reads the file again; nothing from the document is cached.
//! - Enabling or disabling beta writes `beta-enabled` and `base-url` in the same write.
//! - The polling configuration is never persisted.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::clock::Clock;
use crate::constants::{
    AURA_SECTION, DEFAULT_AUTH_URL, DEFAULT_BASE_URL, DEFAULT_BETA_BASE_URL, DEFAULT_OUTPUT,
    DEFAULT_POLLING_INTERVAL_SECS, DEFAULT_POLLING_MAX_RETRIES, VALID_OUTPUT_VALUES,
};
use crate::credentials::Credentials;
use crate::document;
use crate::endpoint::{api_version, normalize_base_url, validate_url};
use crate::env::EnvOverrides;
use crate::error::ConfigError;
use crate::persistence::{ConfigFile, Patch};
use crate::projects::Projects;

/// A user-settable key under `aura`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    AuthUrl,
    BaseUrl,
    DefaultTenant,
    Output,
    BetaEnabled,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::AuthUrl,
        ConfigKey::BaseUrl,
        ConfigKey::DefaultTenant,
        ConfigKey::Output,
        ConfigKey::BetaEnabled,
    ];

    /// The key as written in the file and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::AuthUrl => "auth-url",
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::DefaultTenant => "default-tenant",
            ConfigKey::Output => "output",
            ConfigKey::BetaEnabled => "beta-enabled",
        }
    }

    pub(crate) fn path(self) -> &'static str {
        match self {
            ConfigKey::AuthUrl => "aura.auth-url",
            ConfigKey::BaseUrl => "aura.base-url",
            ConfigKey::DefaultTenant => "aura.default-tenant",
            ConfigKey::Output => "aura.output",
            ConfigKey::BetaEnabled => "aura.beta-enabled",
        }
    }

    fn default_value(self) -> Option<Value> {
        match self {
            ConfigKey::AuthUrl => Some(Value::from(DEFAULT_AUTH_URL)),
            ConfigKey::BaseUrl => Some(Value::from(DEFAULT_BASE_URL)),
            ConfigKey::Output => Some(Value::from(DEFAULT_OUTPUT)),
            ConfigKey::BetaEnabled => Some(Value::Bool(false)),
            ConfigKey::DefaultTenant => None,
        }
    }

    /// Returns true if `key` names a settable key.
    pub fn is_valid(key: &str) -> bool {
        key.parse::<ConfigKey>().is_ok()
    }

    fn valid_keys() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidKey {
                key: s.to_string(),
                valid: Self::valid_keys(),
            })
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Output {
    #[default]
    Default,
    Json,
    Table,
}

impl Output {
    pub fn as_str(self) -> &'static str {
        match self {
            Output::Default => "default",
            Output::Json => "json",
            Output::Table => "table",
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Output {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Output::Default),
            "json" => Ok(Output::Json),
            "table" => Ok(Output::Table),
            other => Err(ConfigError::invalid_value(
                "output",
                format!(
                    "'{other}' is not one of {}",
                    VALID_OUTPUT_VALUES.join(", ")
                ),
            )),
        }
    }
}

/// How long-running operations poll for completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    pub max_retries: u32,
    pub interval: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_POLLING_MAX_RETRIES,
            interval: Duration::from_secs(DEFAULT_POLLING_INTERVAL_SECS),
        }
    }
}

/// Parses a boolean the way older versions stored it: a JSON bool or a string.
fn parse_bool(key: ConfigKey, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim() {
        s if s.eq_ignore_ascii_case("true") => Ok(true),
        s if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(ConfigError::invalid_value(
            key.as_str(),
            format!("'{other}' is not true or false"),
        )),
    }
}

/// Handle on the configuration file.
///
/// Obtained from [`ConfigStore::bootstrap`] or [`crate::Bootstrap`].
pub struct ConfigStore {
    file: ConfigFile,
    env: EnvOverrides,
    clock: Arc<dyn Clock>,
    polling: PollingConfig,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("file", &self.file)
            .field("env", &self.env)
            .field("polling", &self.polling)
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    pub(crate) fn from_parts(file: ConfigFile, env: EnvOverrides, clock: Arc<dyn Clock>) -> Self {
        Self {
            file,
            env,
            clock,
            polling: PollingConfig::default(),
        }
    }

    /// Path of the config file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns the effective value of `key`.
    ///
    /// An environment override wins over the file, and the file wins over the
    /// built-in default. `default-tenant` has no default.
    pub fn get(&self, key: ConfigKey) -> Result<Option<Value>, ConfigError> {
        if let Some(value) = self.env.get(key) {
            return Ok(Some(Value::from(value)));
        }
        let document = self.file.read()?;
        Ok(self.stored_or_default(&document, key))
    }

    fn stored_or_default(&self, document: &Value, key: ConfigKey) -> Option<Value> {
        match document::get(document, key.path()) {
            None | Some(Value::Null) => key.default_value(),
            Some(value) => Some(value.clone()),
        }
    }

    fn get_string(&self, key: ConfigKey) -> Result<Option<String>, ConfigError> {
        Ok(self.get(key)?.and_then(|value| match value {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        }))
    }

    /// Validates `value` for `key` and writes it.
    ///
    /// Setting `beta-enabled` also points `base-url` at the matching endpoint.
    pub fn set(&self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let patch = match key {
            ConfigKey::AuthUrl | ConfigKey::BaseUrl => {
                validate_url(key.as_str(), value)?;
                Patch::new().set(key.path(), value.trim())
            }
            ConfigKey::Output => {
                let output: Output = value.trim().parse()?;
                Patch::new().set(key.path(), output.as_str())
            }
            ConfigKey::DefaultTenant => Patch::new().set(key.path(), value),
            ConfigKey::BetaEnabled => {
                let enabled = parse_bool(key, value)?;
                let base_url = if enabled {
                    DEFAULT_BETA_BASE_URL
                } else {
                    DEFAULT_BASE_URL
                };
                Patch::new()
                    .set(key.path(), enabled)
                    .set(ConfigKey::BaseUrl.path(), base_url)
            }
        };

        self.file.apply(patch)?;
        tracing::debug!(key = %key, "Updated config setting");
        Ok(())
    }

    /// API base URL reduced to `scheme://host[:port]`.
    ///
    /// Production and beta share a host, so this value is the same for both.
    /// Use [`ConfigStore::api_url`] for the versioned endpoint.
    pub fn base_url(&self) -> Result<String, ConfigError> {
        let raw = self
            .get_string(ConfigKey::BaseUrl)?
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        normalize_base_url(&raw)
    }

    /// API version segment matching the beta setting.
    pub fn api_version(&self) -> Result<&'static str, ConfigError> {
        Ok(api_version(self.beta_enabled()?))
    }

    /// Normalized base URL joined with the API version, e.g. `https://api.neo4j.io/v1beta5`.
    pub fn api_url(&self) -> Result<String, ConfigError> {
        Ok(format!("{}/{}", self.base_url()?, self.api_version()?))
    }

    pub fn auth_url(&self) -> Result<String, ConfigError> {
        Ok(self
            .get_string(ConfigKey::AuthUrl)?
            .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()))
    }

    pub fn output(&self) -> Result<Output, ConfigError> {
        match self.get_string(ConfigKey::Output)? {
            Some(raw) => raw.parse(),
            None => Ok(Output::Default),
        }
    }

    /// Whether the beta API is enabled. Accepts the string form older versions wrote.
    pub fn beta_enabled(&self) -> Result<bool, ConfigError> {
        match self.get(ConfigKey::BetaEnabled)? {
            Some(Value::Bool(enabled)) => Ok(enabled),
            Some(Value::String(raw)) => parse_bool(ConfigKey::BetaEnabled, &raw),
            None | Some(Value::Null) => Ok(false),
            Some(other) => Err(ConfigError::UnexpectedShape {
                at: ConfigKey::BetaEnabled.path().to_string(),
                expected: "a boolean",
                found: document::type_name(&other),
            }),
        }
    }

    /// Default tenant, or `None` when unset or empty.
    pub fn default_tenant(&self) -> Result<Option<String>, ConfigError> {
        Ok(self
            .get_string(ConfigKey::DefaultTenant)?
            .filter(|tenant| !tenant.is_empty()))
    }

    /// The `aura` section with defaults and overrides applied, for display.
    ///
    /// Client secrets and access tokens are masked.
    pub fn aura_section(&self) -> Result<Value, ConfigError> {
        let document = self.file.read()?;
        let mut section = match document.get(AURA_SECTION) {
            Some(Value::Object(map)) => map.clone(),
            None | Some(Value::Null) => Map::new(),
            Some(other) => {
                return Err(ConfigError::UnexpectedShape {
                    at: AURA_SECTION.to_string(),
                    expected: "an object",
                    found: document::type_name(other),
                });
            }
        };

        for key in ConfigKey::ALL {
            let effective = match self.env.get(key) {
                Some(value) => Some(Value::from(value)),
                None => self.stored_or_default(&document, key),
            };
            if let Some(value) = effective {
                section.insert(key.as_str().to_string(), value);
            }
        }

        if let Some(Value::Array(credentials)) = section.get_mut("credentials") {
            for credential in credentials.iter_mut().filter_map(Value::as_object_mut) {
                for field in ["client-secret", "access-token"] {
                    if let Some(value) = credential.get_mut(field)
                        && value.as_str().is_some_and(|s| !s.is_empty())
                    {
                        *value = Value::from("********");
                    }
                }
            }
        }

        Ok(Value::Object(section))
    }

    pub fn polling_config(&self) -> PollingConfig {
        self.polling
    }

    /// Overrides the polling configuration for the rest of this process.
    pub fn set_polling_config(&mut self, max_retries: u32, interval: Duration) {
        self.polling = PollingConfig {
            max_retries,
            interval,
        };
    }

    /// Registry of named credentials in this file.
    pub fn credentials(&self) -> Credentials<'_> {
        Credentials::new(&self.file, self.clock.as_ref())
    }

    /// Registry of named projects in this file.
    pub fn projects(&self) -> Projects<'_> {
        Projects::new(&self.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::fs::MemoryFileSystem;
    use serde_json::json;
    use std::path::PathBuf;

    const PATH: &str = "/prefs/neo4j/cli/config.json";

    fn store_with(contents: &str, env: EnvOverrides) -> (Arc<MemoryFileSystem>, ConfigStore) {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert_file(PATH, contents);
        let file = ConfigFile::new(fs.clone(), PathBuf::from(PATH));
        let store = ConfigStore::from_parts(file, env, Arc::new(ManualClock::new(0)));
        (fs, store)
    }

    #[test]
    fn test_config_key_parsing() {
        assert_eq!("base-url".parse::<ConfigKey>().unwrap(), ConfigKey::BaseUrl);
        assert!(ConfigKey::is_valid("beta-enabled"));

        let err = "colour".parse::<ConfigKey>().unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("auth-url, base-url, default-tenant, output, beta-enabled"));
    }

    #[test]
    fn test_get_falls_back_to_defaults() {
        let (_fs, store) = store_with("{}", EnvOverrides::default());
        assert_eq!(store.get(ConfigKey::Output).unwrap(), Some(json!("default")));
        assert_eq!(store.get(ConfigKey::DefaultTenant).unwrap(), None);
        assert_eq!(store.auth_url().unwrap(), DEFAULT_AUTH_URL);
        assert!(!store.beta_enabled().unwrap());
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let env = EnvOverrides {
            base_url: Some("http://localhost:8080/v1".into()),
            auth_url: None,
        };
        let (_fs, store) = store_with(
            r#"{"aura": {"base-url": "https://api.example.com/v1"}}"#,
            env,
        );
        assert_eq!(store.base_url().unwrap(), "http://localhost:8080");
    }

    #[test]
    fn test_base_url_strips_legacy_path() {
        let (_fs, store) = store_with(
            r#"{"aura": {"base-url": "https://api.example.com/v1"}}"#,
            EnvOverrides::default(),
        );
        assert_eq!(store.base_url().unwrap(), "https://api.example.com");
        assert_eq!(
            store.get(ConfigKey::BaseUrl).unwrap(),
            Some(json!("https://api.example.com/v1"))
        );
    }

    #[test]
    fn test_beta_toggle_rewrites_base_url_in_one_write() {
        let (fs, store) = store_with(r#"{"aura": {"output": "json"}}"#, EnvOverrides::default());

        store.set(ConfigKey::BetaEnabled, "true").unwrap();
        assert_eq!(fs.write_count(), 1);
        assert_eq!(store.get(ConfigKey::BetaEnabled).unwrap(), Some(json!(true)));
        assert!(store.beta_enabled().unwrap());
        assert_eq!(
            store.get(ConfigKey::BaseUrl).unwrap(),
            Some(json!(DEFAULT_BETA_BASE_URL))
        );
        assert_eq!(store.api_url().unwrap(), "https://api.neo4j.io/v1beta5");
        assert_eq!(store.base_url().unwrap(), "https://api.neo4j.io");

        store.set(ConfigKey::BetaEnabled, "false").unwrap();
        assert_eq!(store.get(ConfigKey::BaseUrl).unwrap(), Some(json!(DEFAULT_BASE_URL)));
        assert_eq!(store.api_url().unwrap(), "https://api.neo4j.io/v1");
        assert_eq!(store.output().unwrap(), Output::Json);
    }

    #[test]
    fn test_beta_enabled_accepts_legacy_string_form() {
        let (_fs, store) = store_with(
            r#"{"aura": {"beta-enabled": "TRUE"}}"#,
            EnvOverrides::default(),
        );
        assert!(store.beta_enabled().unwrap());
    }

    #[test]
    fn test_set_rejects_invalid_values_without_writing() {
        let (fs, store) = store_with("{}", EnvOverrides::default());

        assert!(store.set(ConfigKey::Output, "yaml").unwrap_err().is_usage());
        assert!(store.set(ConfigKey::BetaEnabled, "maybe").unwrap_err().is_usage());
        assert!(store.set(ConfigKey::BaseUrl, "not a url").unwrap_err().is_usage());
        assert_eq!(fs.write_count(), 0);
    }

    #[test]
    fn test_default_tenant_empty_is_none() {
        let (_fs, store) = store_with(r#"{"aura": {"default-tenant": ""}}"#, EnvOverrides::default());
        assert_eq!(store.default_tenant().unwrap(), None);

        store.set(ConfigKey::DefaultTenant, "tenant-1").unwrap();
        assert_eq!(store.default_tenant().unwrap().as_deref(), Some("tenant-1"));
    }

    #[test]
    fn test_aura_section_masks_secrets() {
        let (_fs, store) = store_with(
            r#"{"aura": {"credentials": [{"name": "c", "client-id": "id", "client-secret": "s3cret", "access-token": ""}]}}"#,
            EnvOverrides::default(),
        );
        let section = store.aura_section().unwrap();

        assert_eq!(section["credentials"][0]["client-secret"], json!("********"));
        assert_eq!(section["credentials"][0]["access-token"], json!(""));
        assert_eq!(section["output"], json!("default"));
        assert!(!section.to_string().contains("s3cret"));
    }

    #[test]
    fn test_polling_config_is_in_memory_only() {
        let (fs, mut store) = store_with("{}", EnvOverrides::default());
        assert_eq!(store.polling_config(), PollingConfig::default());
        assert_eq!(store.polling_config().max_retries, 60);

        store.set_polling_config(5, Duration::from_secs(1));
        assert_eq!(store.polling_config().max_retries, 5);
        assert_eq!(store.polling_config().interval, Duration::from_secs(1));
        assert_eq!(fs.write_count(), 0);
    }
}

//! Centralized constants for the Aura configuration store.
//!
//! This module contains the default values, JSON paths and environment
//! variable names shared across the store and its registries.

// =============================================================================
// File Location
// =============================================================================

/// Vendor directory under the OS preferences directory.
pub const CONFIG_VENDOR: &str = "neo4j";

/// Tool directory under the vendor directory.
pub const CONFIG_TOOL: &str = "cli";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.json";

// =============================================================================
// Endpoint Defaults
// =============================================================================

/// Production API base URL written on first run and when beta is disabled.
pub const DEFAULT_BASE_URL: &str = "https://api.neo4j.io/v1";

/// Beta API base URL written when beta is enabled.
pub const DEFAULT_BETA_BASE_URL: &str = "https://api.neo4j.io/v1beta5";

/// OAuth token endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://api.neo4j.io/oauth/token";

/// API version segment used with the production endpoint.
pub const API_VERSION: &str = "v1";

/// API version segment used with the beta endpoint.
pub const BETA_API_VERSION: &str = "v1beta5";

/// Output mode written on first run.
pub const DEFAULT_OUTPUT: &str = "default";

/// Accepted values for the `output` setting.
pub const VALID_OUTPUT_VALUES: [&str; 3] = ["default", "json", "table"];

// =============================================================================
// Environment Variables
// =============================================================================

/// Overrides the API base URL.
pub const ENV_BASE_URL: &str = "AURA_BASE_URL";

/// Overrides the OAuth token endpoint.
pub const ENV_AUTH_URL: &str = "AURA_AUTH_URL";

// =============================================================================
// Token & Polling Defaults
// =============================================================================

/// Seconds subtracted from a token lifetime before it is considered expired.
pub const TOKEN_EXPIRY_TOLERANCE_SECS: i64 = 60;

/// Default number of polls before a long-running operation gives up.
pub const DEFAULT_POLLING_MAX_RETRIES: u32 = 60;

/// Default delay between polls in seconds.
pub const DEFAULT_POLLING_INTERVAL_SECS: u64 = 20;

// =============================================================================
// Document Paths
// =============================================================================

pub(crate) const AURA_SECTION: &str = "aura";
pub(crate) const CREDENTIALS_PATH: &str = "aura.credentials";
pub(crate) const DEFAULT_CREDENTIAL_PATH: &str = "aura.default-credential";

pub(crate) const PROJECTS_SECTION: &str = "aura-projects";
pub(crate) const PROJECTS_PATH: &str = "aura-projects.projects";
pub(crate) const DEFAULT_PROJECT_PATH: &str = "aura-projects.default-project";

/// Field name that held the default project before it was renamed to `default-project`.
pub(crate) const LEGACY_DEFAULT_PROJECT_KEY: &str = "default";
pub(crate) const DEFAULT_PROJECT_KEY: &str = "default-project";

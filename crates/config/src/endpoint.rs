//! Base URL normalization.
//!
//! Older versions stored the base URL with the API version as a path
//! (`https://api.neo4j.io/v1`). Callers now add the version themselves, so the
//! stored value is reduced to `scheme://host[:port]` whenever it is read.
//! Nothing is rewritten on disk; legacy values keep working as they are.

use url::Url;

use crate::constants::{API_VERSION, BETA_API_VERSION};
use crate::error::ConfigError;

/// Reduces `raw` to `scheme://host[:port]`, dropping path, query and fragment.
///
/// An explicit non-default port is kept. Values without a host
/// (`mailto:`, bare words) are rejected.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::invalid_value("base-url", format!("'{raw}' is not a valid URL: {e}")))?;

    let host = url
        .host_str()
        .ok_or_else(|| ConfigError::invalid_value("base-url", format!("'{raw}' has no host")))?;

    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

/// Returns the API version path segment for the beta setting.
pub fn api_version(beta_enabled: bool) -> &'static str {
    if beta_enabled {
        BETA_API_VERSION
    } else {
        API_VERSION
    }
}

/// Checks that `raw` parses as an absolute URL with a host.
pub(crate) fn validate_url(key: &str, raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::invalid_value(key, format!("'{raw}' is not a valid URL: {e}")))?;
    if url.host_str().is_none() {
        return Err(ConfigError::invalid_value(key, format!("'{raw}' has no host")));
    }
    Ok(())
}

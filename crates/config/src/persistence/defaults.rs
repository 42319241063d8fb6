//! The document written when no config file exists yet.

use serde_json::{Value, json};

use crate::constants::{DEFAULT_AUTH_URL, DEFAULT_BASE_URL, DEFAULT_OUTPUT};
use crate::env::EnvOverrides;

/// Builds the first-run document, with environment overrides applied.
pub(crate) fn seed_document(env: &EnvOverrides) -> Value {
    let base_url = env.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
    let auth_url = env.auth_url.as_deref().unwrap_or(DEFAULT_AUTH_URL);

    json!({
        "aura": {
            "base-url": base_url,
            "auth-url": auth_url,
            "output": DEFAULT_OUTPUT,
            "beta-enabled": false,
            "credentials": [],
        },
        "aura-projects": {
            "default-project": "",
            "projects": {},
        },
    })
}

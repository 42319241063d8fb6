//! Client credential records and token expiry arithmetic.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::TOKEN_EXPIRY_TOLERANCE_SECS;

/// A named OAuth client credential with its cached access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "client-id", default)]
    pub client_id: String,

    #[serde(rename = "client-secret", default = "empty_secret", with = "super::secret_string")]
    pub client_secret: SecretString,

    /// Empty when no token has been cached.
    #[serde(rename = "access-token", default = "empty_secret", with = "super::nullable_secret")]
    pub access_token: SecretString,

    /// Epoch milliseconds after which `access_token` is stale. `0` when absent.
    #[serde(rename = "token-expiry", default)]
    pub token_expiry: i64,

    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new().into())
}

impl Credential {
    /// Creates a credential with no cached token.
    pub fn new(name: impl Into<String>, client_id: impl Into<String>, client_secret: SecretString) -> Self {
        Self {
            name: name.into(),
            client_id: client_id.into(),
            client_secret,
            access_token: empty_secret(),
            token_expiry: 0,
            extra: Map::new(),
        }
    }

    /// True if a token is cached and `now_millis` is strictly before its expiry.
    pub fn has_valid_access_token_at(&self, now_millis: i64) -> bool {
        !self.access_token.expose_secret().is_empty() && now_millis < self.token_expiry
    }

    pub(crate) fn store_token(&mut self, token: SecretString, expiry: i64) {
        self.access_token = token;
        self.token_expiry = expiry;
    }

    pub(crate) fn clear_token(&mut self) {
        self.store_token(empty_secret(), 0);
    }
}

/// Absolute expiry for a token issued at `now_millis` that lives `expires_in_secs`.
///
/// A fixed tolerance is taken off the lifetime so a token is never used right
/// at the edge of its validity. Saturates instead of overflowing.
pub fn token_expiry_from(now_millis: i64, expires_in_secs: i64) -> i64 {
    let effective_secs = expires_in_secs.saturating_sub(TOKEN_EXPIRY_TOLERANCE_SECS);
    now_millis.saturating_add(effective_secs.saturating_mul(1000))
}

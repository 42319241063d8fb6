//! Record types stored in the configuration document.
//!
//! Responsibilities:
//! - Define the credential and project records and their JSON field names.
//! - Provide serialization helpers for secret values.
//! - Keep unknown record fields so they survive a read-modify-write cycle.
//!
//! Does NOT handle:
//! - Reading or writing the file (see `persistence`).
//! - Uniqueness or default-selection rules (see `credentials` and `projects`).
//!
//! Invariants:
//! - Client secrets and access tokens are held as `secrecy::SecretString` and never appear in `Debug` output.
//! - Serialization writes secrets as plain strings; the file itself is owner-only.

mod credential;
mod project;

pub use credential::{Credential, token_expiry_from};
pub use project::{Project, ProjectList, ProjectScope};
pub(crate) use project::StoredProjects;

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Like `secret_string`, but `null` reads as an empty secret.
mod nullable_secret {
    use secrecy::SecretString;
    use serde::{Deserialize as DeserializeTrait, Deserializer};

    pub use super::secret_string::serialize;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(SecretString::new(s.into()))
    }
}

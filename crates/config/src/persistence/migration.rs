//! Schema upgrade applied when an existing config file is opened.
//!
//! Responsibilities:
//! - Rename the historical `aura-projects.default` field to `aura-projects.default-project`.
//!
//! Does NOT handle:
//! - Reading or writing the file (bootstrap writes only when this reports a change).
//! - List-shaped project collections. Those are decoded as they are and
//!   rewritten as a map by the next project mutation.
//!
//! Invariants:
//! - The renamed key keeps its position among its siblings.
//! - An existing `default-project` is never overwritten; the upgrade is then a no-op.
//! - Running the upgrade twice changes nothing the second time.

use serde_json::{Map, Value};

use crate::constants::{DEFAULT_PROJECT_KEY, LEGACY_DEFAULT_PROJECT_KEY, PROJECTS_SECTION};

/// Upgrades `document` in place. Returns true if anything changed.
pub(crate) fn upgrade_document(document: &mut Value) -> bool {
    let Some(section) = document
        .get_mut(PROJECTS_SECTION)
        .and_then(Value::as_object_mut)
    else {
        return false;
    };

    if section.contains_key(DEFAULT_PROJECT_KEY) || !section.contains_key(LEGACY_DEFAULT_PROJECT_KEY)
    {
        return false;
    }

    let renamed: Map<String, Value> = std::mem::take(section)
        .into_iter()
        .map(|(key, value)| {
            if key == LEGACY_DEFAULT_PROJECT_KEY {
                (DEFAULT_PROJECT_KEY.to_string(), value)
            } else {
                (key, value)
            }
        })
        .collect();
    *section = renamed;

    tracing::info!(
        from = LEGACY_DEFAULT_PROJECT_KEY,
        to = DEFAULT_PROJECT_KEY,
        "Upgraded default project field in config file"
    );
    true
}

//! Dotted-path access into an untyped JSON document.
//!
//! All writes go through [`set`] on the full document tree instead of
//! decoding the file into a struct and re-encoding it, so keys written by
//! other tools or other versions survive every update.

use serde_json::{Map, Value};

use crate::error::ConfigError;

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

/// Returns the value at a dotted path such as `aura.base-url`.
pub fn get<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path).try_fold(document, |node, key| node.as_object()?.get(key))
}

/// Returns the string at `path`, treating a missing value or `null` as absent.
pub(crate) fn get_str<'a>(document: &'a Value, path: &str) -> Option<&'a str> {
    get(document, path).and_then(Value::as_str)
}

/// Sets the value at a dotted path, creating intermediate objects as needed.
///
/// Sibling keys at every level are kept as they are. An intermediate value
/// that exists but is not an object (or `null`) is never replaced; that is
/// reported as [`ConfigError::UnexpectedShape`] instead.
pub fn set(document: &mut Value, path: &str, value: Value) -> Result<(), ConfigError> {
    let keys: Vec<&str> = segments(path).collect();
    let Some((last, parents)) = keys.split_last() else {
        return Err(ConfigError::UnexpectedShape {
            at: path.to_string(),
            expected: "a non-empty path",
            found: "an empty path",
        });
    };

    let mut node = document;
    for (depth, key) in parents.iter().enumerate() {
        let map = object_at(node, &keys[..depth])?;
        node = map
            .entry((*key).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    object_at(node, parents)?.insert((*last).to_string(), value);

    Ok(())
}

fn object_at<'a>(node: &'a mut Value, at: &[&str]) -> Result<&'a mut Map<String, Value>, ConfigError> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::UnexpectedShape {
            at: if at.is_empty() {
                "<root>".to_string()
            } else {
                at.join(".")
            },
            expected: "an object",
            found: type_name(other),
        }),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

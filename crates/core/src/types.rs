//! Shared value types and key-encoding helpers.

use indexmap::IndexMap;
use serde_json::Value;

/// Submitted field values keyed by field name, in submission order.
pub type FieldValues = IndexMap<String, String>;

/// Suffix that marks a field key as optional (`"company--optional"`).
pub const OPTIONAL_SUFFIX: &str = "--optional";

/// Remove the optional marker from a submitted key, if present.
pub fn strip_optional_suffix(key: &str) -> &str {
    key.strip_suffix(OPTIONAL_SUFFIX).unwrap_or(key)
}

/// Append the optional marker to a field name.
pub fn with_optional_suffix(name: &str) -> String {
    format!("{name}{OPTIONAL_SUFFIX}")
}

/// Base field name of an item id: everything before the first `--`.
pub fn base_name(key: &str) -> &str {
    key.split("--").next().unwrap_or(key)
}

/// A value is blank when it is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Convert a submitted JSON scalar into its string form.
///
/// `null` becomes an empty (blank) value. Arrays and objects are not field
/// values and yield `None`.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whether a checkbox-style flag was ticked.
///
/// Checkbox options arrive as arbitrary strings, so any non-empty string,
/// `true`, or non-zero number counts as present.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !is_blank(s),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

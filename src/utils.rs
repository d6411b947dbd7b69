//! Parameter and response-shape helpers shared across the crate

use serde_json::Value;
use std::collections::HashMap;

/// Builds the wire parameter map for an action request.
///
/// The `action` entry is inserted last so it always wins over a
/// caller-supplied `action` parameter.
#[inline(always)]
pub(crate) fn merge_action(action: &str, params: &[(&str, &str)]) -> HashMap<String, String> {
    let mut merged: HashMap<String, String> = params
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    merged.insert("action".to_string(), action.to_string());
    merged
}

/// Walks a path of object keys and returns the string leaf, if the response
/// has that shape.
pub(crate) fn str_field<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    current.as_str()
}

//! Dotted-path access into dynamically shaped records

use serde_json::Value;

/// Resolve a dotted path such as `customer.address.city` against a value.
///
/// Object segments are looked up by key, numeric segments index arrays.
/// Any type mismatch, missing key or empty segment yields `None`.
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.').try_fold(value, step)
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    if segment.is_empty() {
        return None;
    }
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Resolve a path, treating an explicit `null` the same as absence
pub fn resolve_present<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    resolve_path(value, path).filter(|v| !v.is_null())
}

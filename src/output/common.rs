//! Common utilities for output formatters

use serde_json::Value;

use crate::config::output;

/// Display text for a resolved value in a table cell.
///
/// `None` and `null` become the placeholder, booleans become glyphs and
/// arrays are summarized by item count. Long strings are truncated.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => output::PLACEHOLDER.to_string(),
        Some(Value::Bool(true)) => output::TRUE_GLYPH.to_string(),
        Some(Value::Bool(false)) => output::FALSE_GLYPH.to_string(),
        Some(Value::Array(items)) => item_count(items.len()),
        Some(Value::String(s)) => truncate(s, output::MAX_CELL_CHARS),
        Some(other) => truncate(&other.to_string(), output::MAX_CELL_CHARS),
    }
}

/// Untruncated scalar text for `field=value` pairs
pub fn plain_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => output::PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// `1 item`, `3 items`
pub fn item_count(count: usize) -> String {
    pluralize(count, "item", "items")
}

/// `1 result`, `2 results`
pub fn result_count(count: usize) -> String {
    pluralize(count, "result", "results")
}

fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Cut a string to `max` characters, the last one being the ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}{}", kept, output::ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_use_placeholder() {
        assert_eq!(cell_text(None), "-");
        assert_eq!(cell_text(Some(&Value::Null)), "-");
    }

    #[test]
    fn test_boolean_glyphs() {
        assert_eq!(cell_text(Some(&json!(true))), "✓");
        assert_eq!(cell_text(Some(&json!(false))), "✗");
    }

    #[test]
    fn test_array_summary() {
        assert_eq!(cell_text(Some(&json!([]))), "0 items");
        assert_eq!(cell_text(Some(&json!([{"a": 1}]))), "1 item");
        assert_eq!(cell_text(Some(&json!([1, "two", null]))), "3 items");
    }

    #[test]
    fn test_numbers_verbatim() {
        assert_eq!(cell_text(Some(&json!(120.5))), "120.5");
        assert_eq!(cell_text(Some(&json!(75))), "75");
    }

    #[test]
    fn test_truncate_long_string() {
        let long = "a".repeat(50);
        let cell = cell_text(Some(&json!(long)));
        assert_eq!(cell.chars().count(), output::MAX_CELL_CHARS);
        assert!(cell.ends_with(output::ELLIPSIS));
    }

    #[test]
    fn test_truncate_boundary() {
        let exact = "b".repeat(output::MAX_CELL_CHARS);
        assert_eq!(truncate(&exact, output::MAX_CELL_CHARS), exact);
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Société Générale", 8), "Société…");
    }

    #[test]
    fn test_result_count_pluralization() {
        assert_eq!(result_count(0), "0 results");
        assert_eq!(result_count(1), "1 result");
        assert_eq!(result_count(2), "2 results");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text(Some(&json!("Paid"))), "Paid");
        assert_eq!(plain_text(Some(&json!(3))), "3");
        assert_eq!(plain_text(Some(&json!([1, 2]))), "[1,2]");
        assert_eq!(plain_text(None), "-");
    }
}

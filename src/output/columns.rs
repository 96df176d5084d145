//! Display columns for table output

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::error::{AcctError, Result};

/// Turns a resolved, non-null value into cell text
pub type ValueFormatter = fn(&Value) -> String;

/// A path-addressed table column
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Dotted path into the record
    pub key: String,
    /// Header label
    pub label: String,
    pub formatter: Option<ValueFormatter>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

/// Parse `path[:Label[:formatter]]`, e.g. `customer.name:Customer` or
/// `totalAmount:Total:amount`
impl FromStr for ColumnSpec {
    type Err = AcctError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let key = parts.next().unwrap_or_default().trim();
        if key.is_empty() {
            return Err(AcctError::InvalidArgument(format!(
                "column '{}' has an empty path",
                s
            )));
        }
        let label = match parts.next().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => humanize(key),
        };
        let column = ColumnSpec::new(key, label);
        match parts.next().map(str::trim) {
            None | Some("") => Ok(column),
            Some(name) => builtin_formatter(name)
                .map(|f| column.with_formatter(f))
                .ok_or_else(|| {
                    AcctError::InvalidArgument(format!(
                        "unknown formatter '{}' (expected amount or date)",
                        name
                    ))
                }),
        }
    }
}

/// Look up a built-in formatter by name
pub fn builtin_formatter(name: &str) -> Option<ValueFormatter> {
    match name {
        "amount" => Some(format_amount as ValueFormatter),
        "date" => Some(format_date as ValueFormatter),
        _ => None,
    }
}

/// Two decimals for numbers and numeric strings; anything else unchanged
pub fn format_amount(value: &Value) -> String {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) => format!("{:.2}", n),
        None => fallback(value),
    }
}

/// RFC 3339 timestamps and ISO dates as `YYYY-MM-DD`; anything else unchanged
pub fn format_date(value: &Value) -> String {
    let Value::String(s) = value else {
        return fallback(value);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return ts.date_naive().format("%Y-%m-%d").to_string();
    }
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => s.clone(),
    }
}

fn fallback(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Columns from the first record's top-level keys.
///
/// Keys holding nested objects are skipped; arrays are kept.
pub fn infer_columns(records: &[&Value]) -> Vec<ColumnSpec> {
    let Some(Value::Object(first)) = records.first() else {
        return Vec::new();
    };
    first
        .iter()
        .filter(|(_, value)| !value.is_object())
        .map(|(key, _)| ColumnSpec::new(key.as_str(), humanize(key)))
        .collect()
}

/// Reject column sets that repeat a key
pub fn ensure_unique(columns: &[ColumnSpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(AcctError::Render(format!(
                "column '{}' is listed more than once",
                column.key
            )));
        }
    }
    Ok(())
}

/// `totalAmount` -> `Total Amount`, `due_date` -> `Due Date`, `customer.name` -> `Customer Name`
pub fn humanize(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in key.chars() {
        if c == '_' || c == '-' || c == '.' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_skips_nested_objects_keeps_arrays() {
        let record = json!({
            "id": 1,
            "customer": {"name": "Acme"},
            "lines": [{"amount": 1}],
            "status": "Open",
            "memo": null
        });
        let columns = infer_columns(&[&record]);
        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["id", "lines", "status", "memo"]);
    }

    #[test]
    fn test_infer_uses_first_record_only() {
        let first = json!({"id": 1});
        let second = json!({"id": 2, "extra": true});
        let columns = infer_columns(&[&first, &second]);
        assert_eq!(columns.len(), 1);
    }

    #[test]
    fn test_infer_empty() {
        assert!(infer_columns(&[]).is_empty());
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("totalAmount"), "Total Amount");
        assert_eq!(humanize("due_date"), "Due Date");
        assert_eq!(humanize("customer.name"), "Customer Name");
        assert_eq!(humanize("id"), "Id");
        assert_eq!(humanize("vatID"), "Vat ID");
    }

    #[test]
    fn test_ensure_unique() {
        let ok = vec![ColumnSpec::new("id", "ID"), ColumnSpec::new("status", "Status")];
        assert!(ensure_unique(&ok).is_ok());

        let dup = vec![ColumnSpec::new("id", "ID"), ColumnSpec::new("id", "Again")];
        assert!(matches!(ensure_unique(&dup), Err(AcctError::Render(_))));
    }

    #[test]
    fn test_parse_column_forms() {
        let c: ColumnSpec = "totalAmount".parse().unwrap();
        assert_eq!(c.label, "Total Amount");
        assert!(c.formatter.is_none());

        let c: ColumnSpec = "customer.name:Customer".parse().unwrap();
        assert_eq!(c.key, "customer.name");
        assert_eq!(c.label, "Customer");

        let c: ColumnSpec = "totalAmount:Total:amount".parse().unwrap();
        assert!(c.formatter.is_some());

        assert!("".parse::<ColumnSpec>().is_err());
        assert!("id:ID:shout".parse::<ColumnSpec>().is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(&json!(75)), "75.00");
        assert_eq!(format_amount(&json!(120.5)), "120.50");
        assert_eq!(format_amount(&json!("19.999")), "20.00");
        assert_eq!(format_amount(&json!("n/a")), "n/a");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&json!("2024-03-05T10:00:00Z")), "2024-03-05");
        assert_eq!(format_date(&json!("2024-03-05")), "2024-03-05");
        assert_eq!(format_date(&json!("soon")), "soon");
        assert_eq!(format_date(&json!(12)), "12");
    }
}

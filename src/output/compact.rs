//! Compact line-oriented output formatter

use serde_json::Value;

use super::common::plain_text;
use crate::error::Result;
use crate::record::resolve_path;

/// One line per record: `field=value` pairs when fields are given,
/// otherwise the whole record on a single line
pub fn render_compact(records: &[&Value], fields: Option<&[String]>) -> Result<String> {
    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        let line = match fields {
            Some(fields) => fields
                .iter()
                .map(|f| format!("{}={}", f, plain_text(resolve_path(record, f))))
                .collect::<Vec<_>>()
                .join(" "),
            None => serde_json::to_string(record)?,
        };
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

//! Table output formatter

use comfy_table::{presets::NOTHING, Table};
use serde_json::Value;

use super::columns::{ensure_unique, infer_columns, ColumnSpec};
use super::common::{cell_text, result_count};
use crate::error::Result;
use crate::record::resolve_path;

/// Render records as an aligned table followed by a result count
pub fn render_table(
    records: &[&Value],
    columns: Option<&[ColumnSpec]>,
    title: Option<&str>,
) -> Result<String> {
    let inferred;
    let columns = match columns {
        Some(columns) => columns,
        None => {
            inferred = infer_columns(records);
            &inferred[..]
        }
    };
    ensure_unique(columns)?;

    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_header(columns.iter().map(|c| c.label.as_str()));

    for record in records {
        table.add_row(columns.iter().map(|c| cell(record, c)));
    }

    let mut out = String::new();
    if let Some(title) = title {
        out.push_str(title);
        out.push('\n');
    }
    out.push_str(&table.to_string());
    out.push_str("\n\n");
    out.push_str(&result_count(records.len()));
    Ok(out)
}

fn cell(record: &Value, column: &ColumnSpec) -> String {
    let value = resolve_path(record, &column.key);
    match (value, column.formatter) {
        (Some(v), Some(format)) if !v.is_null() => format(v),
        (value, _) => cell_text(value),
    }
}

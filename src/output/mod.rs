//! Output formatting module
//!
//! Renders a record or a list of records as table, JSON or compact lines.
//! Only JSON is lossless; the other formats summarize for display.

pub mod columns;
mod common;
mod compact;
mod json;
mod table;

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::config::output;
use crate::error::Result;

pub use self::columns::{builtin_formatter, ColumnSpec, ValueFormatter};
pub use self::common::{cell_text, result_count, truncate};
pub use self::compact::render_compact;
pub use self::json::render_json;
pub use self::table::render_table;

/// What to render: one record, or an ordered list
#[derive(Debug, Clone, Copy)]
pub enum RenderInput<'a> {
    Single(&'a Value),
    List(&'a [Value]),
}

impl<'a> From<&'a [Value]> for RenderInput<'a> {
    fn from(records: &'a [Value]) -> Self {
        RenderInput::List(records)
    }
}

impl<'a> From<&'a Vec<Value>> for RenderInput<'a> {
    fn from(records: &'a Vec<Value>) -> Self {
        RenderInput::List(records)
    }
}

impl<'a> From<&'a Value> for RenderInput<'a> {
    /// A JSON array is treated as a list, anything else as one record
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => RenderInput::List(items),
            other => RenderInput::Single(other),
        }
    }
}

impl<'a> RenderInput<'a> {
    /// A `null` single record (e.g. a 204 reply) has nothing to show
    fn records(&self) -> Vec<&'a Value> {
        match *self {
            RenderInput::Single(Value::Null) => Vec::new(),
            RenderInput::Single(record) => vec![record],
            RenderInput::List(records) => records.iter().collect(),
        }
    }
}

/// Options for a single render call
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Table columns; inferred from the first record when absent
    pub columns: Option<Vec<ColumnSpec>>,
    /// Compact-mode field paths
    pub fields: Option<Vec<String>>,
    /// Table title
    pub title: Option<String>,
    /// Pretty-print JSON
    pub pretty: bool,
}

impl RenderOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }
}

/// Render records in the requested format
pub fn render<'a>(input: impl Into<RenderInput<'a>>, options: &RenderOptions) -> Result<String> {
    let input = input.into();
    let records = input.records();

    match options.format {
        OutputFormat::Json => match input {
            RenderInput::Single(record) => render_json(record, options.pretty),
            RenderInput::List(records) => {
                render_json(&Value::Array(records.to_vec()), options.pretty)
            }
        },
        _ if records.is_empty() => Ok(output::NO_RESULTS.to_string()),
        OutputFormat::Table => render_table(
            &records,
            options.columns.as_deref(),
            options.title.as_deref(),
        ),
        OutputFormat::Compact => render_compact(&records, options.fields.as_deref()),
    }
}

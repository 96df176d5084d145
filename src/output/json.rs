//! JSON output formatter

use serde_json::Value;

use crate::error::Result;

/// Serialize exactly what was received; nothing is dropped or summarized
pub fn render_json(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

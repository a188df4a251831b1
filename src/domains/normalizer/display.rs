//! Display text for normalized values.

use serde_json::Value;

/// Sentinel shown for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Maximum length of one summary line, in characters.
pub const LINE_CHAR_LIMIT: usize = 600;

/// Render a JSON value as single-line display text.
///
/// Strings are shown without quotes, nulls as `N/A`, arrays as a
/// comma-joined list of their displayable elements. Line breaks are
/// flattened to spaces so one record always yields exactly one line.
pub fn display_value(value: &Value) -> String {
    let text = match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter(|v| !v.is_null())
                .map(display_value)
                .filter(|s| !s.is_empty())
                .collect();
            if parts.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                parts.join(", ")
            }
        }
        Value::Object(_) => value.to_string(),
    };

    flatten_line_breaks(text)
}

/// Truthiness as upstream payloads use it: `false`, `0`, `""`, `[]`, `{}`
/// and `null` all count as unset.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Cap a line at [`LINE_CHAR_LIMIT`] characters, marking the cut with `…`.
pub fn truncate_line(line: String) -> String {
    if line.chars().count() <= LINE_CHAR_LIMIT {
        return line;
    }
    let mut cut: String = line.chars().take(LINE_CHAR_LIMIT - 1).collect();
    cut.push('…');
    cut
}

fn flatten_line_breaks(text: String) -> String {
    if text.contains(['\n', '\r']) {
        text.replace("\r\n", " ").replace(['\n', '\r'], " ")
    } else {
        text
    }
}

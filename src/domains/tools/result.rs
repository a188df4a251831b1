//! The uniform tool result envelope.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domains::normalizer::NOT_AVAILABLE;

/// Result returned by every tool.
///
/// A failed result never carries `data`, and `summary` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the tool produced what was asked for.
    pub success: bool,

    /// Tool-specific structured payload, only on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Short human-readable outcome.
    pub summary: String,

    /// Diagnostic for transport and upstream failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn non_empty(summary: String) -> String {
    if summary.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        summary
    }
}

impl ToolResult {
    /// A successful result.
    pub fn success(summary: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            summary: non_empty(summary.into()),
            error: None,
        }
    }

    /// A failure with no diagnostic (not found, rejected input).
    pub fn rejected(summary: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            summary: non_empty(summary.into()),
            error: None,
        }
    }

    /// A failure carrying a diagnostic.
    pub fn failure(summary: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            summary: non_empty(summary.into()),
            error: Some(error.into()),
        }
    }

    /// Serialize the envelope as JSON. Absent `data` and `error` are omitted.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Convert to the MCP result: text content is the summary, structured
    /// content is the envelope, and `is_error` mirrors `!success`.
    pub fn into_call_tool_result(self) -> CallToolResult {
        let structured = self.to_value();
        let content = vec![Content::text(self.summary)];
        let mut result = if self.success {
            CallToolResult::success(content)
        } else {
            CallToolResult::error(content)
        };
        result.structured_content = Some(structured);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let result = ToolResult::success("ok", json!({"a": 1}));
        assert!(result.success);
        assert_eq!(result.data, Some(json!({"a": 1})));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_failure_has_no_data() {
        let result = ToolResult::failure("Gagal konek ke API", "HTTP 500");
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn test_summary_never_empty() {
        assert_eq!(ToolResult::rejected("  ").summary, "N/A");
        assert_eq!(ToolResult::success("", Value::Null).summary, "N/A");
    }

    #[test]
    fn test_into_call_tool_result() {
        let result = ToolResult::rejected("Order ID 9 tidak ditemukan.").into_call_tool_result();
        assert_eq!(result.is_error, Some(true));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["success"], false);
        assert_eq!(structured["summary"], "Order ID 9 tidak ditemukan.");
        assert!(structured.get("data").is_none());
        assert!(structured.get("error").is_none());

        let text = result.content[0].as_text().unwrap();
        assert_eq!(text.text, "Order ID 9 tidak ditemukan.");
    }

    #[test]
    fn test_structured_failure_omits_data() {
        let result = ToolResult::failure("Gagal", "boom").into_call_tool_result();
        let structured = result.structured_content.unwrap();
        assert!(structured.get("data").is_none());
        assert_eq!(
            structured,
            json!({"success": false, "summary": "Gagal", "error": "boom"})
        );
    }

    #[test]
    fn test_structured_success_omits_error() {
        let structured = ToolResult::success("ok", json!([1])).to_value();
        assert_eq!(structured, json!({"success": true, "data": [1], "summary": "ok"}));
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let value = serde_json::to_value(ToolResult::rejected("x")).unwrap();
        assert_eq!(value, json!({"success": false, "summary": "x"}));
    }
}

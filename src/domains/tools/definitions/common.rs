//! Helpers shared by tool definitions.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[cfg(feature = "http")]
use crate::domains::tools::result::ToolResult;

/// Upper bound for caller-supplied result counts.
pub const MAX_RESULTS: usize = 100;

/// Deserialize tool arguments into their typed parameters.
pub fn parse_params<P: DeserializeOwned>(args: Map<String, Value>) -> Result<P, String> {
    serde_json::from_value(Value::Object(args)).map_err(|e| format!("Invalid arguments: {}", e))
}

/// Clamp a result count to 1..=[`MAX_RESULTS`].
pub fn validate_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_RESULTS)
}

/// JSON-RPC `tools/call` result body for the HTTP transport.
#[cfg(feature = "http")]
pub fn http_response(result: ToolResult) -> Value {
    let result = result.into_call_tool_result();
    serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false),
        "structuredContent": result.structured_content,
    })
}

/// Serialize any value for `ToolResult::data`, falling back to null.
pub fn to_data<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::context::ToolContext;
use super::definition::ToolDefinition;
use super::definitions::{
    CatalogTool, OrderStatusTool, SearchEbookTool, SearchItemTool, SearchMonsterTool,
    SearchSkillTool, SearchVectorTool, SendImageTool, SendMessageTool,
};

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when http feature is enabled)
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    ctx: Arc<ToolContext>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            OrderStatusTool::NAME,
            CatalogTool::NAME,
            SendImageTool::NAME,
            SendMessageTool::NAME,
            SearchItemTool::NAME,
            SearchMonsterTool::NAME,
            SearchSkillTool::NAME,
            SearchEbookTool::NAME,
            SearchVectorTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            OrderStatusTool::to_tool(),
            CatalogTool::to_tool(),
            SendImageTool::to_tool(),
            SendMessageTool::to_tool(),
            SearchItemTool::to_tool(),
            SearchMonsterTool::to_tool(),
            SearchSkillTool::to_tool(),
            SearchEbookTool::to_tool(),
            SearchVectorTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let ctx = self.ctx.clone();
        match name {
            OrderStatusTool::NAME => OrderStatusTool::http_handler(arguments, ctx).await,
            CatalogTool::NAME => CatalogTool::http_handler(arguments, ctx).await,
            SendImageTool::NAME => SendImageTool::http_handler(arguments, ctx).await,
            SendMessageTool::NAME => SendMessageTool::http_handler(arguments, ctx).await,
            SearchItemTool::NAME => SearchItemTool::http_handler(arguments, ctx).await,
            SearchMonsterTool::NAME => SearchMonsterTool::http_handler(arguments, ctx).await,
            SearchSkillTool::NAME => SearchSkillTool::http_handler(arguments, ctx).await,
            SearchEbookTool::NAME => SearchEbookTool::http_handler(arguments, ctx).await,
            SearchVectorTool::NAME => SearchVectorTool::http_handler(arguments, ctx).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {}", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{config_for, context};

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(context(config_for("http://127.0.0.1:9"))))
    }

    #[test]
    fn test_registry_tool_names() {
        let names = test_registry().tool_names();
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"check_order_status"));
        assert!(names.contains(&"get_katalog_by_id"));
        assert!(names.contains(&"search_skill"));
        assert!(names.contains(&"search_vector_db"));
    }

    #[test]
    fn test_tool_metadata_matches_names() {
        let registry = test_registry();
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), registry.tool_names().len());
        for tool in &tools {
            assert!(registry.tool_names().contains(&tool.name.as_ref()));
            assert!(tool.description.is_some());
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_validation_failure() {
        let result = test_registry()
            .call_tool("search_skill", serde_json::json!({ "query": "Fire@Ball" }))
            .await
            .unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["structuredContent"]["success"], false);
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_missing_argument() {
        let result = test_registry()
            .call_tool("check_order_status", serde_json::json!({}))
            .await;
        assert!(result.unwrap_err().contains("order_id"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let result = test_registry()
            .call_tool("unknown", serde_json::json!({}))
            .await;
        assert!(result.is_err());
    }
}

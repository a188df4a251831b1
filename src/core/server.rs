//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool implements `ToolDefinition`:
//! - Parameters struct (for rmcp)
//! - `run()` body returning the result envelope
//! - `http_handler()` (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use super::error::Result as CoreResult;
use crate::domains::tools::{ToolContext, ToolRegistry, build_tool_router};

/// Instructions advertised to MCP clients.
pub const INSTRUCTIONS: &str = "Store assistant tools: check order status (alerts the owner on manual or failed orders), look up catalog entries, send WhatsApp messages and images, search Toram Online items, monsters and skills on Torampedia, search ebooks on Library Genesis, and search reference documents in the vector database. Every tool returns {success, data, summary, error}.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// tool calls to the tool definitions.
#[derive(Clone)]
pub struct McpServer {
    /// Shared tool dependencies (configuration included).
    ctx: Arc<ToolContext>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the production collaborators.
    pub fn new(config: Config) -> CoreResult<Self> {
        let ctx = ToolContext::from_config(Arc::new(config))?;
        Ok(Self::with_context(ctx))
    }

    /// Create a server over an already wired context.
    pub fn with_context(ctx: ToolContext) -> Self {
        let ctx = Arc::new(ctx);
        Self {
            tool_router: build_tool_router::<Self>(ctx.clone()),
            ctx,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.ctx.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.ctx.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.ctx.config
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<&'static str> {
        ToolRegistry::new(self.ctx.clone()).tool_names()
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// This method uses the ToolRegistry to dispatch to the appropriate
    /// tool handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        ToolRegistry::new(self.ctx.clone())
            .call_tool(name, arguments)
            .await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.ctx.config.server.name.clone(),
                version: self.ctx.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::context::ToolContext;
use super::definition::ToolDefinition;
use super::definitions::{
    CatalogTool, OrderStatusTool, SearchEbookTool, SearchItemTool, SearchMonsterTool,
    SearchSkillTool, SearchVectorTool, SendImageTool, SendMessageTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(ctx: Arc<ToolContext>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(OrderStatusTool::create_route(ctx.clone()))
        .with_route(CatalogTool::create_route(ctx.clone()))
        .with_route(SendImageTool::create_route(ctx.clone()))
        .with_route(SendMessageTool::create_route(ctx.clone()))
        .with_route(SearchItemTool::create_route(ctx.clone()))
        .with_route(SearchMonsterTool::create_route(ctx.clone()))
        .with_route(SearchSkillTool::create_route(ctx.clone()))
        .with_route(SearchEbookTool::create_route(ctx.clone()))
        .with_route(SearchVectorTool::create_route(ctx))
}

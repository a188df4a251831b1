//! The shape every tool follows.
//!
//! A tool is a unit struct implementing [`ToolDefinition`]: typed
//! parameters, a `run` body returning `Result<ToolResult, ToolError>`, and
//! a failure summary. The provided methods turn that into MCP metadata, an
//! rmcp route for STDIO/TCP, and a JSON handler for HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::context::ToolContext;
use super::definitions::common::parse_params;
use super::error::ToolError;
use super::result::ToolResult;

#[async_trait]
pub trait ToolDefinition: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed arguments; the JSON schema is published in `tools/list`.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Summary returned when the upstream call fails.
    fn connect_failure(ctx: &ToolContext) -> String;

    /// Tool body.
    async fn run(params: Self::Params, ctx: &ToolContext) -> Result<ToolResult, ToolError>;

    /// Run the tool and fold any error into the envelope.
    fn execute(params: Self::Params, ctx: &ToolContext) -> BoxFuture<'_, ToolResult> {
        async move {
            match Self::run(params, ctx).await {
                Ok(result) => result,
                Err(err) => err.into_result(Self::NAME, &Self::connect_failure(ctx)),
            }
        }
        .boxed()
    }

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    ///
    /// Arguments that do not deserialize into `Params` are an
    /// `invalid_params` protocol error and never reach `run`.
    fn create_route<S>(ctx: Arc<ToolContext>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |call: ToolCallContext<'_, S>| {
            let args = call.arguments.clone().unwrap_or_default();
            let ctx = ctx.clone();
            async move {
                let params: Self::Params =
                    parse_params(args).map_err(|e| McpError::invalid_params(e, None))?;
                Ok(Self::execute(params, &ctx).await.into_call_tool_result())
            }
            .boxed()
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    fn http_handler(
        arguments: serde_json::Value,
        ctx: Arc<ToolContext>,
    ) -> BoxFuture<'static, Result<serde_json::Value, String>> {
        async move {
            let args = match arguments {
                serde_json::Value::Object(map) => map,
                serde_json::Value::Null => serde_json::Map::new(),
                other => return Err(format!("Arguments must be an object, got {}", other)),
            };
            let params: Self::Params = parse_params(args)?;
            let result = Self::execute(params, &ctx).await;
            Ok(super::definitions::common::http_response(result))
        }
        .boxed()
    }
}

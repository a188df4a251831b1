//! Send a WhatsApp text message, to the owner unless a number is given.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::tools::{ToolContext, ToolDefinition, ToolError, ToolResult};

/// Parameters for the message sender.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendMessageParams {
    #[schemars(description = "Message text")]
    pub message: String,

    #[schemars(description = "Recipient WhatsApp number (default: store owner)")]
    #[serde(default)]
    pub number: Option<String>,
}

/// Text message tool.
pub struct SendMessageTool;

#[async_trait]
impl ToolDefinition for SendMessageTool {
    const NAME: &'static str = "send_wa_message";

    const DESCRIPTION: &'static str =
        "Send a WhatsApp text message. Defaults to the store owner's number.";

    type Params = SendMessageParams;

    fn connect_failure(_ctx: &ToolContext) -> String {
        "Gagal mengirim pesan ke WhatsApp".to_string()
    }

    #[instrument(skip_all)]
    async fn run(params: SendMessageParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        if params.message.trim().is_empty() {
            return Err(ToolError::validation("Pesan tidak boleh kosong"));
        }

        let target = params
            .number
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| ctx.config.messaging.owner_number.clone());
        info!("Send message tool called for: {}", target);

        let response = ctx.messenger.send_text(&target, &params.message).await?;

        Ok(ToolResult::success(
            format!("Pesan berhasil dikirim ke {}", target),
            json!({
                "target": target,
                "message": params.message,
                "response": response,
            }),
        ))
    }
}

//! Send a supporting image (typically a vector-search hit) over WhatsApp.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::messaging::MediaMessage;
use crate::domains::tools::{ToolContext, ToolDefinition, ToolError, ToolResult};

const DEFAULT_CAPTION: &str = "🖼️ Gambar pendukung hasil pencarian";

fn default_caption() -> String {
    DEFAULT_CAPTION.to_string()
}

/// Parameters for the image sender.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendImageParams {
    /// Recipient phone number.
    #[schemars(description = "Recipient WhatsApp number")]
    pub number: String,

    /// Public image URL.
    #[schemars(description = "URL of the image to send")]
    pub image_url: String,

    #[schemars(description = "Image caption (default: '🖼️ Gambar pendukung hasil pencarian')")]
    #[serde(default = "default_caption")]
    pub caption: String,
}

/// Image sender tool.
pub struct SendImageTool;

#[async_trait]
impl ToolDefinition for SendImageTool {
    const NAME: &'static str = "send_milvus_image";

    const DESCRIPTION: &'static str =
        "Send a supporting image from a vector search result to a WhatsApp number.";

    type Params = SendImageParams;

    fn connect_failure(_ctx: &ToolContext) -> String {
        "Gagal mengirim gambar ke WhatsApp".to_string()
    }

    #[instrument(skip_all, fields(number = %params.number))]
    async fn run(params: SendImageParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        info!("Sending image {} to {}", params.image_url, params.number);

        let media = MediaMessage::image(&params.number, &params.image_url, &params.caption);
        ctx.messenger.send_media(&media).await?;

        Ok(ToolResult::success(
            format!("Gambar berhasil dikirim ke {}", params.number),
            json!({
                "number": params.number,
                "image_url": params.image_url,
                "caption": params.caption,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{RecordingMessenger, config_for, context_with};
    use std::sync::Arc;

    fn params(args: serde_json::Value) -> SendImageParams {
        serde_json::from_value(args).unwrap()
    }

    #[tokio::test]
    async fn test_send_image_default_caption() {
        let messenger = Arc::new(RecordingMessenger::default());
        let ctx = context_with(config_for("http://127.0.0.1:9"), messenger.clone());

        let result = SendImageTool::execute(
            params(json!({"number": "628111", "image_url": "https://img.example/a.png"})),
            &ctx,
        )
        .await;

        assert!(result.success);
        assert_eq!(result.summary, "Gambar berhasil dikirim ke 628111");
        let sent = messenger.media();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].caption, DEFAULT_CAPTION);
        assert_eq!(sent[0].media_type, "image");
        assert_eq!(sent[0].url, "https://img.example/a.png");
    }

    #[tokio::test]
    async fn test_send_image_failure() {
        let messenger = Arc::new(RecordingMessenger::failing());
        let ctx = context_with(config_for("http://127.0.0.1:9"), messenger);

        let result = SendImageTool::execute(
            params(json!({"number": "628111", "image_url": "u", "caption": "c"})),
            &ctx,
        )
        .await;

        assert!(!result.success);
        assert_eq!(result.summary, "Gagal mengirim gambar ke WhatsApp");
        assert!(result.error.unwrap().contains("connection refused"));
    }
}

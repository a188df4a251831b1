//! Outbound messaging.
//!
//! The [`Messenger`] trait is the seam between tools and the WhatsApp
//! gateway. Tools hold an `Arc<dyn Messenger>` so tests can substitute a
//! recording double.

mod gateway;

pub use gateway::WaGateway;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::core::client::ApiResult;

/// Media type sent for images.
pub const MEDIA_IMAGE: &str = "image";

/// A media message to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaMessage {
    pub number: String,
    pub url: String,
    pub caption: String,
    pub media_type: String,
}

impl MediaMessage {
    /// An image with a caption.
    pub fn image(
        number: impl Into<String>,
        url: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            url: url.into(),
            caption: caption.into(),
            media_type: MEDIA_IMAGE.to_string(),
        }
    }
}

/// Delivers messages to a phone number.
///
/// Implementations return the gateway's response body; delivery is
/// best-effort and not confirmed beyond the HTTP status.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a text message.
    async fn send_text(&self, number: &str, message: &str) -> ApiResult<Value>;

    /// Send a media message.
    async fn send_media(&self, media: &MediaMessage) -> ApiResult<Value>;
}

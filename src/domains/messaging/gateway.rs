use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{MediaMessage, Messenger};
use crate::core::client::{ApiClient, ApiError, ApiResult};
use crate::core::config::MessagingConfig;

#[derive(Serialize)]
struct TextPayload<'a> {
    api_key: &'a str,
    sender: &'a str,
    number: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct MediaPayload<'a> {
    api_key: &'a str,
    sender: &'a str,
    number: &'a str,
    url: &'a str,
    caption: &'a str,
    media_type: &'a str,
}

/// WhatsApp gateway client.
///
/// Text and media go to separate endpoints; both authenticate with the
/// API key in the JSON body.
#[derive(Debug, Clone)]
pub struct WaGateway {
    client: ApiClient,
    config: MessagingConfig,
}

impl WaGateway {
    pub fn new(client: ApiClient, config: MessagingConfig) -> Self {
        Self { client, config }
    }

    fn api_key(&self) -> ApiResult<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or(ApiError::NotConfigured("WhatsApp gateway API key"))
    }
}

#[async_trait]
impl Messenger for WaGateway {
    async fn send_text(&self, number: &str, message: &str) -> ApiResult<Value> {
        let payload = TextPayload {
            api_key: self.api_key()?,
            sender: &self.config.sender,
            number,
            message,
        };

        info!("Sending WhatsApp text to {}", number);
        let response = self
            .client
            .post_json(&self.config.text_endpoint, &payload, self.config.timeout())
            .await?;
        debug!("Gateway response: {}", response);
        Ok(response)
    }

    async fn send_media(&self, media: &MediaMessage) -> ApiResult<Value> {
        let payload = MediaPayload {
            api_key: self.api_key()?,
            sender: &self.config.sender,
            number: &media.number,
            url: &media.url,
            caption: &media.caption,
            media_type: &media.media_type,
        };

        info!("Sending WhatsApp {} to {}", media.media_type, media.number);
        let response = self
            .client
            .post_json(&self.config.media_endpoint, &payload, self.config.timeout())
            .await?;
        debug!("Gateway response: {}", response);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::HttpClientConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway(server: &MockServer, api_key: Option<&str>) -> WaGateway {
        let config = MessagingConfig {
            text_endpoint: format!("{}/send-message", server.uri()),
            media_endpoint: format!("{}/send-media", server.uri()),
            api_key: api_key.map(str::to_string),
            sender: "628000".to_string(),
            owner_number: "628999".to_string(),
            timeout_ms: 2_000,
        };
        WaGateway::new(ApiClient::new(&HttpClientConfig::default()).unwrap(), config)
    }

    #[tokio::test]
    async fn test_send_text_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-message"))
            .and(body_json(json!({
                "api_key": "secret",
                "sender": "628000",
                "number": "628111",
                "message": "halo"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
            .expect(1)
            .mount(&server)
            .await;

        let response = gateway(&server, Some("secret"))
            .send_text("628111", "halo")
            .await
            .unwrap();
        assert_eq!(response, json!({"status": true}));
    }

    #[tokio::test]
    async fn test_send_media_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-media"))
            .and(body_json(json!({
                "api_key": "secret",
                "sender": "628000",
                "number": "628111",
                "url": "https://img.example/a.png",
                "caption": "lihat",
                "media_type": "image"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let media = MediaMessage::image("628111", "https://img.example/a.png", "lihat");
        let response = gateway(&server, Some("secret"))
            .send_media(&media)
            .await
            .unwrap();
        assert_eq!(response, Value::String("ok".to_string()));
    }

    #[tokio::test]
    async fn test_missing_api_key_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = gateway(&server, None)
            .send_text("628111", "halo")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_gateway_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = gateway(&server, Some("secret"))
            .send_text("628111", "halo")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }
}

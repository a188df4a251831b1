use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::Embedder;
use crate::core::client::{ApiClient, ApiError, ApiResult};
use crate::core::config::VectorConfig;

const TASK_TYPE: &str = "RETRIEVAL_QUERY";

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    model: &'a str,
    content: Content<'a>,
    task_type: &'a str,
}

/// Gemini `embedContent` client.
#[derive(Debug, Clone)]
pub struct GeminiEmbedder {
    client: ApiClient,
    config: VectorConfig,
}

impl GeminiEmbedder {
    pub fn new(client: ApiClient, config: VectorConfig) -> Self {
        Self { client, config }
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:embedContent",
            self.config.embedding_api_url.trim_end_matches('/'),
            self.config.embedding_model
        )
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str) -> ApiResult<Vec<f32>> {
        let api_key = self
            .config
            .gemini_api_key
            .as_deref()
            .ok_or(ApiError::NotConfigured("Gemini API key"))?;

        let url = self.url();
        let request = EmbedRequest {
            model: &self.config.embedding_model,
            content: Content {
                parts: [Part { text }],
            },
            task_type: TASK_TYPE,
        };

        let response = self
            .client
            .post_json_with_headers(
                &url,
                &request,
                &[("x-goog-api-key", api_key)],
                self.config.timeout(),
            )
            .await?;

        let values = response
            .pointer("/embedding/values")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ApiError::decode(&url, "missing embedding.values"))?;

        let vector = values
            .iter()
            .map(|v| v.as_f64().map(|f| f as f32))
            .collect::<Option<Vec<f32>>>()
            .ok_or_else(|| ApiError::decode(&url, "non-numeric embedding value"))?;

        debug!("Embedding has {} dimensions", vector.len());
        Ok(vector)
    }
}

//! Test doubles and wiring for tool tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::context::ToolContext;
use crate::core::client::{ApiError, ApiResult};
use crate::core::config::Config;
use crate::domains::messaging::{MediaMessage, Messenger};
use crate::domains::retrieval::{Embedder, ScoredDocument, VectorIndex};

/// Messenger that records every call.
#[derive(Default)]
pub struct RecordingMessenger {
    pub texts: Mutex<Vec<(String, String)>>,
    pub media: Mutex<Vec<MediaMessage>>,
    pub fail: bool,
}

impl RecordingMessenger {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<(String, String)> {
        self.texts.lock().unwrap().clone()
    }

    pub fn media(&self) -> Vec<MediaMessage> {
        self.media.lock().unwrap().clone()
    }

    fn outcome(&self) -> ApiResult<Value> {
        if self.fail {
            Err(ApiError::Connect {
                url: "gateway".to_string(),
                message: "connection refused".to_string(),
            })
        } else {
            Ok(json!({"status": true}))
        }
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, number: &str, message: &str) -> ApiResult<Value> {
        self.texts
            .lock()
            .unwrap()
            .push((number.to_string(), message.to_string()));
        self.outcome()
    }

    async fn send_media(&self, media: &MediaMessage) -> ApiResult<Value> {
        self.media.lock().unwrap().push(media.clone());
        self.outcome()
    }
}

/// Embedder returning a fixed vector.
#[derive(Default)]
pub struct StubEmbedder {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl StubEmbedder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, _text: &str) -> ApiResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ApiError::NotConfigured("Gemini API key"));
        }
        Ok(vec![0.1, 0.2, 0.3])
    }
}

/// Index returning canned documents, truncated to `top_k`.
#[derive(Default)]
pub struct StubIndex {
    pub documents: Vec<ScoredDocument>,
    pub requested_top_k: Mutex<Option<usize>>,
}

impl StubIndex {
    pub fn with_documents(documents: Vec<ScoredDocument>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }
}

#[async_trait]
impl VectorIndex for StubIndex {
    async fn search(&self, _vector: &[f32], top_k: usize) -> ApiResult<Vec<ScoredDocument>> {
        *self.requested_top_k.lock().unwrap() = Some(top_k);
        Ok(self.documents.iter().take(top_k).cloned().collect())
    }
}

/// Configuration pointing every upstream at `base` (a mock server URI).
pub fn config_for(base: &str) -> Config {
    let mut config = Config::default();
    config.store.order_api_url = format!("{}/api/payment/", base);
    config.store.catalog_api_url = format!("{}/api/katalog/", base);
    config.store.timeout_ms = 500;
    config.messaging.text_endpoint = format!("{}/send-message", base);
    config.messaging.media_endpoint = format!("{}/send-media", base);
    config.messaging.api_key = Some("test-key".to_string());
    config.messaging.owner_number = "6280000".to_string();
    config.messaging.timeout_ms = 500;
    config.toram.api_base_url = format!("{}/api/v1", base);
    config.toram.item_timeout_ms = 500;
    config.toram.timeout_ms = 500;
    config.libgen.default_mirror = base.to_string();
    config.libgen.search_timeout_ms = 500;
    config.libgen.link_timeout_ms = 500;
    config.vector.timeout_ms = 500;
    config
}

/// Context over `config` with a recording messenger swapped in.
pub fn context_with(config: Config, messenger: Arc<RecordingMessenger>) -> ToolContext {
    ToolContext::from_config(Arc::new(config))
        .unwrap()
        .with_messenger(messenger)
}

/// Context over `config` with the production collaborators.
pub fn context(config: Config) -> ToolContext {
    ToolContext::from_config(Arc::new(config)).unwrap()
}

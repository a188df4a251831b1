//! Shared dependencies handed to every tool call.

use std::sync::Arc;

use crate::core::client::{ApiClient, ApiResult};
use crate::core::config::Config;
use crate::domains::messaging::{Messenger, WaGateway};
use crate::domains::retrieval::{Embedder, GeminiEmbedder, MilvusIndex, VectorIndex};

/// Everything a tool needs: configuration, the shared HTTP client and the
/// messaging and retrieval collaborators.
///
/// Read-only after construction, so concurrent calls share it freely.
#[derive(Clone)]
pub struct ToolContext {
    pub config: Arc<Config>,
    pub client: ApiClient,
    pub messenger: Arc<dyn Messenger>,
    pub embedder: Arc<dyn Embedder>,
    pub index: Arc<dyn VectorIndex>,
}

impl ToolContext {
    /// Wire the production collaborators from configuration.
    pub fn from_config(config: Arc<Config>) -> ApiResult<Self> {
        let client = ApiClient::new(&config.http)?;
        let messenger = Arc::new(WaGateway::new(client.clone(), config.messaging.clone()));
        let embedder = Arc::new(GeminiEmbedder::new(client.clone(), config.vector.clone()));
        let index = Arc::new(MilvusIndex::new(client.clone(), config.vector.clone()));

        Ok(Self {
            config,
            client,
            messenger,
            embedder,
            index,
        })
    }

    /// Replace the messenger.
    pub fn with_messenger(mut self, messenger: Arc<dyn Messenger>) -> Self {
        self.messenger = messenger;
        self
    }

    /// Replace the embedder.
    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = embedder;
        self
    }

    /// Replace the vector index.
    pub fn with_index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = index;
        self
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

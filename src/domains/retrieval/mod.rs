//! Retrieval collaborators for vector search.
//!
//! A query is embedded by an [`Embedder`] and matched against a
//! [`VectorIndex`]. Both are acquired per call over the shared HTTP client;
//! no connection outlives a request.

mod gemini;
mod milvus;

pub use gemini::GeminiEmbedder;
pub use milvus::MilvusIndex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::client::ApiResult;

/// Generates text embeddings.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single query string.
    async fn embed(&self, text: &str) -> ApiResult<Vec<f32>>;
}

/// Nearest-neighbour search over stored documents.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return at most `top_k` documents, best match first.
    async fn search(&self, vector: &[f32], top_k: usize) -> ApiResult<Vec<ScoredDocument>>;
}

/// A document returned by a similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: String,
    pub text: String,
    pub source_file: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub score: f32,
}

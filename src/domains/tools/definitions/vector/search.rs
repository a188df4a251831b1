//! Vector search tool: embed the query, then ask the index for neighbours.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::domains::tools::definitions::common::validate_limit;
use crate::domains::tools::{ToolContext, ToolDefinition, ToolError, ToolResult};

/// Parameters for vector search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchVectorParams {
    #[schemars(description = "Natural-language query")]
    pub query: String,

    #[schemars(description = "Number of references to return (default: 5, max: 100)")]
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// Vector search tool.
pub struct SearchVectorTool;

#[async_trait]
impl ToolDefinition for SearchVectorTool {
    const NAME: &'static str = "search_vector_db";

    const DESCRIPTION: &'static str = "Search reference documents in the vector database by semantic similarity. Returns the best matching passages with source file, type and score.";

    type Params = SearchVectorParams;

    fn connect_failure(_ctx: &ToolContext) -> String {
        "Gagal melakukan pencarian di vector database".to_string()
    }

    #[instrument(skip_all, fields(query = %params.query))]
    async fn run(params: SearchVectorParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let query = params.query.trim();
        info!("Vector search tool called for: {}", query);

        if query.is_empty() {
            return Err(ToolError::validation("Query tidak boleh kosong."));
        }

        let top_k = validate_limit(params.top_k.unwrap_or(ctx.config.vector.default_top_k));
        let embedding = ctx.embedder.embed(query).await?;
        debug!("Query embedded into {} dimensions", embedding.len());

        let results = ctx.index.search(&embedding, top_k).await?;
        if results.is_empty() {
            return Err(ToolError::not_found(format!(
                "Tidak ada referensi ditemukan untuk query: {}",
                query
            )));
        }

        Ok(ToolResult::success(
            format!("{} hasil ditemukan untuk query: {}", results.len(), query),
            json!({
                "query": query,
                "results": results,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::retrieval::ScoredDocument;
    use crate::domains::tools::testing::{StubEmbedder, StubIndex, config_for, context};
    use std::sync::Arc;

    fn document(id: &str, score: f32) -> ScoredDocument {
        ScoredDocument {
            id: id.to_string(),
            text: format!("isi {}", id),
            source_file: "panduan.pdf".to_string(),
            kind: "text".to_string(),
            score,
        }
    }

    fn ctx_with(embedder: Arc<StubEmbedder>, index: Arc<StubIndex>) -> ToolContext {
        context(config_for("http://127.0.0.1:9"))
            .with_embedder(embedder)
            .with_index(index)
    }

    fn params(query: &str, top_k: Option<usize>) -> SearchVectorParams {
        SearchVectorParams {
            query: query.to_string(),
            top_k,
        }
    }

    #[tokio::test]
    async fn test_vector_search_results() {
        let index = Arc::new(StubIndex::with_documents(vec![
            document("a", 0.9),
            document("b", 0.8),
            document("c", 0.7),
        ]));
        let embedder = Arc::new(StubEmbedder::default());
        let ctx = ctx_with(embedder.clone(), index.clone());

        let result = SearchVectorTool::execute(params("cara refund", Some(2)), &ctx).await;

        assert!(result.success);
        assert_eq!(result.summary, "2 hasil ditemukan untuk query: cara refund");
        let data = result.data.unwrap();
        assert_eq!(data["results"][0]["id"], "a");
        assert_eq!(data["results"][1]["type"], "text");
        assert_eq!(embedder.calls(), 1);
        assert_eq!(*index.requested_top_k.lock().unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_default_top_k() {
        let index = Arc::new(StubIndex::default());
        let ctx = ctx_with(Arc::new(StubEmbedder::default()), index.clone());

        let result = SearchVectorTool::execute(params("x", None), &ctx).await;

        assert!(!result.success);
        assert_eq!(result.summary, "Tidak ada referensi ditemukan untuk query: x");
        assert!(result.error.is_none());
        assert_eq!(*index.requested_top_k.lock().unwrap(), Some(5));
    }

    #[tokio::test]
    async fn test_embedding_failure() {
        let embedder = Arc::new(StubEmbedder {
            fail: true,
            ..StubEmbedder::default()
        });
        let index = Arc::new(StubIndex::with_documents(vec![document("a", 1.0)]));
        let ctx = ctx_with(embedder, index.clone());

        let result = SearchVectorTool::execute(params("x", None), &ctx).await;

        assert!(!result.success);
        assert_eq!(result.summary, "Gagal melakukan pencarian di vector database");
        assert!(result.error.unwrap().contains("not configured"));
        assert_eq!(*index.requested_top_k.lock().unwrap(), None);
    }
}

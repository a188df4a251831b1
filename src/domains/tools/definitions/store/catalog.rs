//! Catalog lookup by numeric id.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::core::client::ApiClient;
use crate::domains::normalizer::{Fallback, Field, RecordShape, is_truthy, normalize_single};
use crate::domains::tools::{ToolContext, ToolDefinition, ToolError, ToolResult};

const CATALOG: RecordShape = RecordShape {
    kind: "catalog",
    fields: &[
        Field::at("id", &["id"]).or(Fallback::Null),
        Field::at("title", &["title"]),
        Field::at("price", &["price"]),
        Field::at("category", &["category"]),
        Field::at("description", &["description"]).or(Fallback::Null),
    ],
    line: "Katalog *{title}* seharga *Rp{price}* (Kategori: {category})",
};

/// Parameters for the catalog tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CatalogParams {
    /// Catalog entry id.
    #[schemars(description = "Numeric catalog ID")]
    pub katalog_id: i64,
}

/// Catalog lookup tool.
pub struct CatalogTool;

#[async_trait]
impl ToolDefinition for CatalogTool {
    const NAME: &'static str = "get_katalog_by_id";

    const DESCRIPTION: &'static str =
        "Get a store catalog entry (title, price, category, description) by its numeric ID.";

    type Params = CatalogParams;

    fn connect_failure(_ctx: &ToolContext) -> String {
        "Gagal konek ke API katalog".to_string()
    }

    #[instrument(skip_all, fields(katalog_id = params.katalog_id))]
    async fn run(params: CatalogParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let id = params.katalog_id;
        info!("Catalog tool called for: {}", id);

        let store = &ctx.config.store;
        let url = ApiClient::endpoint(&store.catalog_api_url, &id.to_string())?;
        let payload = ctx.client.get_json(url.as_str(), store.timeout()).await?;

        if !payload.get("id").is_some_and(is_truthy) {
            return Err(ToolError::not_found(format!(
                "Katalog ID {} tidak ditemukan.",
                id
            )));
        }

        let normalized = normalize_single(&payload, &CATALOG);
        Ok(ToolResult::success(
            normalized.line,
            Value::Object(normalized.record),
        ))
    }
}

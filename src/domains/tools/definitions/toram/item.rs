//! Item search.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

use super::Resource;
use crate::domains::normalizer::{Fallback, Field, RecordShape, Source};
use crate::domains::tools::{ToolContext, ToolDefinition, ToolError, ToolResult};

const ITEM: RecordShape = RecordShape {
    kind: "item",
    fields: &[
        Field::at("name_id", &["name_id"]),
        Field::at("name_en", &["name_en"]),
        Field::at("rarity", &["rarity"]),
        Field::at("sell_price", &["sell_price"]),
        Field::at("proc_to", &["proc_to"]),
        Field::new(
            "amount_price",
            Source::Suffixed {
                path: &["amount_price"],
                suffix: " pt",
            },
        )
        .or(Fallback::Empty),
        Field::new(
            "dropped_by",
            Source::NameList {
                list: "dropped_by",
                names: &["name_id"],
            },
        ),
        Field::at("slug", &["slug"]).or(Fallback::Empty),
        Field::new("link", Source::Template("{site}/item/{slug}")),
    ],
    line: "{name_id} ({name_en}) | Rarity: {rarity} | Harga: {sell_price} Spina | Proses: {proc_to} {amount_price} | Drop: {dropped_by} | Link: {link}",
};

const RESOURCE: Resource = Resource {
    path: "item",
    label: "Item",
    listing: "items/all",
    shape: &ITEM,
};

/// Parameters for item search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchItemParams {
    #[schemars(description = "Item name to search for")]
    pub item_name: String,
}

/// Item search tool.
pub struct SearchItemTool;

#[async_trait]
impl ToolDefinition for SearchItemTool {
    const NAME: &'static str = "search_item";

    const DESCRIPTION: &'static str = "Search Toram Online items on Torampedia by name. Returns rarity, sell price, processing value, drop sources and a link per item.";

    type Params = SearchItemParams;

    fn connect_failure(ctx: &ToolContext) -> String {
        RESOURCE.connect_failure(ctx)
    }

    #[instrument(skip_all, fields(item_name = %params.item_name))]
    async fn run(params: SearchItemParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        info!("Item search tool called for: {}", params.item_name);
        let timeout = Duration::from_millis(ctx.config.toram.item_timeout_ms);
        RESOURCE.search(ctx, params.item_name.trim(), timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{config_for, context};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(name: &str) -> SearchItemParams {
        SearchItemParams {
            item_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_item_lines() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/item/pedang"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "name_id": "Pedang Api",
                        "name_en": "Fire Sword",
                        "rarity": "Rare",
                        "sell_price": 500,
                        "proc_to": "Metal",
                        "amount_price": 12,
                        "slug": "fire-sword",
                        "dropped_by": [{"name_id": "Naga"}, {"name_en": "Only English"}]
                    },
                    {"name_id": "Batu", "amount_price": 0, "dropped_by": []}
                ]
            })))
            .mount(&server)
            .await;
        let ctx = context(config_for(&server.uri()));

        let result = SearchItemTool::execute(params("pedang"), &ctx).await;

        assert!(result.success);
        let lines: Vec<&str> = result.summary.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Pedang Api (Fire Sword) | Rarity: Rare | Harga: 500 Spina | Proses: Metal 12 pt | Drop: Naga, Unknown | Link: https://torampedia.my.id/item/fire-sword"
        );
        assert_eq!(
            lines[1],
            "Batu (N/A) | Rarity: N/A | Harga: N/A Spina | Proses: N/A  | Drop: N/A | Link: https://torampedia.my.id/item/"
        );
        assert_eq!(result.data.unwrap().as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_item_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;
        let ctx = context(config_for(&server.uri()));

        let result = SearchItemTool::execute(params("xyz"), &ctx).await;

        assert!(!result.success);
        assert_eq!(result.summary, "Item 'xyz' tidak ditemukan di Torampedia.");
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_item_upstream_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;
        let ctx = context(config_for(&server.uri()));

        let result = SearchItemTool::execute(params("pedang"), &ctx).await;

        assert!(!result.success);
        assert_eq!(
            result.summary,
            "Gagal konek ke API Torampedia. Coba akses manual di https://torampedia.my.id/items/all"
        );
        assert!(result.error.is_some());
    }
}

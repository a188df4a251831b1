//! Monster search.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

use super::Resource;
use crate::domains::normalizer::{Fallback, Field, RecordShape, Source};
use crate::domains::tools::{ToolContext, ToolDefinition, ToolError, ToolResult};

const MONSTER: RecordShape = RecordShape {
    kind: "monster",
    fields: &[
        Field::at("name_id", &["name_id"]),
        Field::at("name_en", &["name_en"]),
        Field::at("level", &["level"]),
        Field::at("element", &["element"]),
        Field::at("exp", &["exp"]).or(Fallback::Zero),
        Field::at("hp", &["hp"]).or(Fallback::Zero),
        Field::new(
            "map",
            Source::FirstOf(&[&["map", "name_en"], &["map", "name_id"]]),
        ),
        Field::new(
            "drops",
            Source::NameList {
                list: "items",
                names: &["name_en", "name_id"],
            },
        ),
        Field::at("id", &["id"]).or(Fallback::Empty),
        Field::new("link", Source::Template("{site}/monster/{id}")),
    ],
    line: "{name_id} ({name_en}) | Lv: {level} | Elemen: {element} | Exp: {exp} | HP: {hp} | Lokasi: {map} | Drop: {drops} | Link: {link}",
};

const RESOURCE: Resource = Resource {
    path: "monster",
    label: "Monster",
    listing: "monsters/all",
    shape: &MONSTER,
};

/// Parameters for monster search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchMonsterParams {
    #[schemars(description = "Monster name to search for")]
    pub monster_name: String,
}

/// Monster search tool.
pub struct SearchMonsterTool;

#[async_trait]
impl ToolDefinition for SearchMonsterTool {
    const NAME: &'static str = "search_monster";

    const DESCRIPTION: &'static str = "Search Toram Online monsters on Torampedia by name. Returns level, element, EXP, HP, location, drops and a link per monster.";

    type Params = SearchMonsterParams;

    fn connect_failure(ctx: &ToolContext) -> String {
        RESOURCE.connect_failure(ctx)
    }

    #[instrument(skip_all, fields(monster_name = %params.monster_name))]
    async fn run(params: SearchMonsterParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        info!("Monster search tool called for: {}", params.monster_name);
        let timeout = Duration::from_millis(ctx.config.toram.timeout_ms);
        RESOURCE.search(ctx, params.monster_name.trim(), timeout).await
    }
}

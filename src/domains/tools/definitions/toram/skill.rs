//! Skill search. The only tool whose query is validated before the call.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

use super::Resource;
use crate::core::security::validate_query;
use crate::domains::normalizer::{Fallback, Field, RecordShape, Source};
use crate::domains::tools::{ToolContext, ToolDefinition, ToolError, ToolResult};

const SKILL: RecordShape = RecordShape {
    kind: "skill",
    fields: &[
        Field::at("id", &["id"]).or(Fallback::Null),
        Field::at("name_id", &["name_id"]),
        Field::at("name_en", &["name_en"]),
        Field::at("type", &["type"]),
        Field::at("mp", &["mp"]),
        Field::new(
            "combo",
            Source::Flags(&[("combo_start", "Start"), ("combo_mid", "Mid")]),
        ),
        Field::at("element", &["element"]),
        Field::at("range", &["range"]),
        Field::at("tier", &["tier"]),
        Field::at("description", &["desc_id"]),
        Field::at("info", &["info"]),
        Field::at("weapon", &["weapon"]).or(Fallback::EmptyList),
        Field::at("parent_id", &["parent", "id"]).or(Fallback::Empty),
        Field::at("parent_name_id", &["parent", "name_id"]),
        Field::at("parent_name_en", &["parent", "name_en"]),
        Field::new("link", Source::Template("{site}/skills/{parent_id}")),
    ],
    line: "{name_id} ({name_en}) | Tipe: {type} | MP: {mp} | Range: {range}m | Elemen: {element} | Tier: {tier} | Combo: {combo} | Deskripsi: {description} | Info: {info} | Kategori: {parent_name_id} ({parent_name_en}) | Link: {link}",
};

const RESOURCE: Resource = Resource {
    path: "skill",
    label: "Skill",
    listing: "others/skill",
    shape: &SKILL,
};

/// Parameters for skill search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchSkillParams {
    #[schemars(
        description = "Skill name or keyword (max 50 chars: letters, digits, spaces, '-')"
    )]
    pub query: String,
}

/// Skill search tool.
pub struct SearchSkillTool;

#[async_trait]
impl ToolDefinition for SearchSkillTool {
    const NAME: &'static str = "search_skill";

    const DESCRIPTION: &'static str = "Search Toram Online skills on Torampedia by name or keyword. Returns type, MP, range, element, tier, combo position, description and skill tree per skill.";

    type Params = SearchSkillParams;

    fn connect_failure(ctx: &ToolContext) -> String {
        RESOURCE.connect_failure(ctx)
    }

    #[instrument(skip_all, fields(query = %params.query))]
    async fn run(params: SearchSkillParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let query = validate_query(&params.query)?;
        info!("Skill search tool called for: {}", query);
        let timeout = Duration::from_millis(ctx.config.toram.timeout_ms);
        RESOURCE.search(ctx, query, timeout).await
    }
}

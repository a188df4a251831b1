//! Torampedia game-data search: items, monsters and skills.
//!
//! All three hit `GET {api_base}/{resource}/{query}`, which answers
//! `{ "data": [...] }`. An empty list is "not found", not an error.

mod item;
mod monster;
mod skill;

pub use item::{SearchItemParams, SearchItemTool};
pub use monster::{SearchMonsterParams, SearchMonsterTool};
pub use skill::{SearchSkillParams, SearchSkillTool};

use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::core::client::ApiClient;
use crate::domains::normalizer::{Normalizer, RecordShape, data_list};
use crate::domains::tools::{ToolContext, ToolError, ToolResult};

/// One searchable Torampedia resource.
struct Resource {
    /// API path segment (`item`, `monster`, `skill`).
    path: &'static str,
    /// Display label used in the not-found summary.
    label: &'static str,
    /// Site page listing everything, offered when the API is down.
    listing: &'static str,
    shape: &'static RecordShape,
}

impl Resource {
    fn connect_failure(&self, ctx: &ToolContext) -> String {
        format!(
            "Gagal konek ke API Torampedia. Coba akses manual di {}/{}",
            site(ctx),
            self.listing
        )
    }

    async fn search(
        &self,
        ctx: &ToolContext,
        query: &str,
        timeout: Duration,
    ) -> Result<ToolResult, ToolError> {
        let base = format!(
            "{}/{}",
            ctx.config.toram.api_base_url.trim_end_matches('/'),
            self.path
        );
        let url = ApiClient::endpoint(&base, query)?;
        let payload = ctx.client.get_json(url.as_str(), timeout).await?;

        let set = Normalizer::new(self.shape)
            .with_var("site", site(ctx))
            .collection(data_list(&payload));

        if set.is_empty() {
            return Err(ToolError::not_found(format!(
                "{} '{}' tidak ditemukan di Torampedia.",
                self.label, query
            )));
        }

        info!("Found {} {} entries for '{}'", set.len(), self.path, query);
        let records = set.records.into_iter().map(Value::Object).collect();
        Ok(ToolResult::success(set.summary, Value::Array(records)))
    }
}

fn site(ctx: &ToolContext) -> &str {
    ctx.config.toram.site_url.trim_end_matches('/')
}

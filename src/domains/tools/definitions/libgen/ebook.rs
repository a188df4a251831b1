//! Ebook search tool.
//!
//! Three steps against one mirror: scrape edition ids from the search page,
//! fetch their metadata from `json.php`, then resolve a download link per
//! result from its `ads.php` page. A failed link lookup degrades that one
//! result; it never fails the search.

use async_trait::async_trait;
use reqwest::Url;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::scrape::{download_href, edition_ids};
use crate::core::client::ApiError;
use crate::domains::normalizer::{Fallback, Field, NOT_AVAILABLE, RecordShape, normalize_collection};
use crate::domains::tools::definitions::common::validate_limit;
use crate::domains::tools::{ToolContext, ToolDefinition, ToolError, ToolResult};

const EBOOK: RecordShape = RecordShape {
    kind: "ebook",
    fields: &[
        Field::at("title", &["title"]),
        Field::at("author", &["author"]),
        Field::at("publisher", &["publisher"]),
        Field::at("year", &["year"]),
        Field::at("pages", &["pages"]),
        Field::at("lang", &["language"]),
        Field::at("md5", &["md5"]).or(Fallback::Null),
        Field::at("download", &["download"]),
    ],
    line: "{title} | {author} | {year} | {download}",
};

/// Parameters for ebook search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchEbookParams {
    #[schemars(description = "Title or keywords")]
    pub query: String,

    #[schemars(description = "Libgen mirror base URL (default: https://libgen.li)")]
    #[serde(default)]
    pub mirror: Option<String>,

    #[schemars(description = "Maximum number of results (default: 5, max: 100)")]
    #[serde(default)]
    pub count: Option<usize>,
}

/// Ebook search tool.
pub struct SearchEbookTool;

impl SearchEbookTool {
    fn mirror(params: &SearchEbookParams, ctx: &ToolContext) -> Result<String, ToolError> {
        let mirror = params
            .mirror
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&ctx.config.libgen.default_mirror)
            .trim_end_matches('/')
            .to_string();

        match Url::parse(&mirror) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(mirror),
            _ => Err(ToolError::validation(format!(
                "Mirror tidak valid: '{}'. Gunakan URL http(s).",
                mirror
            ))),
        }
    }

    fn search_url(mirror: &str, query: &str, count: usize) -> Result<String, ToolError> {
        let count = count.to_string();
        let params = [
            ("req", query),
            ("res", count.as_str()),
            ("view", "detailed"),
            ("column", "def"),
        ];
        let encoded = serde_urlencoded::to_string(params)
            .map_err(|e| ApiError::invalid_url(mirror, e.to_string()))?;
        Ok(format!("{}/index.php?{}", mirror, encoded))
    }

    /// Records of a `json.php` payload, in search order.
    ///
    /// The API answers either an array or an object keyed by edition id.
    fn records(payload: Value, ids: &[String]) -> Vec<Value> {
        match payload {
            Value::Array(items) => items,
            Value::Object(mut map) => ids.iter().filter_map(|id| map.remove(id)).collect(),
            _ => Vec::new(),
        }
    }

    fn ads_url(mirror: &str, md5: &str) -> Result<String, ApiError> {
        let encoded = serde_urlencoded::to_string([("md5", md5)])
            .map_err(|e| ApiError::invalid_url(mirror, e.to_string()))?;
        Ok(format!("{}/ads.php?{}", mirror, encoded))
    }

    async fn download_link(ctx: &ToolContext, mirror: &str, md5: &str) -> String {
        let timeout = Duration::from_millis(ctx.config.libgen.link_timeout_ms);
        let page = match Self::ads_url(mirror, md5) {
            Ok(url) => ctx.client.get_text(&url, timeout).await,
            Err(e) => Err(e),
        };

        match page {
            Ok(html) => match download_href(&html) {
                Some(href) => format!("{}/{}", mirror, href),
                None => format!("Tidak ada link download (MD5={})", md5),
            },
            Err(e) => {
                warn!("Download link lookup failed for {}: {}", md5, e);
                format!("Error ambil link download: {}", e)
            }
        }
    }
}

#[async_trait]
impl ToolDefinition for SearchEbookTool {
    const NAME: &'static str = "search_ebook";

    const DESCRIPTION: &'static str = "Search ebooks on Library Genesis by title or keywords. Returns title, author, publisher, year, pages, language, MD5 and a download link per result.";

    type Params = SearchEbookParams;

    fn connect_failure(_ctx: &ToolContext) -> String {
        "Gagal konek ke Libgen".to_string()
    }

    #[instrument(skip_all, fields(query = %params.query))]
    async fn run(params: SearchEbookParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let query = params.query.trim();
        info!("Ebook search tool called for: {}", query);

        let not_found = || ToolError::not_found(format!("Tidak ada hasil untuk '{}'", query));
        if query.is_empty() {
            return Err(not_found());
        }

        let mirror = Self::mirror(&params, ctx)?;
        let count = validate_limit(params.count.unwrap_or(ctx.config.libgen.default_count));
        let timeout = Duration::from_millis(ctx.config.libgen.search_timeout_ms);

        let page = ctx
            .client
            .get_text(&Self::search_url(&mirror, query, count)?, timeout)
            .await?;
        let ids = edition_ids(&page, count);
        debug!("Found {} edition ids", ids.len());
        if ids.is_empty() {
            return Err(not_found());
        }

        let json_url = format!(
            "{}/json.php?object=e&addkeys=*&ids={}",
            mirror,
            ids.join(",")
        );
        let payload = ctx.client.get_json(&json_url, timeout).await?;

        let mut records = Vec::new();
        for mut record in Self::records(payload, &ids) {
            let Some(map) = record.as_object_mut() else {
                continue;
            };
            let md5 = map
                .get("md5")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            let download = match md5 {
                Some(md5) => Self::download_link(ctx, &mirror, &md5).await,
                None => NOT_AVAILABLE.to_string(),
            };
            map.insert("download".to_string(), Value::String(download));
            records.push(record);
        }

        let set = normalize_collection(&records, &EBOOK);
        if set.is_empty() {
            return Err(not_found());
        }

        info!("Found {} ebooks for '{}'", set.len(), query);
        let data = set.records.into_iter().map(Value::Object).collect();
        Ok(ToolResult::success(set.summary, Value::Array(data)))
    }
}

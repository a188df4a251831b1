//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! defaults, an optional `.env` file, and `MCP_*` environment variables.
//! Every collaborator (store API, messaging gateway, game-data API, ebook
//! mirror, vector search) receives its section explicitly at construction.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Shared outbound HTTP client settings.
    pub http: HttpClientConfig,

    /// Store order and catalog API.
    pub store: StoreConfig,

    /// WhatsApp gateway used for owner alerts and media delivery.
    pub messaging: MessagingConfig,

    /// Torampedia game-data API.
    pub toram: ToramConfig,

    /// Library Genesis ebook search.
    pub libgen: LibgenConfig,

    /// Embedding generation and vector index.
    pub vector: VectorConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// User-Agent header sent to every upstream API.
    ///
    /// Several upstream sites reject non-browser agents.
    pub user_agent: String,
}

/// Store backend endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the order lookup API; the order id is appended.
    pub order_api_url: String,

    /// Base URL of the catalog API; the catalog id is appended.
    pub catalog_api_url: String,

    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
}

/// WhatsApp gateway configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Endpoint for text messages.
    pub text_endpoint: String,

    /// Endpoint for media messages.
    pub media_endpoint: String,

    /// Gateway API key. Messaging tools fail cleanly while unset.
    pub api_key: Option<String>,

    /// Registered sender number.
    pub sender: String,

    /// Human operator receiving order alerts.
    pub owner_number: String,

    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for MessagingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingConfig")
            .field("text_endpoint", &self.text_endpoint)
            .field("media_endpoint", &self.media_endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("sender", &self.sender)
            .field("owner_number", &self.owner_number)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Torampedia API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToramConfig {
    /// Base of the JSON API (`{base}/item/{name}` etc.).
    pub api_base_url: String,

    /// Public site used to build result links.
    pub site_url: String,

    /// Timeout for item search, which is slower upstream.
    pub item_timeout_ms: u64,

    /// Timeout for monster and skill search.
    pub timeout_ms: u64,
}

/// Library Genesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibgenConfig {
    /// Mirror used when the caller does not name one.
    pub default_mirror: String,

    /// Result count used when the caller does not give one.
    pub default_count: usize,

    /// Timeout for the search page and the JSON lookup.
    pub search_timeout_ms: u64,

    /// Timeout for each download-link page.
    pub link_timeout_ms: u64,
}

/// Embedding and vector index configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct VectorConfig {
    /// Gemini API key for embedding generation.
    pub gemini_api_key: Option<String>,

    /// Base URL of the embedding API.
    pub embedding_api_url: String,

    /// Embedding model, e.g. `models/embedding-001`.
    pub embedding_model: String,

    /// Milvus REST endpoint.
    pub milvus_url: String,

    /// Optional Milvus bearer token (`user:password` or API key).
    pub milvus_token: Option<String>,

    /// Collection to search.
    pub collection: String,

    /// Vector field of the collection.
    pub anns_field: String,

    /// Similarity metric.
    pub metric_type: String,

    /// IVF probe count.
    pub nprobe: u32,

    /// Result count used when the caller does not give one.
    pub default_top_k: usize,

    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
}

impl std::fmt::Debug for VectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("embedding_api_url", &self.embedding_api_url)
            .field("embedding_model", &self.embedding_model)
            .field("milvus_url", &self.milvus_url)
            .field(
                "milvus_token",
                &self.milvus_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("collection", &self.collection)
            .field("anns_field", &self.anns_field)
            .field("metric_type", &self.metric_type)
            .field("nprobe", &self.nprobe)
            .field("default_top_k", &self.default_top_k)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            order_api_url: "https://revandastore.com/api/payment/".to_string(),
            catalog_api_url: "https://revandastore.com/api/katalog/".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl StoreConfig {
    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            text_endpoint: "https://revanetic.my.id/send-message".to_string(),
            media_endpoint: "https://revanetic.my.id/send-media".to_string(),
            api_key: None,
            sender: "6281539302056".to_string(),
            owner_number: "6285159199040".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl MessagingConfig {
    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ToramConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://torampedia.my.id/api/v1".to_string(),
            site_url: "https://torampedia.my.id".to_string(),
            item_timeout_ms: 15_000,
            timeout_ms: 10_000,
        }
    }
}

impl Default for LibgenConfig {
    fn default() -> Self {
        Self {
            default_mirror: "https://libgen.li".to_string(),
            default_count: 5,
            search_timeout_ms: 15_000,
            link_timeout_ms: 10_000,
        }
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            embedding_api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            embedding_model: "models/embedding-001".to_string(),
            milvus_url: "http://localhost:19530".to_string(),
            milvus_token: None,
            collection: "multi_modal_rag".to_string(),
            anns_field: "embedding".to_string(),
            metric_type: "IP".to_string(),
            nprobe: 10,
            default_top_k: 5,
            timeout_ms: 10_000,
        }
    }
}

impl VectorConfig {
    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "store-tools-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            http: HttpClientConfig::default(),
            store: StoreConfig::default(),
            messaging: MessagingConfig::default(),
            toram: ToramConfig::default(),
            libgen: LibgenConfig::default(),
            vector: VectorConfig::default(),
        }
    }
}

/// Read an environment variable, ignoring empty values.
pub(crate) fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse an environment variable, warning on unparsable values.
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env_string(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_WA_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(name) = env_string("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = env_string("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(timestamps) = env_parse("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Some(user_agent) = env_string("MCP_HTTP_USER_AGENT") {
            config.http.user_agent = user_agent;
        }

        config.load_store_env();
        config.load_messaging_env();
        config.load_toram_env();
        config.load_libgen_env();
        config.load_vector_env();

        config
    }

    fn load_store_env(&mut self) {
        if let Some(url) = env_string("MCP_ORDER_API_URL") {
            self.store.order_api_url = url;
        }
        if let Some(url) = env_string("MCP_CATALOG_API_URL") {
            self.store.catalog_api_url = url;
        }
        if let Some(timeout) = env_parse("MCP_STORE_TIMEOUT_MS") {
            self.store.timeout_ms = timeout;
        }
    }

    fn load_messaging_env(&mut self) {
        if let Some(endpoint) = env_string("MCP_WA_TEXT_ENDPOINT") {
            self.messaging.text_endpoint = endpoint;
        }
        if let Some(endpoint) = env_string("MCP_WA_MEDIA_ENDPOINT") {
            self.messaging.media_endpoint = endpoint;
        }
        if let Some(sender) = env_string("MCP_WA_SENDER") {
            self.messaging.sender = sender;
        }
        if let Some(owner) = env_string("MCP_WA_OWNER_NUMBER") {
            self.messaging.owner_number = owner;
        }
        if let Some(timeout) = env_parse("MCP_WA_TIMEOUT_MS") {
            self.messaging.timeout_ms = timeout;
        }

        if let Some(api_key) = env_string("MCP_WA_API_KEY") {
            self.messaging.api_key = Some(api_key);
            info!("WhatsApp gateway API key loaded from environment");
        } else {
            warn!(
                "MCP_WA_API_KEY not set - owner alerts and messaging tools \
                 will report the gateway as not configured"
            );
        }
    }

    fn load_toram_env(&mut self) {
        if let Some(url) = env_string("MCP_TORAM_API_URL") {
            self.toram.api_base_url = url;
        }
        if let Some(url) = env_string("MCP_TORAM_SITE_URL") {
            self.toram.site_url = url;
        }
        if let Some(timeout) = env_parse("MCP_TORAM_ITEM_TIMEOUT_MS") {
            self.toram.item_timeout_ms = timeout;
        }
        if let Some(timeout) = env_parse("MCP_TORAM_TIMEOUT_MS") {
            self.toram.timeout_ms = timeout;
        }
    }

    fn load_libgen_env(&mut self) {
        if let Some(mirror) = env_string("MCP_LIBGEN_MIRROR") {
            self.libgen.default_mirror = mirror;
        }
        if let Some(count) = env_parse("MCP_LIBGEN_COUNT") {
            self.libgen.default_count = count;
        }
        if let Some(timeout) = env_parse("MCP_LIBGEN_SEARCH_TIMEOUT_MS") {
            self.libgen.search_timeout_ms = timeout;
        }
        if let Some(timeout) = env_parse("MCP_LIBGEN_LINK_TIMEOUT_MS") {
            self.libgen.link_timeout_ms = timeout;
        }
    }

    fn load_vector_env(&mut self) {
        if let Some(key) = env_string("MCP_GEMINI_API_KEY") {
            self.vector.gemini_api_key = Some(key);
            info!("Gemini API key loaded from environment");
        } else {
            warn!("MCP_GEMINI_API_KEY not set - vector search is unavailable");
        }
        if let Some(url) = env_string("MCP_EMBEDDING_API_URL") {
            self.vector.embedding_api_url = url;
        }
        if let Some(model) = env_string("MCP_EMBEDDING_MODEL") {
            self.vector.embedding_model = model;
        }
        if let Some(url) = env_string("MCP_MILVUS_URL") {
            self.vector.milvus_url = url;
        }
        if let Some(token) = env_string("MCP_MILVUS_TOKEN") {
            self.vector.milvus_token = Some(token);
        }
        if let Some(collection) = env_string("MCP_MILVUS_COLLECTION") {
            self.vector.collection = collection;
        }
        if let Some(field) = env_string("MCP_MILVUS_ANNS_FIELD") {
            self.vector.anns_field = field;
        }
        if let Some(top_k) = env_parse("MCP_VECTOR_TOP_K") {
            self.vector.default_top_k = top_k;
        }
        if let Some(timeout) = env_parse("MCP_VECTOR_TIMEOUT_MS") {
            self.vector.timeout_ms = timeout;
        }
    }
}

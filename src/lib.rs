//! Store tools MCP server.
//!
//! A Model Context Protocol server exposing the tools an assistant for an
//! online game-credit store needs: order status checks (with owner alerts on
//! manual or failed orders), catalog lookup, WhatsApp text and image sending,
//! Toram Online item/monster/skill search, ebook search on a Libgen mirror,
//! and semantic search over a Milvus collection.
//!
//! # Architecture
//!
//! - **core**: configuration, error types, the shared outbound HTTP client,
//!   input validation, the MCP server and its transports
//! - **domains**: response normalization, the notification policy, the
//!   messaging and retrieval collaborators, and the tools themselves
//!
//! # Example
//!
//! ```rust,no_run
//! use store_tools_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};

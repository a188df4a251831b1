//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Every tool is a thin adapter over one upstream API and answers with the
//! [`ToolResult`] envelope.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `definition.rs` - The [`ToolDefinition`] trait every tool implements
//! - `context.rs` - Shared configuration, HTTP client and collaborators
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `result.rs` / `error.rs` - Envelope and error-to-envelope mapping
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` and implement [`ToolDefinition`]
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs` and its entry in `registry.rs`
//!
//! **No need to modify `server.rs`!** The router is built dynamically.

mod context;
mod definition;
pub mod definitions;
mod error;
mod registry;
mod result;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use context::ToolContext;
pub use definition::ToolDefinition;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use router::build_tool_router;

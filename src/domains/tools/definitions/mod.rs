//! Tool definitions module.
//!
//! This module exports all available tool definitions, grouped by the
//! upstream service they talk to. Each tool is defined in its own file.

pub mod common;
pub mod libgen;
pub mod messaging;
pub mod store;
pub mod toram;
pub mod vector;

pub use libgen::{SearchEbookParams, SearchEbookTool};
pub use messaging::{SendImageParams, SendImageTool, SendMessageParams, SendMessageTool};
pub use store::{CatalogParams, CatalogTool, OrderStatusParams, OrderStatusTool};
pub use toram::{
    SearchItemParams, SearchItemTool, SearchMonsterParams, SearchMonsterTool, SearchSkillParams,
    SearchSkillTool,
};
pub use vector::{SearchVectorParams, SearchVectorTool};

//! Semantic search over the document vector index.

mod search;

pub use search::{SearchVectorParams, SearchVectorTool};

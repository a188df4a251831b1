//! Library Genesis ebook search.

mod ebook;
mod scrape;

pub use ebook::{SearchEbookParams, SearchEbookTool};

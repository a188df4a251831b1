//! Store backend tools: order status and catalog lookup.

mod catalog;
mod order_status;

pub use catalog::{CatalogParams, CatalogTool};
pub use order_status::{OrderStatusParams, OrderStatusTool};

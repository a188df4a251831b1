//! Business logic, organized by bounded context.
//!
//! - `normalizer`: turns upstream JSON into fixed records and summary lines
//! - `notification`: decides when an order status needs a human
//! - `messaging`: WhatsApp gateway collaborator
//! - `retrieval`: embedding and vector index collaborators
//! - `tools`: the MCP tools built on the above

pub mod messaging;
pub mod normalizer;
pub mod notification;
pub mod retrieval;
pub mod tools;

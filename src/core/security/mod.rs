// Security module for caller input validation
//
// This module holds the input gates that run before any outbound call is
// made, so malformed arguments never reach an upstream API.

pub mod query_validator;

pub use query_validator::{MAX_QUERY_CHARS, QueryValidationError, validate_query};

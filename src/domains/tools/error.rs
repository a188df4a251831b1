//! Tool-specific error types.

use thiserror::Error;
use tracing::{error, warn};

use super::result::ToolResult;
use crate::core::client::ApiError;
use crate::core::security::QueryValidationError;

/// Why a tool call did not produce a successful result.
///
/// Each variant maps onto the envelope differently; see
/// [`ToolError::into_result`].
#[derive(Debug, Error)]
pub enum ToolError {
    /// The upstream answered but had nothing for the query. Holds the summary.
    #[error("{0}")]
    NotFound(String),

    /// Caller input was rejected before any network call. Holds the summary.
    #[error("{0}")]
    Validation(String),

    /// The upstream call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The upstream answered with something unusable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<QueryValidationError> for ToolError {
    fn from(err: QueryValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl ToolError {
    /// Create a "not found" error with its summary.
    pub fn not_found(summary: impl Into<String>) -> Self {
        Self::NotFound(summary.into())
    }

    /// Create a validation error with its summary.
    pub fn validation(summary: impl Into<String>) -> Self {
        Self::Validation(summary.into())
    }

    /// Create an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Convert to the failure envelope.
    ///
    /// Upstream failures get `connect_failure` as summary and the diagnostic
    /// as `error`; not-found and validation failures carry their own summary
    /// and no `error`.
    pub fn into_result(self, tool: &str, connect_failure: &str) -> ToolResult {
        match self {
            Self::NotFound(summary) => {
                warn!("{}: {}", tool, summary);
                ToolResult::rejected(summary)
            }
            Self::Validation(summary) => {
                warn!("{} rejected input: {}", tool, summary);
                ToolResult::rejected(summary)
            }
            err @ (Self::Api(_) | Self::InvalidResponse(_)) => {
                error!("{} failed: {}", tool, err);
                ToolResult::failure(connect_failure, err.to_string())
            }
        }
    }
}

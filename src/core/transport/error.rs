//! Transport error types.

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

/// Failures while binding a listener or serving MCP clients.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP handshake with a client failed.
    #[error("Server initialization error: {0}")]
    InitError(String),

    /// The HTTP server stopped with an error.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The rmcp service loop ended with an error.
    #[error("Service error: {0}")]
    ServiceError(String),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::BindError {
            address: address.into(),
            source,
        }
    }

    pub fn init(msg: impl Into<String>) -> Self {
        Self::InitError(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::HttpError(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::ServiceError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_names_address() {
        let err = TransportError::bind(
            "0.0.0.0:3000",
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        );
        let text = err.to_string();
        assert!(text.contains("0.0.0.0:3000"));
        assert!(text.contains("in use"));
    }
}

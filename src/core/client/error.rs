//! Outbound HTTP error types.

use thiserror::Error;

/// Result type for outbound API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures talking to an external API.
///
/// Every variant is terminal for the invocation that hit it; nothing retries.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The call did not finish within its timeout.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The remote host could not be reached.
    #[error("Connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    /// The remote host answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body could not be decoded.
    #[error("Invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    /// A URL could not be built from configuration and arguments.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Any other transport failure.
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// A required credential or endpoint is missing from configuration.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl ApiError {
    /// Classify a reqwest error for the given URL.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            Self::Timeout { url }
        } else if err.is_connect() {
            Self::Connect {
                url,
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode {
                url,
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                url,
            }
        } else {
            Self::Request {
                url,
                message: err.to_string(),
            }
        }
    }

    /// Create a decode error.
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Whether the call was refused locally for missing configuration.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }

    /// Whether the failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_is_distinguishable() {
        let err = ApiError::NotConfigured("WhatsApp gateway API key");
        assert!(err.is_not_configured());
        assert_eq!(err.to_string(), "WhatsApp gateway API key is not configured");

        let err = ApiError::Timeout {
            url: "https://x".to_string(),
        };
        assert!(!err.is_not_configured());
    }
}

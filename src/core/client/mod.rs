//! Shared outbound HTTP client.
//!
//! Every tool talks to exactly one upstream API per call (plus, at most, one
//! follow-up call to a messaging collaborator). This module owns the single
//! `reqwest::Client` they share and the per-call timeout and status policy:
//! each request carries its own timeout, non-2xx statuses are errors, and
//! nothing is retried.

mod error;

pub use error::{ApiError, ApiResult};

use reqwest::header::ACCEPT;
use reqwest::{Response, Url};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::core::config::HttpClientConfig;

/// Async HTTP client shared by all tools.
///
/// Cloning is cheap; the underlying connection pool is reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    /// Build the client from configuration.
    pub fn new(config: &HttpClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::Request {
                url: String::new(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { http })
    }

    /// Append a single path segment to `base`, percent-encoding it.
    ///
    /// A trailing slash on `base` is absorbed, so `https://h/api/payment/`
    /// and `https://h/api/payment` both yield `https://h/api/payment/{segment}`.
    pub fn endpoint(base: &str, segment: &str) -> ApiResult<Url> {
        let mut url = Url::parse(base).map_err(|e| ApiError::invalid_url(base, e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::invalid_url(base, "URL cannot be a base"))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// GET a URL and decode the body as JSON.
    pub async fn get_json(&self, url: &str, timeout: Duration) -> ApiResult<Value> {
        debug!("GET {} (timeout {:?})", url, timeout);

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;

        let response = Self::check_status(url, response)?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;

        debug!("Response from {}: {} bytes", url, bytes.len());

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::decode(url, format!("JSON parse error: {}", e)))
    }

    /// GET a URL and return the body as text (HTML pages).
    pub async fn get_text(&self, url: &str, timeout: Duration) -> ApiResult<String> {
        debug!("GET {} (timeout {:?})", url, timeout);

        let response = self
            .http
            .get(url)
            .header(
                ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;

        let response = Self::check_status(url, response)?;
        response.text().await.map_err(|e| ApiError::from_reqwest(url, e))
    }

    /// POST a JSON body.
    ///
    /// The response body is returned as JSON when it parses, otherwise as a
    /// JSON string holding the raw text; gateways are not consistent here.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        timeout: Duration,
    ) -> ApiResult<Value> {
        self.post_json_with_headers(url, body, &[], timeout).await
    }

    /// POST a JSON body with extra headers (API keys, bearer tokens).
    pub async fn post_json_with_headers<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> ApiResult<Value> {
        debug!("POST {} (timeout {:?})", url, timeout);

        let mut request = self.http.post(url).json(body).timeout(timeout);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;

        let response = Self::check_status(url, response)?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;

        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    fn check_status(url: &str, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }
}

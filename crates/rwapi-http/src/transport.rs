//! Transport contract between the query layer and the wire

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use crate::error::Result;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// A fully resolved HTTP request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Vec<u8>>,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl TransportRequest {
    /// Create a bodiless GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
            headers: Vec::new(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Create a POST request carrying `body`
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: Some(body),
            headers: Vec::new(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a completed exchange
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True only for `200 OK`; other 2xx codes do not count
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Body decoded as UTF-8, lossy
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Mockable transport trait
///
/// Implementations perform exactly one exchange per call. A response with
/// any status is a success at this level; only failures to complete the
/// exchange (connect, timeout, invalid request) are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and collect the full response body
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_request_has_no_body() {
        let request = TransportRequest::get("http://localhost/reports");
        assert_eq!(request.method, Method::GET);
        assert!(request.body.is_none());
        assert_eq!(request.timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_post_request_headers() {
        let request = TransportRequest::post("http://localhost/reports", b"{}".to_vec())
            .with_header("Content-Type", "application/json")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("Content-Length"), None);
        assert_eq!(request.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_response_is_ok_only_for_200() {
        assert!(TransportResponse::new(StatusCode::OK, "{}").is_ok());
        assert!(!TransportResponse::new(StatusCode::NO_CONTENT, "").is_ok());
        assert!(!TransportResponse::new(StatusCode::NOT_FOUND, "{}").is_ok());
    }

    #[test]
    fn test_response_text() {
        let response = TransportResponse::new(StatusCode::OK, "{\"count\":1}");
        assert_eq!(response.text(), "{\"count\":1}");
    }
}

//! Client error types

use rwapi_http::HttpError;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Everything that can keep a query from producing a response object
#[derive(Debug, Error)]
pub enum ClientError {
    /// The exchange itself failed (connect, timeout, invalid request)
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The service answered with anything other than `200 OK`
    #[error("Unexpected HTTP status {status}")]
    Status { status: u16, body: String },

    /// The body is not valid JSON
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body is valid JSON but not an object
    #[error("Response body is not a JSON object")]
    UnexpectedShape,

    /// Base URL and resource path do not form a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The query cannot be dispatched as configured
    #[error("Query is misconfigured: {0}")]
    Misconfigured(String),

    /// Invalid client configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status reported by the service, if the exchange completed
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

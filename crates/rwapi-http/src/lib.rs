//! HTTP transport for the ReliefWeb API client
//!
//! Sends one fully resolved request and hands back the status code and raw
//! body. Interpreting the status is left to the caller.
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `Transport`
//! - **Configurable**: Timeouts, proxy, user-agent, redirects
//! - **Connection pooling**: Managed by underlying reqwest client
//! - **Testing support**: Easy mocking with wiremock

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{shared_client, HttpClient};
pub use config::HttpConfig;
pub use error::{HttpError, Result};
pub use transport::{Transport, TransportRequest, TransportResponse, DEFAULT_REQUEST_TIMEOUT};

/// Re-export commonly used types
pub use reqwest::{Method, StatusCode};

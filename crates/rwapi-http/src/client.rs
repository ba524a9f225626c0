//! reqwest-backed transport

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use tracing::debug;

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Production HTTP transport
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client with configuration
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(if config.max_redirects > 0 {
                reqwest::redirect::Policy::limited(config.max_redirects)
            } else {
                reqwest::redirect::Policy::none()
            });

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        if config.pool_enabled {
            builder = builder.pool_idle_timeout(config.pool_idle_timeout);
        } else {
            builder = builder.pool_max_idle_per_host(0);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        Ok(Self { inner, config })
    }

    /// Create HTTP client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpConfig::default())
    }

    /// Get underlying reqwest client (for advanced usage)
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Get configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = request
            .url
            .parse::<url::Url>()
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        debug!("HTTP {}: {}", request.method, url);

        let mut builder = self
            .inner
            .request(request.method.clone(), url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| HttpError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            builder = builder.header(header_name, header_value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(HttpError::RequestFailed)?;
        let status = response.status();
        let body = response.bytes().await.map_err(HttpError::RequestFailed)?;

        debug!("HTTP {} -> {} ({} bytes)", request.method, status, body.len());

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

/// Create a shared transport (Arc-wrapped for cloning)
pub fn shared_client(config: HttpConfig) -> Result<Arc<dyn Transport>> {
    Ok(Arc::new(HttpClient::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use reqwest::StatusCode;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation_with_defaults() {
        let client = HttpClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_with_config() {
        let config = HttpConfig::new().with_timeout(Duration::from_secs(10));

        let client = HttpClient::new(config).unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(10));
        assert_eq!(client.config().connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_proxy() {
        let config = HttpConfig::default().with_proxy("http://[::1");

        let result = HttpClient::new(config);
        assert!(matches!(result, Err(HttpError::InvalidProxy(_))));
    }

    #[tokio::test]
    async fn test_send_invalid_url() {
        let client = HttpClient::with_defaults().unwrap();
        let result = client.send(TransportRequest::get("not a url")).await;
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_send_invalid_header() {
        let client = HttpClient::with_defaults().unwrap();
        let request =
            TransportRequest::get("http://localhost/").with_header("bad header", "value");
        let result = client.send(request).await;
        assert!(matches!(result, Err(HttpError::InvalidHeader { .. })));
    }

    #[tokio::test]
    async fn test_post_sends_body_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reports"))
            .and(header("Content-Type", "application/json"))
            .and(body_string("{\"limit\":1}"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"count\":1}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::with_defaults().unwrap();
        let request =
            TransportRequest::post(format!("{}/reports", server.uri()), b"{\"limit\":1}".to_vec())
                .with_header("Content-Type", "application/json");

        let response = client.send(request).await.unwrap();
        assert!(response.is_ok());
        assert_eq!(response.text(), "{\"count\":1}");
    }

    #[tokio::test]
    async fn test_error_status_is_reported_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("{\"error\":true}"))
            .mount(&server)
            .await;

        let client = HttpClient::with_defaults().unwrap();
        let response = client
            .send(TransportRequest::get(format!("{}/reports", server.uri())))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!response.is_ok());
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::with_defaults().unwrap();
        let request = TransportRequest::get(format!("{}/slow", server.uri()))
            .with_timeout(Duration::from_millis(50));

        let err = client.send(request).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_shared_client_creation() {
        let client = shared_client(HttpConfig::default());
        assert!(client.is_ok());
    }
}

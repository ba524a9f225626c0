//! Request dispatch
//!
//! [`Client`] turns a resource path and a payload into one HTTP exchange:
//! every URL carries `appname` and, unless hypermedia is enabled, `slim=1`.
//! GET payloads are appended to the query string, POST payloads are sent as
//! a JSON body. Only a `200 OK` response with a JSON object body counts as
//! a result.

use std::fmt;
use std::sync::Arc;

use rwapi_http::{HttpClient, HttpConfig, Method, Transport, TransportRequest};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::encode::form_pairs;
use crate::error::{ClientError, Result};
use crate::query::Query;

/// Resources exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Reports,
    Jobs,
    Training,
    Sources,
    Countries,
    Disasters,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Reports => "reports",
            Resource::Jobs => "jobs",
            Resource::Training => "training",
            Resource::Sources => "sources",
            Resource::Countries => "countries",
            Resource::Disasters => "disasters",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> Self {
        resource.as_str().to_string()
    }
}

/// API client
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client sending requests over HTTP
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpClient::new(HttpConfig::from(&config))?;

        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Create a client on top of any transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Set the application name sent with every request
    pub fn appname(mut self, appname: impl Into<String>) -> Self {
        self.config.appname = appname.into();
        self
    }

    /// Keep hypermedia links in responses
    pub fn hypermedia(mut self, enabled: bool) -> Self {
        self.config.hypermedia = enabled;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a query on `resource` bound to this client
    pub fn query(&self, resource: impl Into<String>) -> Query {
        Query::new(resource).client(self.clone())
    }

    pub fn reports(&self) -> Query {
        self.query(Resource::Reports)
    }

    pub fn jobs(&self) -> Query {
        self.query(Resource::Jobs)
    }

    pub fn training(&self) -> Query {
        self.query(Resource::Training)
    }

    pub fn sources(&self) -> Query {
        self.query(Resource::Sources)
    }

    pub fn countries(&self) -> Query {
        self.query(Resource::Countries)
    }

    pub fn disasters(&self) -> Query {
        self.query(Resource::Disasters)
    }

    /// Resolve `path` against the base URL, with the identity parameters
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            self.config.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("appname", &self.config.appname);
            if !self.config.hypermedia {
                pairs.append_pair("slim", "1");
            }
        }

        Ok(url)
    }

    /// Build the transport request for `payload` without sending it
    pub fn prepare<P>(&self, path: &str, payload: &P, method: Method) -> Result<TransportRequest>
    where
        P: Serialize + ?Sized,
    {
        let payload = serde_json::to_value(payload)?;
        let mut url = self.endpoint(path)?;

        let request = if method == Method::GET {
            let pairs = form_pairs(&payload);
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
            TransportRequest::get(url.as_str())
        } else if method == Method::POST {
            let body = serde_json::to_vec(&payload)?;
            let length = body.len();
            TransportRequest::post(url.as_str(), body)
                .with_header("Content-Type", "application/json")
                .with_header("Content-Length", length.to_string())
        } else {
            return Err(ClientError::Misconfigured(format!(
                "unsupported method {method}"
            )));
        };

        Ok(request.with_timeout(self.config.timeout))
    }

    /// Send `payload` to `path` and decode the response object
    pub async fn send<P>(&self, path: &str, payload: &P, method: Method) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let request = self.prepare(path, payload, method)?;
        debug!(
            "API {} {} ({} byte body)",
            request.method,
            request.url,
            request.body.as_ref().map_or(0, Vec::len)
        );

        let response = self.transport.send(request).await?;
        debug!("API response status {}", response.status);

        if !response.is_ok() {
            return Err(ClientError::Status {
                status: response.status.as_u16(),
                body: response.text(),
            });
        }

        let data: Value = serde_json::from_slice(&response.body)?;
        if !data.is_object() {
            return Err(ClientError::UnexpectedShape);
        }

        Ok(data)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

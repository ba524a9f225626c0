//! Client configuration

use std::time::Duration;

use rwapi_http::HttpConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Default API base URL
pub const DEFAULT_URL: &str = "http://api.rwlabs.org/v1";

/// Application name sent when the caller does not set one
pub const DEFAULT_APPNAME: &str = "rwapi-rust-client";

/// Endpoint and identity used for every request a client dispatches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, without trailing resource
    #[serde(default = "default_url")]
    pub url: String,

    /// Name of the application using the API, sent as `appname`
    #[serde(default = "default_appname")]
    pub appname: String,

    /// Keep hypermedia links in responses (omits `slim=1`)
    #[serde(default)]
    pub hypermedia: bool,

    /// Total and connection timeout
    #[serde(rename = "timeout_secs", with = "duration_secs", default = "default_timeout")]
    pub timeout: Duration,

    /// User agent for the underlying transport
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            appname: default_appname(),
            hypermedia: false,
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `RWAPI_URL`, `RWAPI_APPNAME`,
    /// `RWAPI_HYPERMEDIA` and `RWAPI_TIMEOUT` (seconds)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`] but reads variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("RWAPI_URL") {
            config.url = url;
        }
        if let Some(appname) = lookup("RWAPI_APPNAME") {
            config.appname = appname;
        }
        if let Some(hypermedia) = lookup("RWAPI_HYPERMEDIA") {
            config.hypermedia = parse_bool(&hypermedia).ok_or_else(|| {
                ClientError::Config(format!("RWAPI_HYPERMEDIA: invalid boolean '{hypermedia}'"))
            })?;
        }
        if let Some(timeout) = lookup("RWAPI_TIMEOUT") {
            let secs = timeout.trim().parse::<u64>().map_err(|e| {
                ClientError::Config(format!("RWAPI_TIMEOUT: invalid seconds '{timeout}': {e}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set API base URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set application name
    pub fn with_appname(mut self, appname: impl Into<String>) -> Self {
        self.appname = appname.into();
        self
    }

    /// Enable or disable hypermedia links
    pub fn with_hypermedia(mut self, enabled: bool) -> Self {
        self.hypermedia = enabled;
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Transport settings for a client: `timeout` bounds both the whole
/// request and the connection
impl From<&ClientConfig> for HttpConfig {
    fn from(config: &ClientConfig) -> Self {
        HttpConfig::new()
            .with_timeout(config.timeout)
            .with_user_agent(config.user_agent.clone())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

// Default value functions for serde
fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_appname() -> String {
    DEFAULT_APPNAME.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_user_agent() -> String {
    format!("rwapi-client/{}", env!("CARGO_PKG_VERSION"))
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

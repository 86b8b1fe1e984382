//! Client configuration.

use std::time::Duration;

use crate::documents::API_HOST_URL_BASE;

/// Connection settings for [`crate::TryFiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host of the API, without a trailing slash.
    pub api_host: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration for a non-default host (a proxy or a mock server).
    pub fn with_host(api_host: impl Into<String>) -> Self {
        let api_host = api_host.into();
        Self {
            api_host: api_host.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_host: API_HOST_URL_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
        }
    }
}

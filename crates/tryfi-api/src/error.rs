//! Error types for the TryFi API client.

use thiserror::Error;

/// Errors that can occur when talking to the TryFi API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login was rejected or the session is no longer accepted.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A GraphQL call was attempted before logging in.
    #[error("not authenticated")]
    NotAuthenticated,

    /// HTTP request failed (connection, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("malformed {context} response: {source}")]
    Malformed {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Non-success status that carries no GraphQL payload.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The GraphQL endpoint answered with an `errors` array.
    #[error("GraphQL error: {}", messages.join("; "))]
    Graphql { messages: Vec<String> },

    /// Rate limited.
    #[error("rate limited{}", retry_after_secs.map(|s| format!(" (retry after {}s)", s)).unwrap_or_default())]
    RateLimited {
        /// Seconds to wait before retrying (from Retry-After header, optional).
        retry_after_secs: Option<u64>,
    },
}

impl ApiError {
    pub(crate) fn malformed(context: &'static str, source: serde_json::Error) -> Self {
        Self::Malformed { context, source }
    }
}

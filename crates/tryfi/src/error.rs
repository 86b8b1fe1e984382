//! Error types for the TryFi facade.

use std::fmt;

use thiserror::Error;
use tryfi_api::ApiError;

/// Kind of entity a lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Pet,
    Device,
    BaseStation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pet => "pet",
            Self::Device => "device",
            Self::BaseStation => "base station",
        })
    }
}

/// Errors surfaced by [`crate::TryFi`].
///
/// Nothing is retried internally; the caller decides whether to retry.
#[derive(Debug, Error)]
pub enum TryFiError {
    /// Login rejected, session expired, or no login yet.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The API could not be reached.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A response was missing a required field or had an unexpected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The API reported an error for an otherwise well-formed request.
    #[error("API error: {0}")]
    Api(String),

    /// Rate limited.
    #[error("rate limited{}", retry_after_secs.map(|s| format!(" (retry after {}s)", s)).unwrap_or_default())]
    RateLimited { retry_after_secs: Option<u64> },

    /// No entity with this identifier is held by the facade.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
}

impl TryFiError {
    pub(crate) fn not_found(kind: EntityKind, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl From<ApiError> for TryFiError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(msg) => Self::Auth(msg),
            ApiError::NotAuthenticated => Self::Auth("not authenticated".to_string()),
            ApiError::Http(e) => Self::Network(e),
            e @ ApiError::Malformed { .. } => Self::MalformedResponse(e.to_string()),
            ApiError::InvalidResponse(msg) => Self::Api(msg),
            ApiError::Graphql { messages } => Self::Api(messages.join("; ")),
            ApiError::RateLimited { retry_after_secs } => Self::RateLimited { retry_after_secs },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = TryFiError::not_found(EntityKind::BaseStation, "base123");
        assert_eq!(err.to_string(), "base station not found: base123");
    }

    #[test]
    fn test_api_error_mapping() {
        let err: TryFiError = ApiError::NotAuthenticated.into();
        assert!(matches!(err, TryFiError::Auth(_)));

        let err: TryFiError = ApiError::Graphql {
            messages: vec!["a".to_string(), "b".to_string()],
        }
        .into();
        assert!(matches!(err, TryFiError::Api(ref msg) if msg == "a; b"));

        let source = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let err: TryFiError = ApiError::Malformed {
            context: "households",
            source,
        }
        .into();
        assert!(matches!(err, TryFiError::MalformedResponse(ref msg) if msg.contains("households")));
    }
}

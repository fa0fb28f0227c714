//! API client error types.

use thiserror::Error;

pub type ApiClientResult<T> = Result<T, ApiClientError>;

#[derive(Debug, Error)]
pub enum ApiClientError {
    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response. `message` comes from the response envelope when
    /// one was parseable, otherwise a fallback naming the status code.
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// 2xx response whose body was not a valid envelope.
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised by `ApiResponse::require_auth` when the request went out
    /// without a bearer token.
    #[error("Request was not authenticated")]
    AuthRequired,
}

impl ApiClientError {
    /// Build the non-2xx variant with the fallback message.
    pub(crate) fn http_fallback(status: u16) -> Self {
        Self::Http {
            status,
            message: format!("request failed with status {}", status),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiClientError::Network(_))
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

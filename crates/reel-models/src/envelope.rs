//! Uniform response envelope returned by every backend call.
//!
//! The backend wraps every response body, success or failure, in the same
//! JSON shape. `success` mirrors the HTTP status class; `data` is only
//! meaningful when `success` is true.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when unwrapping an envelope's payload.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Request did not succeed: {0}")]
    NotSuccessful(String),

    #[error("Successful response carried no data")]
    MissingData,
}

/// Response envelope wrapping every backend payload.
///
/// The raw fields stay public so callers can inspect the verbatim wire
/// shape; [`ApiEnvelope::into_data`] is the checked path to the payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(
    serialize = "T: serde::Serialize",
    deserialize = "T: serde::Deserialize<'de>"
))]
pub struct ApiEnvelope<T> {
    /// Whether the request succeeded (mirrors the HTTP status class)
    pub success: bool,
    /// Human-readable status message
    pub message: String,
    /// Typed payload, present on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Machine-readable error detail, present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server-side timestamp (RFC 3339)
    pub timestamp: String,
}

impl<T> ApiEnvelope<T> {
    /// Check whether the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Unwrap the payload, enforcing the success invariant.
    ///
    /// Returns an error if the envelope reports failure or if a successful
    /// envelope arrived without a payload.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            let detail = self.error.unwrap_or(self.message);
            return Err(EnvelopeError::NotSuccessful(detail));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }

    /// Borrow the payload without consuming the envelope.
    ///
    /// Only yields data when the envelope reports success.
    pub fn data_ref(&self) -> Option<&T> {
        if self.success {
            self.data.as_ref()
        } else {
            None
        }
    }
}

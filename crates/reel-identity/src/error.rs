//! Identity provider error types.

use thiserror::Error;

pub type IdentityResult<T> = Result<T, IdentityError>;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Session expired")]
    SessionExpired,
}

impl IdentityError {
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}

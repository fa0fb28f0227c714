//! Token provider trait and basic implementations.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use reel_models::IdentityToken;

use crate::error::IdentityResult;

/// Source of identity tokens for outgoing requests.
///
/// `Ok(None)` means there is no active session and the request should go
/// out anonymously. `Err` means acquisition itself failed; callers decide
/// whether that is fatal (the API client treats it as anonymous).
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Fetch the current identity token, if a session exists.
    async fn token(&self) -> IdentityResult<Option<IdentityToken>>;
}

/// Provider with no session; every request goes out anonymously.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

#[async_trait]
impl TokenProvider for Anonymous {
    async fn token(&self) -> IdentityResult<Option<IdentityToken>> {
        Ok(None)
    }
}

/// Provider handing out a fixed token.
///
/// Useful in tests and for tooling that already holds a credential.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: IdentityToken,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<IdentityToken>) -> Self {
        Self { token: token.into() }
    }
}

impl From<String> for StaticTokenProvider {
    fn from(token: String) -> Self {
        Self::new(IdentityToken::new(token))
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> IdentityResult<Option<IdentityToken>> {
        Ok(Some(self.token.clone()))
    }
}

/// Process-local session holder.
///
/// Sign-in flows store the session token here; the API client reads it
/// fresh on every request. Cheap to clone and share across tasks.
#[derive(Clone, Default)]
pub struct SessionTokenProvider {
    current: Arc<RwLock<Option<IdentityToken>>>,
}

impl SessionTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session token after sign-in or token exchange.
    pub async fn sign_in(&self, token: IdentityToken) {
        let mut current = self.current.write().await;
        *current = Some(token);
        debug!("Session token installed");
    }

    /// Clear the current session.
    pub async fn sign_out(&self) {
        let mut current = self.current.write().await;
        *current = None;
        debug!("Session cleared");
    }

    /// Check whether a session is currently active.
    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }
}

#[async_trait]
impl TokenProvider for SessionTokenProvider {
    async fn token(&self) -> IdentityResult<Option<IdentityToken>> {
        Ok(self.current.read().await.clone())
    }
}

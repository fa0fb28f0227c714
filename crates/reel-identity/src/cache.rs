//! Token caching wrapper.
//!
//! Provides a thread-safe, async-aware cache over any [`TokenProvider`]
//! with:
//! - Refresh margin to avoid token expiry mid-request
//! - Single-flight pattern to prevent thundering herd on refresh
//! - Graceful fallback to an existing valid token on refresh failure
//!
//! Identity tokens are opaque to the client, so expiry is tracked with a
//! caller-supplied TTL rather than read out of the token itself.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use reel_models::IdentityToken;

use crate::error::IdentityResult;
use crate::provider::TokenProvider;

/// Refresh margin: refresh the token 60 seconds before assumed expiry.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Conservative default TTL (50 minutes).
/// Identity tokens are typically valid for 60 minutes.
pub const TOKEN_DEFAULT_TTL: Duration = Duration::from_secs(50 * 60);

/// Cached token with expiration tracking.
struct CachedToken {
    token: IdentityToken,
    expires_at: Instant,
}

impl CachedToken {
    /// Check if the token is still valid with refresh margin.
    fn is_valid(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }

    /// Check if the token is technically still usable (even if refresh is due).
    fn is_usable(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Caching wrapper with single-flight refresh.
pub struct CachedTokenProvider {
    inner: Arc<dyn TokenProvider>,
    ttl: Duration,
    cache: RwLock<Option<CachedToken>>,
}

impl CachedTokenProvider {
    /// Wrap a provider with the default TTL.
    pub fn new(inner: Arc<dyn TokenProvider>) -> Self {
        Self::with_ttl(inner, TOKEN_DEFAULT_TTL)
    }

    /// Wrap a provider with an explicit TTL.
    pub fn with_ttl(inner: Arc<dyn TokenProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: RwLock::new(None),
        }
    }

    /// Invalidate the cached token.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        *cache = None;
    }

    /// Refresh from the inner provider, updating the cache.
    async fn refresh(
        &self,
        cache: &mut Option<CachedToken>,
    ) -> IdentityResult<Option<IdentityToken>> {
        match self.inner.token().await {
            Ok(Some(token)) => {
                *cache = Some(CachedToken {
                    token: token.clone(),
                    expires_at: Instant::now() + self.ttl,
                });
                debug!("Refreshed identity token, caching for {:?}", self.ttl);
                Ok(Some(token))
            }
            Ok(None) => {
                // Session ended upstream; a stale cached token must not outlive it.
                *cache = None;
                Ok(None)
            }
            Err(e) => {
                // On refresh failure, fall back to an existing usable token.
                if let Some(cached) = cache.as_ref() {
                    if cached.is_usable() {
                        warn!("Token refresh failed, using existing token: {}", e);
                        return Ok(Some(cached.token.clone()));
                    }
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl TokenProvider for CachedTokenProvider {
    /// Get a valid token, refreshing if necessary.
    ///
    /// Fast path: return the cached token while it is still valid.
    /// Slow path: acquire the write lock and refresh (double-check first).
    async fn token(&self) -> IdentityResult<Option<IdentityToken>> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(Some(cached.token.clone()));
                }
            }
        }

        let mut cache = self.cache.write().await;

        // Double-check: another task may have refreshed while we waited.
        if let Some(cached) = cache.as_ref() {
            if cached.is_valid() {
                return Ok(Some(cached.token.clone()));
            }
        }

        self.refresh(&mut cache).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::error::IdentityError;

    /// Counts calls and can be switched into a failing mode.
    struct CountingProvider {
        calls: AtomicU32,
        fail: std::sync::atomic::AtomicBool,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail: std::sync::atomic::AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl TokenProvider for CountingProvider {
        async fn token(&self) -> IdentityResult<Option<IdentityToken>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail.load(Ordering::SeqCst) {
                return Err(IdentityError::provider("upstream down"));
            }
            Ok(Some(IdentityToken::new(format!("tok-{}", n))))
        }
    }

    #[tokio::test]
    async fn test_cache_serves_repeated_calls_from_one_fetch() {
        let inner = Arc::new(CountingProvider::new());
        let cached = CachedTokenProvider::new(Arc::clone(&inner) as Arc<dyn TokenProvider>);

        let first = cached.token().await.unwrap().unwrap();
        let second = cached.token().await.unwrap().unwrap();
        assert_eq!(first.as_str(), "tok-1");
        assert_eq!(second.as_str(), "tok-1");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_triggers_refresh() {
        let inner = Arc::new(CountingProvider::new());
        // TTL below the refresh margin, so every call refreshes.
        let cached = CachedTokenProvider::with_ttl(
            Arc::clone(&inner) as Arc<dyn TokenProvider>,
            Duration::from_secs(1),
        );

        cached.token().await.unwrap();
        cached.token().await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_falls_back_to_usable_token() {
        let inner = Arc::new(CountingProvider::new());
        // TTL shorter than the refresh margin: the cached token counts as
        // usable but never as valid, so every call takes the refresh path.
        let cached = CachedTokenProvider::with_ttl(
            Arc::clone(&inner) as Arc<dyn TokenProvider>,
            Duration::from_secs(30),
        );

        let first = cached.token().await.unwrap().unwrap();
        inner.fail.store(true, Ordering::SeqCst);

        // Refresh fails; the still-usable cached token is handed out instead.
        let second = cached.token().await.unwrap().unwrap();
        assert_eq!(second.as_str(), first.as_str());
    }

    #[tokio::test]
    async fn test_refresh_failure_without_cache_is_an_error() {
        let inner = Arc::new(CountingProvider::new());
        inner.fail.store(true, Ordering::SeqCst);
        let cached = CachedTokenProvider::new(Arc::clone(&inner) as Arc<dyn TokenProvider>);

        assert!(cached.token().await.is_err());
    }

    #[tokio::test]
    async fn test_signed_out_upstream_clears_cache() {
        let session = crate::provider::SessionTokenProvider::new();
        session.sign_in(IdentityToken::new("tok")).await;
        let cached = CachedTokenProvider::with_ttl(
            Arc::new(session.clone()) as Arc<dyn TokenProvider>,
            Duration::from_secs(1),
        );

        assert!(cached.token().await.unwrap().is_some());
        session.sign_out().await;
        assert!(cached.token().await.unwrap().is_none());
    }
}

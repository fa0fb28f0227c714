//! Backend API client.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use reel_identity::TokenProvider;
use reel_models::{
    ApiEnvelope, HealthStatus, ProfileUpdate, RefreshTokenResponse, ResetPasswordRequest,
    SignUpRequest, SignUpResponse, SocialProfileRequest, TokenClaims, UserProfile,
};

use crate::config::ApiClientConfig;
use crate::error::{ApiClientError, ApiClientResult};

/// Whether a request went out with a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAuth {
    /// An `Authorization: Bearer` header was attached.
    Bearer,
    /// No session was available; the request went out anonymously.
    Anonymous,
}

impl RequestAuth {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, RequestAuth::Bearer)
    }
}

/// Result of a single API call: the parsed envelope plus a record of
/// whether the request was authenticated.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub auth: RequestAuth,
    pub envelope: ApiEnvelope<T>,
}

impl<T> ApiResponse<T> {
    /// Assert that the request carried a bearer token.
    ///
    /// Callers hitting endpoints that require auth can fail fast here
    /// instead of discovering a missing session via a server-side 401.
    pub fn require_auth(self) -> ApiClientResult<Self> {
        match self.auth {
            RequestAuth::Bearer => Ok(self),
            RequestAuth::Anonymous => Err(ApiClientError::AuthRequired),
        }
    }

    /// Discard the auth tag and keep the envelope.
    pub fn into_envelope(self) -> ApiEnvelope<T> {
        self.envelope
    }
}

/// Client for the Reelform backend API.
///
/// Constructed once and shared; cheap to clone (the HTTP connection pool
/// and identity provider are reference-counted internally).
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    identity: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(
        config: ApiClientConfig,
        identity: Arc<dyn TokenProvider>,
    ) -> ApiClientResult<Self> {
        let base_url = config.normalized_base_url()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiClientError::Network)?;

        Ok(Self {
            http,
            base_url,
            identity,
        })
    }

    /// Create from environment variables.
    pub fn from_env(identity: Arc<dyn TokenProvider>) -> ApiClientResult<Self> {
        Self::new(ApiClientConfig::from_env(), identity)
    }

    /// Check backend health. Auth is attached if available but not required.
    pub async fn health_check(&self) -> ApiClientResult<ApiResponse<HealthStatus>> {
        self.request(Method::GET, "/health", None::<&()>).await
    }

    /// Register a new account. Returns the created user and a one-time
    /// exchange token for establishing a session.
    pub async fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> ApiClientResult<ApiResponse<SignUpResponse>> {
        self.request(Method::POST, "/api/auth/signup", Some(request))
            .await
    }

    /// Provision a profile from a third-party identity assertion.
    pub async fn create_social_profile(
        &self,
        request: &SocialProfileRequest,
    ) -> ApiClientResult<ApiResponse<UserProfile>> {
        self.request(
            Method::POST,
            "/api/auth/create-social-profile",
            Some(request),
        )
        .await
    }

    /// Validate the currently attached bearer token server-side.
    pub async fn verify_token(&self) -> ApiClientResult<ApiResponse<TokenClaims>> {
        self.request(Method::POST, "/api/auth/verify-token", None::<&()>)
            .await
    }

    /// Trigger the out-of-band password reset flow.
    pub async fn reset_password(
        &self,
        email: impl Into<String>,
    ) -> ApiClientResult<ApiResponse<serde_json::Value>> {
        let body = ResetPasswordRequest { email: email.into() };
        self.request(Method::POST, "/api/auth/reset-password", Some(&body))
            .await
    }

    /// Fetch the caller's own profile.
    pub async fn get_profile(&self) -> ApiClientResult<ApiResponse<UserProfile>> {
        self.request(Method::GET, "/api/auth/profile", None::<&()>)
            .await
    }

    /// Patch the caller's own profile. Only fields set on `update` are sent.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> ApiClientResult<ApiResponse<UserProfile>> {
        self.request(Method::PATCH, "/api/auth/profile", Some(update))
            .await
    }

    /// Exchange the current session for a new exchange token.
    pub async fn refresh_token(&self) -> ApiClientResult<ApiResponse<RefreshTokenResponse>> {
        self.request(Method::POST, "/api/auth/refresh-token", None::<&()>)
            .await
    }

    /// Delete the caller's account.
    pub async fn delete_account(&self) -> ApiClientResult<ApiResponse<serde_json::Value>> {
        self.request(Method::DELETE, "/api/auth/account", None::<&()>)
            .await
    }

    /// Best-effort token acquisition.
    ///
    /// Acquisition failure is never fatal: the request proceeds without an
    /// Authorization header and the server decides whether auth was
    /// required. Only the error message is logged, never a token.
    async fn acquire_token(&self) -> Option<reel_models::IdentityToken> {
        match self.identity.token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Token acquisition failed, sending request anonymously: {}", e);
                None
            }
        }
    }

    /// Single round trip: compose, send, normalize.
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiClientResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let token = self.acquire_token().await;
        let auth = if token.is_some() {
            RequestAuth::Bearer
        } else {
            RequestAuth::Anonymous
        };

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &token {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(
            %method,
            path,
            authenticated = auth.is_authenticated(),
            "Sending API request"
        );

        let response = builder.send().await.map_err(ApiClientError::Network)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body) {
                Ok(envelope) => ApiClientError::Http {
                    status: status.as_u16(),
                    message: envelope.message,
                },
                Err(_) => ApiClientError::http_fallback(status.as_u16()),
            };
            warn!(%method, path, status = status.as_u16(), "API request failed: {}", error);
            return Err(error);
        }

        let body = response.text().await.map_err(ApiClientError::Network)?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;

        Ok(ApiResponse { auth, envelope })
    }
}

//! API client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ApiClientError, ApiClientResult};

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the backend API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("REELFORM_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            timeout: Duration::from_secs(
                std::env::var("REELFORM_API_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    /// Validate the base URL and strip any trailing slash.
    pub(crate) fn normalized_base_url(&self) -> ApiClientResult<String> {
        let parsed = Url::parse(&self.base_url)
            .map_err(|e| ApiClientError::InvalidConfig(format!("bad base URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiClientError::InvalidConfig(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }
        Ok(self.base_url.trim_end_matches('/').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ApiClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = ApiClientConfig {
            base_url: "https://api.reelform.app/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.normalized_base_url().unwrap(),
            "https://api.reelform.app"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = ApiClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.normalized_base_url().is_err());

        let config = ApiClientConfig {
            base_url: "ftp://api.reelform.app".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.normalized_base_url(),
            Err(ApiClientError::InvalidConfig(_))
        ));
    }
}

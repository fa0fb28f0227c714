//! User profile and auth payload types.
//!
//! These mirror the backend's JSON wire format (camelCase keys). The
//! profile is owned by the backend; the client carries it through without
//! interpreting the preference payload.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::token::ExchangeToken;

/// User preference payload.
///
/// Known fields are typed; anything else the backend stores rides along in
/// `extra` untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default)]
    pub marketing_emails: bool,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// User profile as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl SignUpRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// Sign-up response: the created user plus a one-time exchange token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub user: UserProfile,
    pub exchange_token: ExchangeToken,
}

/// Profile provisioning request for third-party identity sign-in.
///
/// The identity assertion itself travels in the Authorization header; this
/// body carries the profile fields the provider exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProfileRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Identity provider id, e.g. "google.com"
    pub provider: String,
}

/// Password reset request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Partial profile update, sent as PATCH.
///
/// Every field is optional and unset fields are omitted from the body, so
/// the backend only sees the keys the caller actually changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

impl ProfileUpdate {
    /// Check whether the update carries any field at all.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.photo_url.is_none()
            && self.preferences.is_none()
    }
}

/// Refresh response: a fresh one-time exchange token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub exchange_token: ExchangeToken,
}

/// Claims echoed back by server-side token verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" || self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_serializes_only_set_fields() {
        let update = ProfileUpdate {
            first_name: Some("A".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, serde_json::json!({"firstName": "A"}));
    }

    #[test]
    fn test_empty_profile_update_serializes_to_empty_object() {
        let update = ProfileUpdate::default();
        assert!(update.is_empty());
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            "{}".to_string()
        );
    }

    #[test]
    fn test_sign_up_request_validation() {
        let ok = SignUpRequest::new("a@example.com", "longenough")
            .with_display_name("A");
        assert!(ok.validate().is_ok());

        let bad_email = SignUpRequest::new("not-an-email", "longenough");
        assert!(bad_email.validate().is_err());

        let short_password = SignUpRequest::new("a@example.com", "short");
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_user_profile_camel_case_wire_format() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "uid": "u1",
            "email": "a@example.com",
            "displayName": "Alice",
            "photoUrl": "https://example.com/a.png"
        }))
        .unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Alice"));
        assert!(profile.preferences.is_none());
    }

    #[test]
    fn test_preferences_keep_unknown_fields() {
        let prefs: UserPreferences = serde_json::from_value(serde_json::json!({
            "theme": "dark",
            "captionsEnabled": true
        }))
        .unwrap();
        assert_eq!(prefs.theme.as_deref(), Some("dark"));
        assert_eq!(
            prefs.extra.get("captionsEnabled"),
            Some(&serde_json::json!(true))
        );
    }

    #[test]
    fn test_health_status_accepts_both_spellings() {
        let healthy = HealthStatus { status: "healthy".to_string(), version: None };
        let ok = HealthStatus { status: "ok".to_string(), version: None };
        let down = HealthStatus { status: "degraded".to_string(), version: None };
        assert!(healthy.is_healthy());
        assert!(ok.is_healthy());
        assert!(!down.is_healthy());
    }
}

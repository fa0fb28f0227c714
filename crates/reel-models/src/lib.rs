//! Shared wire types for the Reelform client SDK.
//!
//! This crate provides Serde-serializable types for:
//! - The uniform response envelope returned by every backend call
//! - User profiles and preference payloads
//! - Auth request/response bodies (sign-up, social profile, refresh)
//! - Opaque token newtypes with log-safe Debug output

pub mod envelope;
pub mod token;
pub mod user;

// Re-export common types
pub use envelope::{ApiEnvelope, EnvelopeError};
pub use token::{ExchangeToken, IdentityToken};
pub use user::{
    HealthStatus, ProfileUpdate, RefreshTokenResponse, ResetPasswordRequest, SignUpRequest,
    SignUpResponse, SocialProfileRequest, TokenClaims, UserPreferences, UserProfile,
};

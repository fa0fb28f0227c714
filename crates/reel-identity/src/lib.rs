//! Identity provider seam for the Reelform client SDK.
//!
//! The backend treats the identity provider as an external collaborator:
//! it supplies the current signed-in session and a fresh identity token on
//! demand. This crate defines that seam as a trait plus a few concrete
//! providers:
//! - [`Anonymous`] — never has a session
//! - [`StaticTokenProvider`] — fixed token, mainly for tests and tooling
//! - [`SessionTokenProvider`] — process-local mutable session
//! - [`CachedTokenProvider`] — caching wrapper with single-flight refresh

pub mod cache;
pub mod error;
pub mod provider;

pub use cache::CachedTokenProvider;
pub use error::{IdentityError, IdentityResult};
pub use provider::{Anonymous, SessionTokenProvider, StaticTokenProvider, TokenProvider};

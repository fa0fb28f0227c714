//! Authenticated JSON client for the Reelform backend API.
//!
//! The client composes requests against a single configured origin,
//! attaches a freshly fetched identity token when one is available, and
//! normalizes every response into the shared envelope type. Token
//! acquisition is best-effort: without a session the request goes out
//! anonymously and the server decides whether that is acceptable.

pub mod client;
pub mod config;
pub mod error;

pub use client::{ApiClient, ApiResponse, RequestAuth};
pub use config::ApiClientConfig;
pub use error::{ApiClientError, ApiClientResult};

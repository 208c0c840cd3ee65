//! # rbdash-api - Backend Collaborators
//!
//! HTTP clients for the two external collaborators the dashboard consumes,
//! plus local credential storage.
//!
//! Depends on [`rbdash_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Service Traits
//! - [`AuthService`] - "Who is the current caller?", sign in, logout
//! - [`AppsService`] - The caller's app collection and logo reachability
//!
//! ### HTTP Implementations
//! - [`HttpClient`] - Shared reqwest client + validated base URL
//! - [`AuthClient`] - `GET /api/auth/me`, `POST /api/auth/logout`
//! - [`ApiClient`] - `GET /api/apps`, logo probe
//!
//! ### Credentials
//! - [`CredentialStore`] - Bearer token persisted in `credentials.toml`

pub mod apps;
pub mod auth;
pub mod client;
pub mod credentials;
pub mod service;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use apps::ApiClient;
pub use auth::AuthClient;
pub use client::{HttpClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use credentials::CredentialStore;
pub use service::{AppsService, AuthService, LocalAppsService, LocalAuthService};

use rbdash_core::prelude::*;

/// Build both HTTP collaborators over one connection pool and credential store
pub fn http_backend(
    base_url: &str,
    timeout_ms: u64,
    credentials: CredentialStore,
) -> Result<(AuthClient, ApiClient)> {
    let http = HttpClient::new(base_url, timeout_ms)?;
    Ok((
        AuthClient::new(http.clone(), credentials.clone()),
        ApiClient::new(http, credentials),
    ))
}

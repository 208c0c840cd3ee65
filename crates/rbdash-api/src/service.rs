//! Collaborator traits consumed by the dashboard
//!
//! The app layer only ever talks to these traits. The HTTP clients in this
//! crate implement them for production; `test_utils` provides fakes.

use rbdash_core::prelude::*;
use rbdash_core::{App, User};

/// Authentication collaborator
#[trait_variant::make(AuthService: Send)]
pub trait LocalAuthService {
    /// The currently authenticated user, if any.
    ///
    /// A rejected or missing credential is `Ok(None)`; transport and server
    /// failures are errors.
    async fn current_user(&self) -> Result<Option<User>>;

    /// End the session. Local credentials are dropped even if the backend
    /// call fails.
    async fn logout(&self) -> Result<()>;

    /// Verify `token` and persist it when it identifies a user
    async fn sign_in(&self, token: &str) -> Result<Option<User>>;
}

/// API collaborator for the caller's apps
#[trait_variant::make(AppsService: Send)]
pub trait LocalAppsService {
    /// All apps owned by the caller, in backend order
    async fn list_apps(&self) -> Result<Vec<App>>;

    /// Check that a logo URL can actually be fetched
    async fn probe_logo(&self, url: &str) -> Result<()>;
}

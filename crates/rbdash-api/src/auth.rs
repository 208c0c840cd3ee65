//! HTTP authentication collaborator

use reqwest::header::AUTHORIZATION;

use rbdash_core::prelude::*;
use rbdash_core::User;

use crate::client::{bearer, ensure_ok, read_data, send, HttpClient};
use crate::credentials::CredentialStore;
use crate::service::AuthService;

const ME_ROUTE: &str = "/auth/me";
const LOGOUT_ROUTE: &str = "/auth/logout";

/// [`AuthService`] backed by `/api/auth/*` and the local credential store
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: HttpClient,
    credentials: CredentialStore,
}

impl AuthClient {
    pub fn new(http: HttpClient, credentials: CredentialStore) -> Self {
        Self { http, credentials }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// `Ok(None)` when the backend rejects the token
    async fn fetch_me(&self, token: &str) -> Result<Option<User>> {
        let request = self.http.get(ME_ROUTE).header(AUTHORIZATION, bearer(token));
        let resp = send(request, "auth/me").await?;

        match ensure_ok(resp, "auth/me").await {
            Ok(resp) => Ok(Some(read_data(resp, "auth/me").await?)),
            Err(Error::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl AuthService for AuthClient {
    async fn current_user(&self) -> Result<Option<User>> {
        let Some(token) = self.credentials.load()? else {
            debug!("No stored credentials; skipping auth/me");
            return Ok(None);
        };

        let user = self.fetch_me(&token).await?;
        match &user {
            Some(user) => debug!("Authenticated as {}", user.email),
            None => info!("Stored token was rejected by the backend"),
        }
        Ok(user)
    }

    async fn logout(&self) -> Result<()> {
        let token = self.credentials.load().unwrap_or_else(|e| {
            warn!("Could not read credentials during logout: {e}");
            None
        });

        let remote = match token {
            Some(token) => {
                let request = self
                    .http
                    .post(LOGOUT_ROUTE)
                    .header(AUTHORIZATION, bearer(&token));
                match send(request, "auth/logout").await {
                    Ok(resp) => ensure_ok(resp, "auth/logout").await.map(|_| ()),
                    Err(e) => Err(e),
                }
            }
            None => Ok(()),
        };

        // Local sign-out happens regardless of what the backend said
        self.credentials.clear()?;

        match remote {
            // Already signed out server-side
            Err(Error::Unauthorized) => Ok(()),
            other => other,
        }
    }

    async fn sign_in(&self, token: &str) -> Result<Option<User>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        let user = self.fetch_me(token).await?;
        if let Some(user) = &user {
            self.credentials.save(token)?;
            info!("Signed in as {}", user.email);
        }
        Ok(user)
    }
}

//! HTTP API collaborator for the caller's apps

use reqwest::header::AUTHORIZATION;

use rbdash_core::prelude::*;
use rbdash_core::App;

use crate::client::{bearer, ensure_ok, read_data, send, HttpClient};
use crate::credentials::CredentialStore;
use crate::service::AppsService;

const APPS_ROUTE: &str = "/apps";

/// [`AppsService`] backed by `GET /api/apps`
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    credentials: CredentialStore,
}

impl ApiClient {
    pub fn new(http: HttpClient, credentials: CredentialStore) -> Self {
        Self { http, credentials }
    }
}

impl AppsService for ApiClient {
    async fn list_apps(&self) -> Result<Vec<App>> {
        let mut request = self.http.get(APPS_ROUTE);
        if let Some(token) = self.credentials.load()? {
            request = request.header(AUTHORIZATION, bearer(&token));
        }

        let resp = send(request, "apps").await?;
        let resp = ensure_ok(resp, "apps").await?;
        let apps: Vec<App> = read_data(resp, "apps").await?;

        debug!("Fetched {} apps", apps.len());
        Ok(apps)
    }

    async fn probe_logo(&self, url: &str) -> Result<()> {
        let resp = send(self.http.get_absolute(url), "logo").await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::api_status(status.as_u16(), format!("logo {url}")))
        }
    }
}

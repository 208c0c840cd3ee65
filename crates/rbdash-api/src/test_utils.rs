//! Fake collaborators for tests
//!
//! Enabled for downstream crates with the `test-helpers` feature.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use rbdash_core::prelude::*;
use rbdash_core::{App, AppStatus, User};

use crate::service::{AppsService, AuthService};

/// Build an app record with sensible defaults
pub fn test_app(id: &str, name: &str) -> App {
    App {
        id: id.to_string(),
        name: name.to_string(),
        display_name: None,
        description: None,
        status: AppStatus::Active,
        logo: None,
        created_at: "2024-03-15".to_string(),
        production_url: None,
        prod_version: None,
    }
}

pub fn test_user() -> User {
    User::new("user-1", "dev@example.com")
}

/// Scripted [`AuthService`]
#[derive(Debug, Default)]
pub struct FakeAuth {
    user: Mutex<Option<User>>,
    fail: bool,
    delay: Option<Duration>,
    valid_token: Option<String>,
    calls: AtomicUsize,
    logouts: AtomicUsize,
}

impl FakeAuth {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Mutex::new(Some(user)),
            ..Default::default()
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    /// `current_user` fails with a transport error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Delay every `current_user` answer
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// `sign_in` accepts only this token
    pub fn accepting_token(mut self, token: &str) -> Self {
        self.valid_token = Some(token.to_string());
        self
    }

    pub fn current_user_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }

    fn user(&self) -> Option<User> {
        self.user.lock().ok().and_then(|u| u.clone())
    }

    fn set_user(&self, user: Option<User>) {
        if let Ok(mut guard) = self.user.lock() {
            *guard = user;
        }
    }
}

impl AuthService for FakeAuth {
    async fn current_user(&self) -> Result<Option<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(Error::http("auth backend unreachable"));
        }
        Ok(self.user())
    }

    async fn logout(&self) -> Result<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        self.set_user(None);
        Ok(())
    }

    async fn sign_in(&self, token: &str) -> Result<Option<User>> {
        if self.valid_token.as_deref() == Some(token) {
            let user = test_user();
            self.set_user(Some(user.clone()));
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

/// Scripted [`AppsService`]
#[derive(Debug)]
pub struct FakeApps {
    apps: Mutex<Vec<App>>,
    fail: bool,
    broken_logos: HashSet<String>,
    calls: AtomicUsize,
}

impl FakeApps {
    pub fn with_apps(apps: Vec<App>) -> Self {
        Self {
            apps: Mutex::new(apps),
            fail: false,
            broken_logos: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_apps(Vec::new())
        }
    }

    /// `probe_logo` fails for this URL
    pub fn with_broken_logo(mut self, url: &str) -> Self {
        self.broken_logos.insert(url.to_string());
        self
    }

    pub fn set_apps(&self, apps: Vec<App>) {
        if let Ok(mut guard) = self.apps.lock() {
            *guard = apps;
        }
    }

    pub fn list_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AppsService for FakeApps {
    async fn list_apps(&self) -> Result<Vec<App>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::api_status(500, "apps: internal error"));
        }
        Ok(self.apps.lock().map(|a| a.clone()).unwrap_or_default())
    }

    async fn probe_logo(&self, url: &str) -> Result<()> {
        if self.broken_logos.contains(url) {
            Err(Error::api_status(404, format!("logo {url}")))
        } else {
            Ok(())
        }
    }
}

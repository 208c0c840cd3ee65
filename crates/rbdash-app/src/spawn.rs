//! Background task spawning
//!
//! Each function starts one tokio task that talks to a collaborator and
//! reports back through the message channel. Returned handles let the caller
//! track the task under its view scope.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use crate::message::Message;
use crate::scope::ScopeId;
use rbdash_api::{AppsService, AuthService};
use rbdash_core::prelude::*;

/// Session guard: one `current_user()` query for `scope`
pub fn spawn_session_guard<A>(
    scope: ScopeId,
    auth: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()>
where
    A: AuthService + Sync + 'static,
{
    tokio::spawn(async move {
        let user = match auth.current_user().await {
            Ok(user) => user,
            Err(e) => {
                // Indistinguishable from "signed out" for the dashboard
                warn!("Session check failed, treating as signed out: {e}");
                None
            }
        };
        let _ = msg_tx.send(Message::SessionResolved { scope, user }).await;
    })
}

/// App list loader: one `list_apps()` request for `scope`
pub fn spawn_app_loader<P>(
    scope: ScopeId,
    apps: Arc<P>,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()>
where
    P: AppsService + Sync + 'static,
{
    tokio::spawn(async move {
        let result = apps.list_apps().await.map_err(|e| e.to_string());
        let _ = msg_tx.send(Message::AppsLoaded { scope, result }).await;
    })
}

/// Probe every `(app_id, url)` concurrently; report failures per card
pub fn spawn_logo_probes<P>(
    scope: ScopeId,
    logos: Vec<(String, String)>,
    apps: Arc<P>,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()>
where
    P: AppsService + Sync + 'static,
{
    tokio::spawn(async move {
        let mut probes = JoinSet::new();
        for (app_id, url) in logos {
            let apps = apps.clone();
            probes.spawn(async move {
                let result = apps.probe_logo(&url).await;
                (app_id, url, result)
            });
        }

        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok((app_id, url, Err(e))) => {
                    debug!("Logo probe failed for {app_id} ({url}): {e}");
                    let _ = msg_tx.send(Message::LogoLoadFailed { scope, app_id }).await;
                }
                Ok(_) => {}
                Err(e) => trace!("Logo probe task ended early: {e}"),
            }
        }
    })
}

/// Sign out. Not scoped: it must finish even though the dashboard closed.
pub fn spawn_logout<A>(auth: Arc<A>, msg_tx: mpsc::Sender<Message>) -> JoinHandle<()>
where
    A: AuthService + Sync + 'static,
{
    tokio::spawn(async move {
        let error = auth.logout().await.err().map(|e| e.to_string());
        let _ = msg_tx.send(Message::LoggedOut { error }).await;
    })
}

/// Verify and store a token entered on the login screen
pub fn spawn_sign_in<A>(token: String, auth: Arc<A>, msg_tx: mpsc::Sender<Message>) -> JoinHandle<()>
where
    A: AuthService + Sync + 'static,
{
    tokio::spawn(async move {
        let result = auth.sign_in(&token).await.map_err(|e| e.to_string());
        let _ = msg_tx.send(Message::SignInFinished { result }).await;
    })
}

/// Launch the browser without blocking the UI loop
pub fn spawn_open_url(url: String, browser: String, msg_tx: mpsc::Sender<Message>) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = crate::browser::open_url_in_browser(&url, &browser) {
            warn!("Failed to open {url}: {e}");
            let _ = msg_tx.blocking_send(Message::BrowserFailed {
                url,
                error: e.to_string(),
            });
        } else {
            info!("Opened {url} in browser");
        }
    });
}

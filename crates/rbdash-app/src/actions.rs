//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::handler::UpdateAction;
use crate::message::Message;
use crate::scope::{ScopeId, ScopeTaskMap};
use crate::spawn;
use rbdash_api::{AppsService, AuthService};
use rbdash_core::prelude::*;

/// The collaborators background tasks talk to
#[derive(Debug)]
pub struct Services<A, P> {
    pub auth: Arc<A>,
    pub apps: Arc<P>,
}

impl<A, P> Services<A, P> {
    pub fn new(auth: A, apps: P) -> Self {
        Self {
            auth: Arc::new(auth),
            apps: Arc::new(apps),
        }
    }
}

impl<A, P> Clone for Services<A, P> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            apps: self.apps.clone(),
        }
    }
}

/// Execute an action by spawning background work
pub fn handle_action<A, P>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    services: &Services<A, P>,
    scope_tasks: &ScopeTaskMap,
    browser: &str,
) where
    A: AuthService + Sync + 'static,
    P: AppsService + Sync + 'static,
{
    match action {
        UpdateAction::StartDashboard {
            scope,
            previous,
            fetch_apps,
        } => {
            if let Some(previous) = previous {
                close_scope(scope_tasks, previous);
            }
            let guard = spawn::spawn_session_guard(scope, services.auth.clone(), msg_tx.clone());
            scope_tasks.track(scope, guard);

            if fetch_apps {
                let loader = spawn::spawn_app_loader(scope, services.apps.clone(), msg_tx);
                scope_tasks.track(scope, loader);
            }
        }

        UpdateAction::FetchApps { scope } => {
            let loader = spawn::spawn_app_loader(scope, services.apps.clone(), msg_tx);
            scope_tasks.track(scope, loader);
        }

        UpdateAction::ProbeLogos { scope, logos } => {
            debug!("Probing {} logos for {scope}", logos.len());
            let probes = spawn::spawn_logo_probes(scope, logos, services.apps.clone(), msg_tx);
            scope_tasks.track(scope, probes);
        }

        UpdateAction::CloseScope { scope } => close_scope(scope_tasks, scope),

        UpdateAction::Logout { scope } => {
            if let Some(scope) = scope {
                close_scope(scope_tasks, scope);
            }
            spawn::spawn_logout(services.auth.clone(), msg_tx);
        }

        UpdateAction::SignIn { token } => {
            spawn::spawn_sign_in(token, services.auth.clone(), msg_tx);
        }

        UpdateAction::OpenUrl { url } => {
            spawn::spawn_open_url(url, browser.to_string(), msg_tx);
        }
    }
}

fn close_scope(scope_tasks: &ScopeTaskMap, scope: ScopeId) {
    let aborted = scope_tasks.abort(scope);
    if aborted > 0 {
        debug!("Closed {scope}, aborted {aborted} task(s)");
    } else {
        trace!("Closed {scope}");
    }
}

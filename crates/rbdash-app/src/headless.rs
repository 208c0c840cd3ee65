//! Headless dashboard run
//!
//! Drives the same guard → loader → view model pipeline as the TUI, without
//! a terminal, and stops at the first settled outcome.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::actions::Services;
use crate::config::Settings;
use crate::dashboard::QueryState;
use crate::message::Message;
use crate::process::process_message;
use crate::scope::ScopeTaskMap;
use crate::state::{AppState, UiMode};
use crate::view::{DashboardView, DisplayOptions};
use rbdash_api::{AppsService, AuthService};
use rbdash_core::prelude::*;
use rbdash_core::App;

/// How a headless run settled
#[derive(Debug, Clone)]
pub enum HeadlessOutcome {
    /// The guard found no user
    SignedOut,

    /// The loader failed
    Failed,

    /// The loader succeeded
    Loaded {
        view: Box<DashboardView>,
        apps: Vec<App>,
    },
}

/// Activate the dashboard once and wait for it to settle
pub async fn run_headless<A, P>(
    services: &Services<A, P>,
    mut settings: Settings,
    timeout: Duration,
) -> Result<HeadlessOutcome>
where
    A: AuthService + Sync + 'static,
    P: AppsService + Sync + 'static,
{
    // Nothing draws images here
    settings.ui.probe_logos = false;

    let (msg_tx, mut msg_rx) = mpsc::channel::<Message>(32);
    let scope_tasks = ScopeTaskMap::new();
    let mut state = AppState::with_settings(settings);

    process_message(
        &mut state,
        Message::ActivateDashboard,
        &msg_tx,
        services,
        &scope_tasks,
    );

    let settled = tokio::time::timeout(timeout, async {
        loop {
            if let Some(outcome) = settled_outcome(&state) {
                return Ok(outcome);
            }
            match msg_rx.recv().await {
                Some(msg) => process_message(&mut state, msg, &msg_tx, services, &scope_tasks),
                None => return Err(Error::ChannelClosed),
            }
        }
    })
    .await;

    scope_tasks.abort_all();

    match settled {
        Ok(result) => result,
        Err(_) => Err(Error::http(format!(
            "dashboard did not load within {}s",
            timeout.as_secs()
        ))),
    }
}

fn settled_outcome(state: &AppState) -> Option<HeadlessOutcome> {
    if state.ui_mode == UiMode::Login {
        return Some(HeadlessOutcome::SignedOut);
    }

    match &state.dashboard.apps {
        QueryState::Pending => None,
        QueryState::Loaded {
            refreshing: true, ..
        } => None,
        QueryState::Failed => Some(HeadlessOutcome::Failed),
        QueryState::Loaded { apps, .. } => Some(HeadlessOutcome::Loaded {
            view: Box::new(DashboardView::build(
                &state.dashboard,
                &state.session,
                &DisplayOptions::from_settings(&state.settings),
            )),
            apps: apps.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbdash_api::test_utils::{test_app, test_user, FakeApps, FakeAuth};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_signed_in_loads_apps() {
        let services = Services::new(
            FakeAuth::signed_in(test_user()),
            FakeApps::with_apps(vec![test_app("a1", "one"), test_app("a2", "two")]),
        );

        let outcome = run_headless(&services, Settings::default(), TIMEOUT)
            .await
            .unwrap();

        match outcome {
            HeadlessOutcome::Loaded { view, apps } => {
                assert_eq!(apps.len(), 2);
                assert_eq!(view.cards().len(), 2);
                assert_eq!(view.header.user_email.as_deref(), Some("dev@example.com"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(services.apps.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_signed_out_never_lists_apps() {
        let services = Services::new(FakeAuth::signed_out(), FakeApps::with_apps(vec![]));

        let outcome = run_headless(&services, Settings::default(), TIMEOUT)
            .await
            .unwrap();

        assert!(matches!(outcome, HeadlessOutcome::SignedOut));
        assert_eq!(services.apps.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_auth_failure_counts_as_signed_out() {
        let services = Services::new(FakeAuth::failing(), FakeApps::with_apps(vec![]));

        let outcome = run_headless(&services, Settings::default(), TIMEOUT)
            .await
            .unwrap();

        assert!(matches!(outcome, HeadlessOutcome::SignedOut));
    }

    #[tokio::test]
    async fn test_list_failure() {
        let services = Services::new(FakeAuth::signed_in(test_user()), FakeApps::failing());

        let outcome = run_headless(&services, Settings::default(), TIMEOUT)
            .await
            .unwrap();

        assert!(matches!(outcome, HeadlessOutcome::Failed));
    }
}

//! Tests for handler module

use std::time::Duration;

use tokio::sync::mpsc;

use super::*;
use crate::actions::Services;
use crate::dashboard::QueryState;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::process::process_message;
use crate::scope::ScopeTaskMap;
use crate::state::{AppPhase, AppState, UiMode};
use rbdash_api::test_utils::{test_app, test_user, FakeApps, FakeAuth};
use rbdash_core::User;

/// Activate the dashboard and return the scope it opened
fn activate(state: &mut AppState) -> ScopeId {
    let result = update(state, Message::ActivateDashboard);
    match result.action {
        Some(UpdateAction::StartDashboard { scope, .. }) => scope,
        other => panic!("expected StartDashboard, got {other:?}"),
    }
}

/// Dashboard with a committed user and a loaded list
fn loaded_state(apps: Vec<rbdash_core::App>) -> (AppState, ScopeId) {
    let mut state = AppState::new();
    let scope = activate(&mut state);
    update(
        &mut state,
        Message::SessionResolved {
            scope,
            user: Some(test_user()),
        },
    );
    update(
        &mut state,
        Message::AppsLoaded {
            scope,
            result: Ok(apps),
        },
    );
    (state, scope)
}

fn key(state: &mut AppState, key: InputKey) -> Option<Message> {
    handle_key(state, key)
}

// ─────────────────────────────────────────────────────────
// Session guard
// ─────────────────────────────────────────────────────────

#[test]
fn test_activation_starts_guard_only_without_user() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::ActivateDashboard);

    assert!(matches!(
        result.action,
        Some(UpdateAction::StartDashboard {
            previous: None,
            fetch_apps: false,
            ..
        })
    ));
    assert_eq!(state.ui_mode, UiMode::Dashboard);
    assert_eq!(state.dashboard.apps, QueryState::Pending);
}

#[test]
fn test_guard_commit_schedules_loader() {
    let mut state = AppState::new();
    let scope = activate(&mut state);

    let result = update(
        &mut state,
        Message::SessionResolved {
            scope,
            user: Some(test_user()),
        },
    );

    assert_eq!(
        state.session.current().map(|u| u.email.as_str()),
        Some("dev@example.com")
    );
    assert_eq!(result.action, Some(UpdateAction::FetchApps { scope }));
    assert!(state.dashboard.fetch_in_flight);
}

#[test]
fn test_guard_without_user_redirects_to_login() {
    let mut state = AppState::new();
    let scope = activate(&mut state);

    let result = update(&mut state, Message::SessionResolved { scope, user: None });

    assert_eq!(state.ui_mode, UiMode::Login);
    assert!(state.session.current().is_none());
    assert_eq!(state.dashboard.scope(), None);
    assert_eq!(result.action, Some(UpdateAction::CloseScope { scope }));
    assert!(state.login.notice.is_some());
}

#[test]
fn test_result_for_closed_scope_commits_nothing() {
    let mut state = AppState::new();
    let scope = activate(&mut state);

    // Navigate away before the guard answers
    update(&mut state, Message::OpenNewApp);
    assert_eq!(state.ui_mode, UiMode::NewApp);

    let result = update(
        &mut state,
        Message::SessionResolved {
            scope,
            user: Some(test_user()),
        },
    );

    assert!(state.session.current().is_none());
    assert_eq!(state.ui_mode, UiMode::NewApp);
    assert!(result.action.is_none());
    assert!(result.message.is_none());
}

#[test]
fn test_absent_result_for_closed_scope_does_not_navigate() {
    let mut state = AppState::new();
    let scope = activate(&mut state);
    update(&mut state, Message::Quit);

    update(&mut state, Message::SessionResolved { scope, user: None });

    assert_eq!(state.ui_mode, UiMode::Dashboard);
}

#[test]
fn test_stale_scope_result_after_reactivation_is_ignored() {
    let mut state = AppState::new();
    let old = activate(&mut state);
    let new = activate(&mut state);
    assert_ne!(old, new);

    update(&mut state, Message::SessionResolved { scope: old, user: None });
    assert_eq!(state.ui_mode, UiMode::Dashboard);

    update(
        &mut state,
        Message::SessionResolved {
            scope: new,
            user: Some(test_user()),
        },
    );
    assert!(state.session.is_signed_in());
}

#[test]
fn test_reactivation_with_user_fetches_immediately() {
    let (mut state, _) = loaded_state(vec![test_app("a1", "one")]);
    update(&mut state, Message::OpenNewApp);

    let result = update(&mut state, Message::BackToDashboard);
    let result = update(&mut state, result.message.unwrap());

    let scope = match result.action {
        Some(UpdateAction::StartDashboard {
            scope,
            fetch_apps: true,
            ..
        }) => scope,
        other => panic!("expected StartDashboard with fetch, got {other:?}"),
    };
    // Cached list stays visible while refetching
    assert!(state.dashboard.apps.is_refreshing());

    // Guard confirmation does not issue a second request
    let result = update(
        &mut state,
        Message::SessionResolved {
            scope,
            user: Some(test_user()),
        },
    );
    assert!(result.action.is_none());
}

#[test]
fn test_different_user_drops_cache() {
    let (mut state, _) = loaded_state(vec![test_app("a1", "one")]);
    let scope = activate(&mut state);

    update(
        &mut state,
        Message::SessionResolved {
            scope,
            user: Some(User::new("user-2", "other@example.com")),
        },
    );

    assert!(!state.dashboard.apps.is_refreshing());
    assert!(state.dashboard.apps.apps().is_empty());
}

// ─────────────────────────────────────────────────────────
// App list loader
// ─────────────────────────────────────────────────────────

#[test]
fn test_apps_loaded_keeps_backend_order() {
    let (state, _) = loaded_state(vec![
        test_app("z", "zeta"),
        test_app("a", "alpha"),
        test_app("m", "mu"),
    ]);

    let ids: Vec<_> = state
        .dashboard
        .apps
        .apps()
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(ids, ["z", "a", "m"]);
}

#[test]
fn test_apps_failure_sets_failed() {
    let mut state = AppState::new();
    let scope = activate(&mut state);
    update(
        &mut state,
        Message::SessionResolved {
            scope,
            user: Some(test_user()),
        },
    );

    update(
        &mut state,
        Message::AppsLoaded {
            scope,
            result: Err("apps: 500".into()),
        },
    );

    assert_eq!(state.dashboard.apps, QueryState::Failed);
}

#[test]
fn test_apps_for_closed_scope_are_dropped() {
    let mut state = AppState::new();
    let scope = activate(&mut state);
    update(
        &mut state,
        Message::SessionResolved {
            scope,
            user: Some(test_user()),
        },
    );
    update(&mut state, Message::OpenNewApp);

    update(
        &mut state,
        Message::AppsLoaded {
            scope,
            result: Ok(vec![test_app("a1", "one")]),
        },
    );

    assert_eq!(state.dashboard.apps, QueryState::Pending);
}

#[test]
fn test_loaded_logos_are_probed() {
    let mut app = test_app("a1", "one");
    app.logo = Some("s3://assets/a1.png".into());
    let plain = test_app("a2", "two");

    let mut state = AppState::new();
    let scope = activate(&mut state);
    update(
        &mut state,
        Message::SessionResolved {
            scope,
            user: Some(test_user()),
        },
    );
    let result = update(
        &mut state,
        Message::AppsLoaded {
            scope,
            result: Ok(vec![app, plain]),
        },
    );

    assert_eq!(
        result.action,
        Some(UpdateAction::ProbeLogos {
            scope,
            logos: vec![(
                "a1".to_string(),
                "https://assets.s3.amazonaws.com/a1.png".to_string()
            )],
        })
    );
}

#[test]
fn test_probing_can_be_disabled() {
    let mut app = test_app("a1", "one");
    app.logo = Some("https://cdn.example.com/a1.png".into());

    let mut state = AppState::new();
    state.settings.ui.probe_logos = false;
    let scope = activate(&mut state);
    update(
        &mut state,
        Message::SessionResolved {
            scope,
            user: Some(test_user()),
        },
    );
    let result = update(
        &mut state,
        Message::AppsLoaded {
            scope,
            result: Ok(vec![app]),
        },
    );

    assert!(result.action.is_none());
}

#[test]
fn test_logo_failure_recorded_per_card() {
    let (mut state, scope) = loaded_state(vec![test_app("a1", "one"), test_app("a2", "two")]);

    update(
        &mut state,
        Message::LogoLoadFailed {
            scope,
            app_id: "a2".into(),
        },
    );

    assert!(state.dashboard.logo_failures.contains("a2"));
    assert!(!state.dashboard.logo_failures.contains("a1"));
}

#[test]
fn test_refresh_requires_session_and_idle_loader() {
    let mut state = AppState::new();
    activate(&mut state);
    assert!(update(&mut state, Message::Refresh).action.is_none());

    let (mut state, scope) = loaded_state(vec![test_app("a1", "one")]);
    let result = update(&mut state, Message::Refresh);
    assert_eq!(result.action, Some(UpdateAction::FetchApps { scope }));
    assert!(state.dashboard.apps.is_refreshing());

    // Already in flight
    assert!(update(&mut state, Message::Refresh).action.is_none());
}

// ─────────────────────────────────────────────────────────
// Navigation
// ─────────────────────────────────────────────────────────

#[test]
fn test_enter_opens_detail_and_closes_scope() {
    let (mut state, scope) = loaded_state(vec![test_app("a1", "one"), test_app("a2", "two")]);
    update(&mut state, Message::SelectNext);

    let msg = key(&mut state, InputKey::Enter).unwrap();
    let result = update(&mut state, msg);

    assert_eq!(
        state.ui_mode,
        UiMode::AppDetail {
            app_id: "a2".into()
        }
    );
    assert_eq!(result.action, Some(UpdateAction::CloseScope { scope }));
}

#[test]
fn test_enter_on_empty_list_follows_call_to_action() {
    let (mut state, _) = loaded_state(vec![]);

    let result = update(&mut state, Message::OpenSelected);
    assert!(matches!(result.message, Some(Message::OpenNewApp)));

    update(&mut state, Message::OpenNewApp);
    assert_eq!(state.ui_mode, UiMode::NewApp);
}

#[test]
fn test_production_link_opens_without_navigation() {
    let mut app = test_app("a1", "one");
    app.production_url = Some("my-app.example.com".into());
    app.prod_version = Some("3".into());
    let (mut state, _) = loaded_state(vec![app]);

    let msg = key(&mut state, InputKey::Char('o')).unwrap();
    let result = update(&mut state, msg);

    assert_eq!(
        result.action,
        Some(UpdateAction::OpenUrl {
            url: "https://my-app.example.com".into()
        })
    );
    assert_eq!(state.ui_mode, UiMode::Dashboard);
    assert!(state.dashboard.scope().is_some());
}

#[test]
fn test_unpublished_link_shows_status() {
    let mut app = test_app("a1", "one");
    app.production_url = Some("my-app.example.com".into());
    let (mut state, _) = loaded_state(vec![app]);

    let result = update(&mut state, Message::OpenProductionLink);

    assert!(result.action.is_none());
    assert_eq!(state.status.as_deref(), Some("Not published yet"));
}

#[test]
fn test_detail_escape_reactivates_dashboard() {
    let (mut state, first) = loaded_state(vec![test_app("a1", "one")]);
    update(&mut state, Message::OpenSelected);

    let msg = key(&mut state, InputKey::Esc).unwrap();
    let follow_up = update(&mut state, msg).message.unwrap();
    let result = update(&mut state, follow_up);

    assert_eq!(state.ui_mode, UiMode::Dashboard);
    match result.action {
        Some(UpdateAction::StartDashboard { scope, .. }) => assert!(scope > first),
        other => panic!("expected StartDashboard, got {other:?}"),
    }
}

#[test]
fn test_new_app_view_opens_web_console() {
    let mut state = AppState::new();
    state.ui_mode = UiMode::NewApp;

    let msg = key(&mut state, InputKey::Char('o')).unwrap();
    let result = update(&mut state, msg);

    assert_eq!(
        result.action,
        Some(UpdateAction::OpenUrl {
            url: "http://localhost:5173/apps/new".into()
        })
    );
}

#[test]
fn test_dashboard_keys() {
    let state = AppState::new();
    assert!(matches!(handle_key(&state, InputKey::Char('q')), Some(Message::Quit)));
    assert!(matches!(handle_key(&state, InputKey::Char('r')), Some(Message::Refresh)));
    assert!(matches!(handle_key(&state, InputKey::Char('n')), Some(Message::OpenNewApp)));
    assert!(matches!(
        handle_key(&state, InputKey::Char('L')),
        Some(Message::RequestLogout)
    ));
    assert!(matches!(handle_key(&state, InputKey::Char('j')), Some(Message::SelectNext)));
    assert!(matches!(
        handle_key(&state, InputKey::Up),
        Some(Message::SelectPrevious)
    ));
}

#[test]
fn test_ctrl_c_quits_from_every_view() {
    let mut state = AppState::new();
    for mode in [
        UiMode::Dashboard,
        UiMode::Login,
        UiMode::NewApp,
        UiMode::AppDetail {
            app_id: "a1".into(),
        },
    ] {
        state.ui_mode = mode;
        assert!(matches!(
            handle_key(&state, InputKey::CharCtrl('c')),
            Some(Message::Quit)
        ));
    }
}

#[test]
fn test_quit_closes_scope() {
    let mut state = AppState::new();
    let scope = activate(&mut state);

    let result = update(&mut state, Message::Quit);

    assert_eq!(state.phase, AppPhase::Quitting);
    assert!(state.should_quit());
    assert_eq!(result.action, Some(UpdateAction::CloseScope { scope }));
}

// ─────────────────────────────────────────────────────────
// Logout
// ─────────────────────────────────────────────────────────

#[test]
fn test_logout_flow() {
    let (mut state, scope) = loaded_state(vec![test_app("a1", "one")]);

    let follow_up = update(&mut state, Message::RequestLogout).message.unwrap();
    let result = update(&mut state, follow_up);

    assert_eq!(
        result.action,
        Some(UpdateAction::Logout { scope: Some(scope) })
    );
    assert!(state.logging_out);

    update(&mut state, Message::LoggedOut { error: None });

    assert_eq!(state.ui_mode, UiMode::Login);
    assert!(state.session.current().is_none());
    assert_eq!(state.dashboard.apps, QueryState::Pending);
    assert!(!state.logging_out);
}

#[test]
fn test_logout_failure_still_signs_out_locally() {
    let (mut state, _) = loaded_state(vec![]);
    update(&mut state, Message::ConfirmLogout);

    update(
        &mut state,
        Message::LoggedOut {
            error: Some("connection refused".into()),
        },
    );

    assert_eq!(state.ui_mode, UiMode::Login);
    assert!(!state.session.is_signed_in());
}

#[test]
fn test_navigation_is_frozen_while_logging_out() {
    let (mut state, _) = loaded_state(vec![test_app("a1", "one")]);
    update(&mut state, Message::ConfirmLogout);

    assert!(update(&mut state, Message::OpenSelected).action.is_none());
    assert!(update(&mut state, Message::OpenNewApp).action.is_none());
    assert!(update(&mut state, Message::BackToDashboard).message.is_none());
    assert!(update(&mut state, Message::ActivateDashboard).action.is_none());
    assert_eq!(state.ui_mode, UiMode::Dashboard);
    assert_eq!(state.dashboard.scope(), None);
}

#[test]
fn test_late_results_after_logout_commit_nothing() {
    let (mut state, _) = loaded_state(vec![test_app("a1", "one")]);
    update(&mut state, Message::ConfirmLogout);

    // A scope that is somehow still open when the logout answer lands
    state.logging_out = false;
    let reopened = activate(&mut state);
    state.logging_out = true;

    let result = update(&mut state, Message::LoggedOut { error: None });
    assert_eq!(
        result.action,
        Some(UpdateAction::CloseScope { scope: reopened })
    );
    assert_eq!(state.dashboard.scope(), None);

    let result = update(
        &mut state,
        Message::SessionResolved {
            scope: reopened,
            user: Some(test_user()),
        },
    );
    assert!(result.action.is_none());
    update(
        &mut state,
        Message::AppsLoaded {
            scope: reopened,
            result: Ok(vec![test_app("a1", "one")]),
        },
    );

    assert_eq!(state.ui_mode, UiMode::Login);
    assert!(state.session.current().is_none());
    assert_eq!(state.dashboard.apps, QueryState::Pending);
}

#[test]
fn test_logout_confirmation() {
    let (mut state, _) = loaded_state(vec![]);
    state.settings.behavior.confirm_logout = true;

    let result = update(&mut state, Message::RequestLogout);
    assert!(result.message.is_none());
    assert!(state.confirm_logout);

    // Dialog keys take over
    assert!(matches!(
        handle_key(&state, InputKey::Char('n')),
        Some(Message::CancelLogout)
    ));
    assert!(matches!(
        handle_key(&state, InputKey::Char('y')),
        Some(Message::ConfirmLogout)
    ));

    update(&mut state, Message::CancelLogout);
    assert!(!state.confirm_logout);
    assert!(!state.logging_out);
}

// ─────────────────────────────────────────────────────────
// Login
// ─────────────────────────────────────────────────────────

fn login_state() -> AppState {
    let mut state = AppState::new();
    let scope = activate(&mut state);
    update(&mut state, Message::SessionResolved { scope, user: None });
    state
}

#[test]
fn test_login_typing_and_backspace() {
    let mut state = login_state();

    for c in "tok".chars() {
        let msg = key(&mut state, InputKey::Char(c)).unwrap();
        update(&mut state, msg);
    }
    assert_eq!(state.login.input, "tok");

    let msg = key(&mut state, InputKey::Backspace).unwrap();
    update(&mut state, msg);
    assert_eq!(state.login.input, "to");

    let msg = key(&mut state, InputKey::CharCtrl('u')).unwrap();
    update(&mut state, msg);
    assert_eq!(state.login.input, "");
}

#[test]
fn test_login_letters_are_not_shortcuts() {
    let state = login_state();
    assert!(matches!(
        handle_key(&state, InputKey::Char('q')),
        Some(Message::LoginInput { .. })
    ));
}

#[test]
fn test_submit_blank_token() {
    let mut state = login_state();
    let result = update(&mut state, Message::SubmitToken);
    assert!(result.action.is_none());
    assert!(state.login.error.is_some());
}

#[test]
fn test_submit_token_and_accept() {
    let mut state = login_state();
    update(
        &mut state,
        Message::LoginInput {
            text: " secret ".into(),
        },
    );

    let result = update(&mut state, Message::SubmitToken);
    assert_eq!(
        result.action,
        Some(UpdateAction::SignIn {
            token: "secret".into()
        })
    );
    assert!(state.login.submitting);

    let result = update(
        &mut state,
        Message::SignInFinished {
            result: Ok(Some(test_user())),
        },
    );
    assert!(matches!(result.message, Some(Message::ActivateDashboard)));
    // The guard, not sign-in, commits the user
    assert!(!state.session.is_signed_in());
    assert!(state.login.input.is_empty());
}

#[test]
fn test_rejected_token() {
    let mut state = login_state();
    update(&mut state, Message::LoginInput { text: "bad".into() });
    update(&mut state, Message::SubmitToken);

    update(&mut state, Message::SignInFinished { result: Ok(None) });

    assert_eq!(state.ui_mode, UiMode::Login);
    assert!(!state.login.submitting);
    assert!(state.login.error.is_some());
    assert!(state.login.input.is_empty());
}

// ─────────────────────────────────────────────────────────
// Async flows through process_message
// ─────────────────────────────────────────────────────────

async fn drain_until<F>(
    state: &mut AppState,
    rx: &mut mpsc::Receiver<Message>,
    tx: &mpsc::Sender<Message>,
    services: &Services<FakeAuth, FakeApps>,
    tasks: &ScopeTaskMap,
    done: F,
) where
    F: Fn(&AppState) -> bool,
{
    while !done(state) {
        let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for message")
            .expect("channel closed");
        process_message(state, msg, tx, services, tasks);
    }
}

#[tokio::test]
async fn test_guard_then_loader_end_to_end() {
    let mut broken = test_app("a2", "two");
    broken.logo = Some("https://cdn.example.com/missing.png".into());
    let services = Services::new(
        FakeAuth::signed_in(test_user()),
        FakeApps::with_apps(vec![test_app("a1", "one"), broken])
            .with_broken_logo("https://cdn.example.com/missing.png"),
    );
    let (tx, mut rx) = mpsc::channel(16);
    let tasks = ScopeTaskMap::new();
    let mut state = AppState::new();

    process_message(&mut state, Message::ActivateDashboard, &tx, &services, &tasks);
    drain_until(&mut state, &mut rx, &tx, &services, &tasks, |s| {
        s.dashboard.logo_failures.contains("a2")
    })
    .await;

    assert!(state.session.is_signed_in());
    assert_eq!(state.dashboard.apps.apps().len(), 2);
    assert_eq!(services.auth.current_user_calls(), 1);
    assert_eq!(services.apps.list_calls(), 1);
}

#[tokio::test]
async fn test_leaving_before_guard_answers_aborts_the_guard() {
    let services = Services::new(
        FakeAuth::signed_in(test_user()).with_delay(Duration::from_millis(200)),
        FakeApps::with_apps(vec![test_app("a1", "one")]),
    );
    let (tx, mut rx) = mpsc::channel(16);
    let tasks = ScopeTaskMap::new();
    let mut state = AppState::new();

    process_message(&mut state, Message::ActivateDashboard, &tx, &services, &tasks);
    let scope = state.dashboard.scope().unwrap();
    process_message(&mut state, Message::OpenNewApp, &tx, &services, &tasks);

    assert_eq!(tasks.running(scope), 0);

    // Nothing arrives: the guard task was aborted
    let late = tokio::time::timeout(Duration::from_millis(400), rx.recv()).await;
    assert!(late.is_err());

    assert!(!state.session.is_signed_in());
    assert_eq!(state.ui_mode, UiMode::NewApp);
    assert_eq!(services.apps.list_calls(), 0);
}

#[tokio::test]
async fn test_logout_end_to_end() {
    let services = Services::new(
        FakeAuth::signed_in(test_user()),
        FakeApps::with_apps(vec![]),
    );
    let (tx, mut rx) = mpsc::channel(16);
    let tasks = ScopeTaskMap::new();
    let mut state = AppState::new();

    process_message(&mut state, Message::ActivateDashboard, &tx, &services, &tasks);
    drain_until(&mut state, &mut rx, &tx, &services, &tasks, |s| {
        matches!(s.dashboard.apps, QueryState::Loaded { .. })
    })
    .await;

    process_message(&mut state, Message::RequestLogout, &tx, &services, &tasks);
    drain_until(&mut state, &mut rx, &tx, &services, &tasks, |s| {
        s.ui_mode == UiMode::Login
    })
    .await;

    assert_eq!(services.auth.logout_calls(), 1);
    assert!(!state.session.is_signed_in());
}

#[tokio::test]
async fn test_sign_in_then_dashboard_loads() {
    let services = Services::new(
        FakeAuth::signed_out().accepting_token("good-token"),
        FakeApps::with_apps(vec![test_app("a1", "one")]),
    );
    let (tx, mut rx) = mpsc::channel(16);
    let tasks = ScopeTaskMap::new();
    let mut state = AppState::new();

    process_message(&mut state, Message::ActivateDashboard, &tx, &services, &tasks);
    drain_until(&mut state, &mut rx, &tx, &services, &tasks, |s| {
        s.ui_mode == UiMode::Login
    })
    .await;

    process_message(
        &mut state,
        Message::LoginInput {
            text: "good-token".into(),
        },
        &tx,
        &services,
        &tasks,
    );
    process_message(&mut state, Message::SubmitToken, &tx, &services, &tasks);
    drain_until(&mut state, &mut rx, &tx, &services, &tasks, |s| {
        matches!(s.dashboard.apps, QueryState::Loaded { .. })
    })
    .await;

    assert_eq!(state.ui_mode, UiMode::Dashboard);
    assert!(state.session.is_signed_in());
}

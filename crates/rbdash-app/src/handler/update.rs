//! Main update function - handles state transitions (TEA pattern)

use crate::dashboard::QueryState;
use crate::message::Message;
use crate::scope::ScopeId;
use crate::state::{AppPhase, AppState, UiMode};
use crate::view::{self, ProductionView};
use rbdash_core::prelude::*;
use rbdash_core::{normalize_logo_url, App, User};

use super::{keys::handle_key, UpdateAction, UpdateResult};

const SIGN_IN_NOTICE: &str = "Sign in to view your apps.";
const SIGNED_OUT_NOTICE: &str = "You have been signed out.";

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            state.tick = state.tick.wrapping_add(1);
            UpdateResult::none()
        }

        Message::Quit => {
            state.phase = AppPhase::Quitting;
            let closed = state.dashboard.close_scope();
            UpdateResult::maybe_action(closed.map(|scope| UpdateAction::CloseScope { scope }))
        }

        // ─────────────────────────────────────────────────────────
        // Dashboard Lifecycle
        // ─────────────────────────────────────────────────────────
        Message::ActivateDashboard => activate_dashboard(state),

        Message::SessionResolved { scope, user } => handle_session_resolved(state, scope, user),

        Message::AppsLoaded { scope, result } => handle_apps_loaded(state, scope, result),

        Message::LogoLoadFailed { scope, app_id } => {
            if !state.dashboard.is_active(scope) {
                trace!("Discarding logo failure for {app_id} from closed {scope}");
                return UpdateResult::none();
            }
            debug!("Logo for {app_id} failed to load; using fallback");
            state.dashboard.mark_logo_failed(app_id);
            UpdateResult::none()
        }

        Message::Refresh => refresh(state),

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::SelectNext => {
            if state.ui_mode == UiMode::Dashboard {
                state.dashboard.select_next();
            }
            UpdateResult::none()
        }

        Message::SelectPrevious => {
            if state.ui_mode == UiMode::Dashboard {
                state.dashboard.select_previous();
            }
            UpdateResult::none()
        }

        Message::OpenSelected => open_selected(state),

        Message::OpenProductionLink => open_production_link(state),

        Message::OpenNewApp => {
            if state.logging_out {
                return UpdateResult::none();
            }
            leave_dashboard(state, UiMode::NewApp)
        }

        Message::OpenWebConsole => UpdateResult::action(UpdateAction::OpenUrl {
            url: view::new_app_url(&state.settings),
        }),

        Message::BackToDashboard => {
            if state.logging_out {
                return UpdateResult::none();
            }
            UpdateResult::message(Message::ActivateDashboard)
        }

        Message::BrowserFailed { url, error } => {
            state.status = Some(format!("Could not open {url}: {error}"));
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Logout
        // ─────────────────────────────────────────────────────────
        Message::RequestLogout => {
            if state.logging_out {
                return UpdateResult::none();
            }
            if state.settings.behavior.confirm_logout {
                state.confirm_logout = true;
                UpdateResult::none()
            } else {
                UpdateResult::message(Message::ConfirmLogout)
            }
        }

        Message::ConfirmLogout => {
            state.confirm_logout = false;
            if state.logging_out {
                return UpdateResult::none();
            }
            state.logging_out = true;
            let scope = state.dashboard.close_scope();
            UpdateResult::action(UpdateAction::Logout { scope })
        }

        Message::CancelLogout => {
            state.confirm_logout = false;
            UpdateResult::none()
        }

        Message::LoggedOut { error } => {
            if let Some(error) = error {
                warn!("Logout request failed: {error}");
            }
            state.logging_out = false;
            state.session.clear();
            let closed = state.dashboard.close_scope();
            state.dashboard.clear_cache();
            state.login.reset(Some(SIGNED_OUT_NOTICE));
            state.ui_mode = UiMode::Login;
            UpdateResult::maybe_action(closed.map(|scope| UpdateAction::CloseScope { scope }))
        }

        // ─────────────────────────────────────────────────────────
        // Login
        // ─────────────────────────────────────────────────────────
        Message::LoginInput { text } => {
            if state.ui_mode == UiMode::Login && !state.login.submitting {
                state.login.input = text;
                state.login.error = None;
            }
            UpdateResult::none()
        }

        Message::SubmitToken => {
            if state.ui_mode != UiMode::Login || state.login.submitting {
                return UpdateResult::none();
            }
            let token = state.login.input.trim().to_string();
            if token.is_empty() {
                state.login.error = Some("Enter an API token".to_string());
                return UpdateResult::none();
            }
            state.login.submitting = true;
            state.login.error = None;
            UpdateResult::action(UpdateAction::SignIn { token })
        }

        Message::SignInFinished { result } => {
            state.login.submitting = false;
            match result {
                Ok(Some(user)) => {
                    info!("Token accepted for {}", user.email);
                    state.login.reset(None);
                    UpdateResult::message(Message::ActivateDashboard)
                }
                Ok(None) => {
                    state.login.input.clear();
                    state.login.error = Some("That token was not accepted".to_string());
                    UpdateResult::none()
                }
                Err(e) => {
                    state.login.error = Some(format!("Sign-in failed: {e}"));
                    UpdateResult::none()
                }
            }
        }
    }
}

/// Open a new scope and start the session guard. If a user is already
/// known the loader starts alongside it. Ignored while a logout is pending.
fn activate_dashboard(state: &mut AppState) -> UpdateResult {
    if state.logging_out {
        debug!("Dashboard activation ignored: logout in progress");
        return UpdateResult::none();
    }
    state.ui_mode = UiMode::Dashboard;
    state.status = None;
    state.confirm_logout = false;

    let (scope, previous) = state.dashboard.open_scope();
    let fetch_apps = state.session.is_signed_in();
    if fetch_apps {
        state.dashboard.begin_fetch(scope);
    }

    debug!("Dashboard activated ({scope}), fetch_apps={fetch_apps}");
    UpdateResult::action(UpdateAction::StartDashboard {
        scope,
        previous,
        fetch_apps,
    })
}

fn handle_session_resolved(
    state: &mut AppState,
    scope: ScopeId,
    user: Option<User>,
) -> UpdateResult {
    if !state.dashboard.is_active(scope) {
        trace!("Discarding session result from closed {scope}");
        return UpdateResult::none();
    }

    let Some(user) = user else {
        info!("No authenticated user; redirecting to login");
        state.session.clear();
        state.dashboard.close_scope();
        state.dashboard.clear_cache();
        state.login.reset(Some(SIGN_IN_NOTICE));
        state.ui_mode = UiMode::Login;
        return UpdateResult::action(UpdateAction::CloseScope { scope });
    };

    let user_id = user.id.clone();
    if let Some(previous) = state.session.commit(user) {
        if previous.id != user_id {
            info!("Session user changed; dropping cached apps");
            state.dashboard.clear_cache();
        }
    }

    if state.dashboard.fetched_in(scope) {
        return UpdateResult::none();
    }
    state.dashboard.begin_fetch(scope);
    UpdateResult::action(UpdateAction::FetchApps { scope })
}

fn handle_apps_loaded(
    state: &mut AppState,
    scope: ScopeId,
    result: Result<Vec<App>, String>,
) -> UpdateResult {
    if !state.dashboard.is_active(scope) {
        trace!("Discarding app list from closed {scope}");
        return UpdateResult::none();
    }

    match &result {
        Ok(apps) => debug!("Loaded {} apps", apps.len()),
        Err(e) => warn!("Failed to load apps: {e}"),
    }
    state.dashboard.finish_fetch(result);

    if !state.settings.ui.probe_logos {
        return UpdateResult::none();
    }

    let logos: Vec<(String, String)> = state
        .dashboard
        .apps
        .apps()
        .iter()
        .filter_map(|app| normalize_logo_url(app.logo.as_deref()).map(|url| (app.id.clone(), url)))
        .collect();

    if logos.is_empty() {
        UpdateResult::none()
    } else {
        UpdateResult::action(UpdateAction::ProbeLogos { scope, logos })
    }
}

fn refresh(state: &mut AppState) -> UpdateResult {
    let Some(scope) = state.dashboard.scope() else {
        return UpdateResult::none();
    };
    if !state.session.is_signed_in() {
        debug!("Refresh ignored: no session user yet");
        return UpdateResult::none();
    }
    if state.dashboard.fetch_in_flight {
        return UpdateResult::none();
    }

    state.status = None;
    state.dashboard.begin_fetch(scope);
    UpdateResult::action(UpdateAction::FetchApps { scope })
}

fn open_selected(state: &mut AppState) -> UpdateResult {
    if state.ui_mode != UiMode::Dashboard || state.logging_out {
        return UpdateResult::none();
    }

    // Empty list: Enter follows the "Create App" call to action
    if matches!(&state.dashboard.apps, QueryState::Loaded { apps, .. } if apps.is_empty()) {
        return UpdateResult::message(Message::OpenNewApp);
    }

    match state.dashboard.selected_app().map(|app| app.id.clone()) {
        Some(app_id) => leave_dashboard(state, UiMode::AppDetail { app_id }),
        None => UpdateResult::none(),
    }
}

fn open_production_link(state: &mut AppState) -> UpdateResult {
    let app = match &state.ui_mode {
        UiMode::Dashboard => state.dashboard.selected_app(),
        UiMode::AppDetail { app_id } => state.dashboard.find_app(app_id),
        _ => None,
    };

    match app.and_then(view::production_view) {
        Some(ProductionView::Published { url, .. }) => {
            UpdateResult::action(UpdateAction::OpenUrl { url })
        }
        Some(ProductionView::Unpublished { label }) => {
            state.status = Some(label);
            UpdateResult::none()
        }
        None => UpdateResult::none(),
    }
}

/// Switch to a secondary view, closing the dashboard scope
fn leave_dashboard(state: &mut AppState, mode: UiMode) -> UpdateResult {
    state.ui_mode = mode;
    state.confirm_logout = false;
    let closed = state.dashboard.close_scope();
    UpdateResult::maybe_action(closed.map(|scope| UpdateAction::CloseScope { scope }))
}

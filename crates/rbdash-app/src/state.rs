//! Application state (Model in TEA pattern)

use crate::config::Settings;
use crate::dashboard::DashboardState;
use crate::session_store::SessionStore;

/// Lifecycle phase of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Current view (route)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiMode {
    /// App list
    #[default]
    Dashboard,

    /// Sign-in screen
    Login,

    /// Full record of one app
    AppDetail { app_id: String },

    /// Pointer to the web console's app creation page
    NewApp,
}

/// Token entry on the login screen
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    /// Raw token text (rendered masked)
    pub input: String,

    /// Why the login screen is showing
    pub notice: Option<String>,

    /// Last sign-in error
    pub error: Option<String>,

    /// Waiting for the backend to verify the token
    pub submitting: bool,
}

impl LoginState {
    pub fn reset(&mut self, notice: Option<&str>) {
        self.input.clear();
        self.error = None;
        self.submitting = false;
        self.notice = notice.map(str::to_string);
    }
}

/// Complete application state
#[derive(Debug, Default)]
pub struct AppState {
    pub phase: AppPhase,

    pub ui_mode: UiMode,

    pub settings: Settings,

    /// Authenticated user, written only by the session guard
    pub session: SessionStore,

    pub dashboard: DashboardState,

    pub login: LoginState,

    /// Logout confirmation dialog is showing
    pub confirm_logout: bool,

    /// Logout request is running
    pub logging_out: bool,

    /// Transient status line (e.g. browser errors)
    pub status: Option<String>,

    /// Animation frame counter
    pub tick: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}

//! Message types for the application (TEA pattern)

use crate::input_key::InputKey;
use crate::scope::ScopeId;
use rbdash_core::{App, User};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (spinner animation)
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Dashboard Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Show the dashboard and open a new view scope
    ActivateDashboard,

    /// Session guard answer; `None` also covers a failed query
    SessionResolved {
        scope: ScopeId,
        user: Option<User>,
    },

    /// App list loader answer
    AppsLoaded {
        scope: ScopeId,
        result: Result<Vec<App>, String>,
    },

    /// A card's logo could not be fetched
    LogoLoadFailed { scope: ScopeId, app_id: String },

    /// Re-issue the app list request (`r`)
    Refresh,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    SelectNext,
    SelectPrevious,

    /// Open the selected card's detail view (or the empty-state CTA)
    OpenSelected,

    /// Open the production link of the selected or viewed app in the browser
    OpenProductionLink,

    /// Show the "New App" view
    OpenNewApp,

    /// Open the web console's new-app page in the browser
    OpenWebConsole,

    /// Leave a secondary view and reactivate the dashboard
    BackToDashboard,

    /// Opening a URL in the browser failed
    BrowserFailed { url: String, error: String },

    // ─────────────────────────────────────────────────────────
    // Logout
    // ─────────────────────────────────────────────────────────
    /// `L` pressed; may show a confirmation first
    RequestLogout,
    ConfirmLogout,
    CancelLogout,

    /// Logout finished; `error` is set if the backend call failed
    LoggedOut { error: Option<String> },

    // ─────────────────────────────────────────────────────────
    // Login
    // ─────────────────────────────────────────────────────────
    /// Replace the token input text
    LoginInput { text: String },

    /// Verify and store the entered token
    SubmitToken,

    /// Sign-in answer; `Ok(None)` means the token was rejected
    SignInFinished {
        result: Result<Option<User>, String>,
    },
}

//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes

pub(crate) mod keys;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use crate::message::Message;
use crate::scope::ScopeId;

pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Start the session guard for a freshly opened scope, optionally
    /// together with the app list loader. `previous` is a scope that was
    /// still open and must be torn down.
    StartDashboard {
        scope: ScopeId,
        previous: Option<ScopeId>,
        fetch_apps: bool,
    },

    /// Run the app list loader
    FetchApps { scope: ScopeId },

    /// Probe `(app_id, url)` logo pairs
    ProbeLogos {
        scope: ScopeId,
        logos: Vec<(String, String)>,
    },

    /// Abort everything the scope started
    CloseScope { scope: ScopeId },

    /// Close `scope` (if any) and sign out
    Logout { scope: Option<ScopeId> },

    /// Verify and store a token
    SignIn { token: String },

    /// Open a URL in the browser
    OpenUrl { url: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    /// Action only when there is one
    pub fn maybe_action(action: Option<UpdateAction>) -> Self {
        Self {
            message: None,
            action,
        }
    }
}

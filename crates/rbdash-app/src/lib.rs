//! rbdash-app - Application state and orchestration for the RapidBuild dashboard
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! dashboard: messages, the `update()` state machine, view scopes, the
//! session guard and app list loader tasks, the pure view model, and
//! configuration loading.

pub mod actions;
pub mod browser;
pub mod config;
pub mod dashboard;
pub mod handler;
pub mod headless;
pub mod input_key;
pub mod message;
pub mod process;
pub mod scope;
pub mod session_store;
pub mod signals;
pub mod spawn;
pub mod state;
pub mod view;

// Re-export primary types
pub use actions::Services;
pub use dashboard::{DashboardState, QueryState};
pub use handler::{UpdateAction, UpdateResult};
pub use headless::{run_headless, HeadlessOutcome};
pub use message::Message;
pub use scope::{ScopeId, ScopeTaskMap};
pub use session_store::SessionStore;
pub use state::{AppPhase, AppState, UiMode};

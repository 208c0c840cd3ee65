//! rbdash-tui - Terminal UI for the RapidBuild dashboard
//!
//! This crate provides the ratatui-based terminal interface. It wires the
//! HTTP collaborators from rbdash-api into the rbdash-app state machine and
//! draws the dashboard view model with terminal widgets.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;

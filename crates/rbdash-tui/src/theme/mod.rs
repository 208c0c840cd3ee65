//! Theme for the dashboard TUI.
//!
//! - `palette` holds raw color constants
//! - `styles` holds semantic style builders
//! - `icons` resolves glyphs for the configured icon mode

pub mod icons;
pub mod palette;
pub mod styles;

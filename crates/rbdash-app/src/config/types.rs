//! Configuration types for the dashboard
//!
//! Defines:
//! - `Settings` - Global application settings
//! - Section structs and enums

use serde::{Deserialize, Serialize};

use rbdash_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use rbdash_core::DEFAULT_DATE_FORMAT;

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Backend origin; the `/api` prefix is appended per request
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Web console origin, used for pages the terminal client doesn't offer
    #[serde(default = "default_web_url")]
    pub web_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            web_url: default_web_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Icon set selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Safe Unicode characters that work in all terminals
    #[default]
    Unicode,
    /// Nerd Font glyphs, requires a Nerd Font installed in the terminal
    NerdFonts,
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::NerdFonts => write!(f, "nerd_fonts"),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// chrono format string for the card's created date
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Check logo URLs in the background and fall back on failure
    #[serde(default = "default_true")]
    pub probe_logos: bool,

    #[serde(default)]
    pub icons: IconMode,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            probe_logos: true,
            icons: IconMode::default(),
        }
    }
}

/// Behavior settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Ask before signing out
    #[serde(default)]
    pub confirm_logout: bool,

    /// Browser command for opening links (empty = platform default)
    #[serde(default)]
    pub browser: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_web_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

//! Settings loader for `{config_dir}/rapidbuild/config.toml`

use std::path::{Path, PathBuf};

use super::types::Settings;
use rbdash_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "rapidbuild";

/// Environment override for the backend origin
pub const BASE_URL_ENV: &str = "RAPIDBUILD_API_BASE_URL";

/// `{config_dir}/rapidbuild`
pub fn default_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| Error::config("could not determine config directory"))
}

/// Load settings from `config_dir/config.toml`.
///
/// Missing file → defaults. Unreadable or malformed file → warning + defaults.
pub fn load_settings(config_dir: &Path) -> Settings {
    let config_path = config_dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default `config.toml` unless one already exists.
///
/// Returns the config file path.
pub fn init_config_dir(config_dir: &Path) -> Result<PathBuf> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", config_dir, e)))?;
    }

    let config_path = config_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path)
}

const DEFAULT_CONFIG: &str = r#"# RapidBuild Dashboard Configuration

[api]
base_url = "http://localhost:8092"  # Overridden by RAPIDBUILD_API_BASE_URL or --api-url
web_url = "http://localhost:5173"   # Web console, used for "New App"
timeout_ms = 10000

[ui]
date_format = "%x"      # chrono format for created dates
probe_logos = true      # Check logo URLs and fall back to the folder icon
icons = "unicode"       # "unicode" or "nerd_fonts"

[behavior]
confirm_logout = false
browser = ""            # Empty = system default
"#;

/// Pick the backend origin: CLI flag, then environment, then config
pub fn resolve_base_url(settings: &Settings, env: Option<String>, cli: Option<&str>) -> String {
    let non_empty = |s: &str| !s.trim().is_empty();

    if let Some(url) = cli.filter(|s| non_empty(s)) {
        return url.trim().to_string();
    }
    if let Some(url) = env.filter(|s| non_empty(s)) {
        return url.trim().to_string();
    }
    settings.api.base_url.clone()
}

/// Read [`BASE_URL_ENV`] from the process environment
pub fn base_url_from_env() -> Option<String> {
    std::env::var(BASE_URL_ENV).ok()
}

//! Configuration file parsing for the dashboard
//!
//! Supports `{config_dir}/rapidbuild/config.toml`.

pub mod settings;
pub mod types;

pub use settings::{
    base_url_from_env, default_config_dir, init_config_dir, load_settings, resolve_base_url,
    BASE_URL_ENV,
};
pub use types::*;

//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Used when `RBDASH_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "rbdash=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/rapidbuild/logs/` (platform equivalent)
/// so they never interleave with the TUI. Log level is controlled by the
/// `RBDASH_LOG` environment variable.
///
/// # Examples
/// ```bash
/// RBDASH_LOG=debug rbdash
/// RBDASH_LOG=rbdash_api=trace rbdash apps
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "rbdash.log");

    // Target directives match by prefix, so `rbdash` covers every rbdash_* crate
    let env_filter = EnvFilter::try_from_env("RBDASH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("RapidBuild dashboard starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("rapidbuild").join("logs"))
}

//! Terminal setup and restoration

use tracing::error;

/// Install a panic hook that restores the terminal before the report prints.
///
/// The panic is also written to the log file, since the terminal output of
/// a crashed TUI is easy to lose.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        error!("Dashboard panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}

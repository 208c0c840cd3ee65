//! Main TUI runner: entry point and event loop

use tokio::sync::mpsc;

use rbdash_api::{http_backend, AppsService, AuthService, CredentialStore};
use rbdash_app::config::Settings;
use rbdash_app::message::Message;
use rbdash_app::process::process_message;
use rbdash_app::signals;
use rbdash_app::state::AppState;
use rbdash_app::{ScopeTaskMap, Services};
use rbdash_core::prelude::*;

use super::{event, render, terminal};

/// Run the dashboard against the backend at `settings.api.base_url`
pub async fn run(settings: Settings) -> Result<()> {
    let credentials = CredentialStore::default_location().context("Locating credential store")?;
    let (auth, apps) = http_backend(
        &settings.api.base_url,
        settings.api.timeout_ms,
        credentials,
    )?;
    info!(
        "Starting dashboard: base_url={}, icons={}",
        settings.api.base_url, settings.ui.icons
    );

    run_with_services(settings, Services::new(auth, apps)).await
}

/// Run the dashboard with the given collaborators
pub async fn run_with_services<A, P>(settings: Settings, services: Services<A, P>) -> Result<()>
where
    A: AuthService + Sync + 'static,
    P: AppsService + Sync + 'static,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut term = match ratatui::try_init() {
        Ok(term) => term,
        Err(e) => {
            ratatui::restore();
            return Err(Error::TerminalInit(e.to_string()));
        }
    };
    let mut state = AppState::with_settings(settings);

    // Unified message channel (signal handler, background tasks)
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    signals::spawn_signal_handler(msg_tx.clone());

    let scope_tasks = ScopeTaskMap::new();

    // The dashboard is the initial route
    process_message(
        &mut state,
        Message::ActivateDashboard,
        &msg_tx,
        &services,
        &scope_tasks,
    );

    let result = run_loop(
        &mut term,
        &mut state,
        msg_rx,
        &msg_tx,
        &services,
        &scope_tasks,
    );

    // Late answers have nowhere to go once the loop exits
    scope_tasks.abort_all();

    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<A, P>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: &mpsc::Sender<Message>,
    services: &Services<A, P>,
    scope_tasks: &ScopeTaskMap,
) -> Result<()>
where
    A: AuthService + Sync + 'static,
    P: AppsService + Sync + 'static,
{
    while !state.should_quit() {
        // Background results and signals
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, msg_tx, services, scope_tasks);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, msg_tx, services, scope_tasks);
        }
    }

    info!("Dashboard loop finished");
    Ok(())
}

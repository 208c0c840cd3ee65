//! rbdash - Terminal dashboard for RapidBuild apps
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rbdash_api::{http_backend, ApiClient, AuthClient, AuthService, CredentialStore};
use rbdash_app::config::{self, Settings};
use rbdash_app::view::{DashboardView, ListView, ProductionView, LOAD_ERROR_TEXT};
use rbdash_app::{run_headless, HeadlessOutcome, Services};
use rbdash_core::prelude::*;

const NOT_SIGNED_IN: &str = "not signed in";

/// rbdash - Terminal dashboard for RapidBuild apps
#[derive(Parser, Debug)]
#[command(name = "rbdash")]
#[command(about = "Terminal dashboard for RapidBuild apps", long_about = None)]
struct Args {
    /// Backend origin (overrides RAPIDBUILD_API_BASE_URL and config.toml)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify an API token and store it
    Login {
        #[arg(long)]
        token: String,
    },

    /// Sign out and remove the stored token
    Logout,

    /// Print the signed-in user's email
    Whoami,

    /// List apps without starting the TUI
    Apps {
        /// Print the raw app records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a commented default config.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since the TUI owns stdout)
    rbdash_core::logging::init()?;

    let config_dir = config::default_config_dir().context("Locating config directory")?;
    let mut settings = config::load_settings(&config_dir);
    settings.api.base_url = config::resolve_base_url(
        &settings,
        config::base_url_from_env(),
        args.api_url.as_deref(),
    );
    info!("Backend: {}", settings.api.base_url);

    let result = match args.command {
        None => rbdash_tui::run(settings).await.map(|()| ExitCode::SUCCESS),
        Some(Command::Login { token }) => login(&settings, &token).await,
        Some(Command::Logout) => logout(&settings).await,
        Some(Command::Whoami) => whoami(&settings).await,
        Some(Command::Apps { json }) => apps(settings, json).await,
        Some(Command::Config {
            action: ConfigCommand::Init,
        }) => config::init_config_dir(&config_dir).map(|path| {
            println!("Config file: {}", path.display());
            ExitCode::SUCCESS
        }),
    };

    info!("rbdash exiting");
    report_outcome(result)
}

/// Fatal errors propagate to color-eyre; everything else is reported on
/// stderr with a failing exit code.
fn report_outcome(result: Result<ExitCode>) -> Result<ExitCode> {
    match result {
        Ok(code) => Ok(code),
        Err(e) if e.is_fatal() => {
            error!("Fatal error: {:?}", e);
            Err(e)
        }
        Err(e) => {
            if e.is_recoverable() {
                warn!("Command failed: {e}");
            } else {
                error!("Application error: {:?}", e);
            }
            eprintln!("rbdash: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn backend(settings: &Settings) -> Result<(AuthClient, ApiClient)> {
    http_backend(
        &settings.api.base_url,
        settings.api.timeout_ms,
        CredentialStore::default_location()?,
    )
}

async fn login(settings: &Settings, token: &str) -> Result<ExitCode> {
    let (auth, _) = backend(settings)?;
    match auth.sign_in(token).await? {
        Some(user) => {
            println!("Signed in as {}", user.email);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("Token was not accepted by {}", settings.api.base_url);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn logout(settings: &Settings) -> Result<ExitCode> {
    let (auth, _) = backend(settings)?;
    auth.logout().await?;
    println!("Signed out");
    Ok(ExitCode::SUCCESS)
}

async fn whoami(settings: &Settings) -> Result<ExitCode> {
    let (auth, _) = backend(settings)?;
    match auth.current_user().await? {
        Some(user) => {
            println!("{}", user.email);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("{NOT_SIGNED_IN}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn apps(settings: Settings, json: bool) -> Result<ExitCode> {
    let (auth, apps) = backend(&settings)?;
    let services = Services::new(auth, apps);

    // Guard and loader each get one request timeout, plus slack
    let timeout = Duration::from_millis(settings.api.timeout_ms) * 3;

    match run_headless(&services, settings, timeout).await? {
        HeadlessOutcome::SignedOut => {
            eprintln!("{NOT_SIGNED_IN}; run `rbdash login --token <TOKEN>`");
            Ok(ExitCode::FAILURE)
        }
        HeadlessOutcome::Failed => {
            eprintln!("{LOAD_ERROR_TEXT}");
            Ok(ExitCode::FAILURE)
        }
        HeadlessOutcome::Loaded { view, apps } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&apps)?);
            } else {
                print!("{}", format_cards(&view));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Plain-text rendering of the dashboard list
fn format_cards(view: &DashboardView) -> String {
    let mut out = String::new();
    match &view.list {
        ListView::Loading => out.push_str("Loading...\n"),
        ListView::Error { message } => {
            out.push_str(message);
            out.push('\n');
        }
        ListView::Empty(empty) => {
            out.push_str(&format!("{}\n{}\n", empty.title, empty.text));
        }
        ListView::Cards(cards) => {
            for card in cards {
                out.push_str(&format!("{} [{}]\n", card.title, card.badge.text));
                if let Some(description) = &card.description {
                    out.push_str(&format!("  {description}\n"));
                }
                out.push_str(&format!("  Created {}\n", card.created));
                match &card.production {
                    Some(ProductionView::Published { label, url }) => {
                        out.push_str(&format!("  {label}  {url}\n"));
                    }
                    Some(ProductionView::Unpublished { label }) => {
                        out.push_str(&format!("  {label}\n"));
                    }
                    None => {}
                }
            }
        }
    }
    out
}

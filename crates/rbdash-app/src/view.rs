//! Dashboard view model
//!
//! Pure functions from state to what the screen shows. The TUI draws these
//! structures and nothing else, so every display rule lives here and is
//! testable without a terminal.

use std::collections::HashSet;

use crate::config::Settings;
use crate::dashboard::{DashboardState, QueryState};
use crate::session_store::SessionStore;
use crate::state::UiMode;
use rbdash_core::{format_created_date, normalize_logo_url, App, AppStatus};

pub const PRODUCT_NAME: &str = "RapidBuild";
pub const LIST_TITLE: &str = "My Apps";
pub const LOAD_ERROR_TEXT: &str = "Failed to load apps";
pub const EMPTY_TITLE: &str = "No apps";
pub const EMPTY_TEXT: &str = "Get started by creating a new app.";
pub const EMPTY_ACTION: &str = "Create App";
pub const UNPUBLISHED_LABEL: &str = "Not published yet";

/// Rendering knobs taken from settings
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub date_format: String,
}

impl DisplayOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            date_format: settings.ui.date_format.clone(),
        }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Visual tone of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Info,
    Danger,
    Neutral,
}

impl BadgeTone {
    pub fn for_status(status: &AppStatus) -> Self {
        match status {
            AppStatus::Active => BadgeTone::Success,
            AppStatus::Building => BadgeTone::Info,
            AppStatus::Error => BadgeTone::Danger,
            AppStatus::Other(_) => BadgeTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    /// Literal status value
    pub text: String,
    pub tone: BadgeTone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoView {
    Image { url: String },
    /// Generic folder glyph (no logo, or the logo failed to load)
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductionView {
    Published { label: String, url: String },
    Unpublished { label: String },
}

impl ProductionView {
    pub fn label(&self) -> &str {
        match self {
            ProductionView::Published { label, .. } | ProductionView::Unpublished { label } => {
                label
            }
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ProductionView::Published { url, .. } => Some(url),
            ProductionView::Unpublished { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCard {
    pub app_id: String,
    pub title: String,
    /// Full text; the widget clamps it
    pub description: Option<String>,
    pub badge: StatusBadge,
    pub logo: LogoView,
    pub created: String,
    pub production: Option<ProductionView>,
    /// Where activating the card leads
    pub target: UiMode,
}

impl AppCard {
    pub fn build(app: &App, logo_failed: bool, options: &DisplayOptions) -> Self {
        Self {
            app_id: app.id.clone(),
            title: app.title().to_string(),
            description: app.description.clone().filter(|d| !d.is_empty()),
            badge: StatusBadge {
                text: app.status.as_str().to_string(),
                tone: BadgeTone::for_status(&app.status),
            },
            logo: logo_view(app, logo_failed),
            created: format_created_date(&app.created_at, &options.date_format),
            production: production_view(app),
            target: UiMode::AppDetail {
                app_id: app.id.clone(),
            },
        }
    }
}

fn logo_view(app: &App, failed: bool) -> LogoView {
    if failed {
        return LogoView::Fallback;
    }
    match normalize_logo_url(app.logo.as_deref()) {
        Some(url) => LogoView::Image { url },
        None => LogoView::Fallback,
    }
}

/// Production section of a card; `None` when no target is reserved
pub fn production_view(app: &App) -> Option<ProductionView> {
    let host = app.production_url.as_deref()?;
    Some(match app.prod_version.as_deref() {
        Some(version) => ProductionView::Published {
            label: format!("Production (v{version})"),
            url: format!("https://{host}"),
        },
        None => ProductionView::Unpublished {
            label: UNPUBLISHED_LABEL.to_string(),
        },
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub text: &'static str,
    pub action: &'static str,
    pub target: UiMode,
}

/// Mutually exclusive list area content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Error { message: &'static str },
    Empty(EmptyState),
    Cards(Vec<AppCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub product: &'static str,
    pub user_email: Option<String>,
    pub title: &'static str,
}

/// Everything the dashboard screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub header: HeaderView,
    pub list: ListView,
    /// Cached list shown while a refetch runs
    pub refreshing: bool,
    pub selected: usize,
}

impl DashboardView {
    pub fn build(
        dashboard: &DashboardState,
        session: &SessionStore,
        options: &DisplayOptions,
    ) -> Self {
        Self {
            header: HeaderView {
                product: PRODUCT_NAME,
                user_email: session.current().map(|u| u.email.clone()),
                title: LIST_TITLE,
            },
            list: list_view(&dashboard.apps, &dashboard.logo_failures, options),
            refreshing: dashboard.apps.is_refreshing(),
            selected: dashboard.selected,
        }
    }

    pub fn cards(&self) -> &[AppCard] {
        match &self.list {
            ListView::Cards(cards) => cards,
            _ => &[],
        }
    }
}

fn list_view(query: &QueryState, failures: &HashSet<String>, options: &DisplayOptions) -> ListView {
    match query {
        QueryState::Pending => ListView::Loading,
        QueryState::Failed => ListView::Error {
            message: LOAD_ERROR_TEXT,
        },
        QueryState::Loaded { apps, .. } if apps.is_empty() => ListView::Empty(EmptyState {
            title: EMPTY_TITLE,
            text: EMPTY_TEXT,
            action: EMPTY_ACTION,
            target: UiMode::NewApp,
        }),
        QueryState::Loaded { apps, .. } => ListView::Cards(
            apps.iter()
                .map(|app| AppCard::build(app, failures.contains(&app.id), options))
                .collect(),
        ),
    }
}

/// Full record for the detail screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDetailView {
    pub card: AppCard,
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    /// Normalized logo URL, even if the image failed to load
    pub logo_url: Option<String>,
    pub created_at: String,
}

impl AppDetailView {
    pub fn build(dashboard: &DashboardState, app_id: &str, options: &DisplayOptions) -> Option<Self> {
        let app = dashboard.find_app(app_id)?;
        Some(Self {
            card: AppCard::build(app, dashboard.logo_failures.contains(app_id), options),
            id: app.id.clone(),
            name: app.name.clone(),
            display_name: app.display_name.clone().filter(|d| !d.is_empty()),
            logo_url: normalize_logo_url(app.logo.as_deref()),
            created_at: app.created_at.clone(),
        })
    }
}

/// `{web_url}/apps/new`
pub fn new_app_url(settings: &Settings) -> String {
    format!("{}/apps/new", settings.api.web_url.trim_end_matches('/'))
}

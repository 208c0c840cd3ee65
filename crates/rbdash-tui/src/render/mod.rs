//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use rbdash_app::state::{AppState, UiMode};
use rbdash_app::view::{new_app_url, AppDetailView, DashboardView, DisplayOptions};

use super::{layout, widgets};
use crate::theme::{icons::IconSet, palette};

const DASHBOARD_HINTS: &[(&str, &str)] = &[
    ("j/k", "Select"),
    ("Enter", "Details"),
    ("o", "Open production"),
    ("r", "Refresh"),
    ("n", "New App"),
    ("L", "Logout"),
    ("q", "Quit"),
];
const LOGIN_HINTS: &[(&str, &str)] = &[("Enter", "Sign in"), ("Esc", "Quit")];
const DETAIL_HINTS: &[(&str, &str)] = &[("o", "Open production"), ("Esc", "Back"), ("q", "Quit")];
const NEW_APP_HINTS: &[(&str, &str)] = &[("o", "Open in browser"), ("Esc", "Back"), ("q", "Quit")];

const SIGNING_OUT: &str = "Signing out...";

/// Render the complete UI.
///
/// Pure: everything drawn comes from the view model built off `state`.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);
    let icons = IconSet::new(state.settings.ui.icons);
    let options = DisplayOptions::from_settings(&state.settings);
    let dashboard = DashboardView::build(&state.dashboard, &state.session, &options);

    let header = widgets::MainHeader::new(&dashboard.header, icons);
    if state.ui_mode == UiMode::Dashboard {
        frame.render_widget(header, areas.header);
    } else {
        frame.render_widget(header.without_shortcuts(), areas.header);
    }

    let hints = match &state.ui_mode {
        UiMode::Dashboard => {
            frame.render_widget(
                widgets::AppList::new(&dashboard, icons).tick(state.tick),
                areas.body,
            );
            DASHBOARD_HINTS
        }
        UiMode::Login => {
            frame.render_widget(widgets::LoginForm::new(&state.login, icons), areas.body);
            LOGIN_HINTS
        }
        UiMode::AppDetail { app_id } => {
            let detail = AppDetailView::build(&state.dashboard, app_id, &options);
            frame.render_widget(widgets::AppDetail::new(detail.as_ref(), icons), areas.body);
            DETAIL_HINTS
        }
        UiMode::NewApp => {
            let url = new_app_url(&state.settings);
            frame.render_widget(widgets::NewAppPanel::new(&url, icons), areas.body);
            NEW_APP_HINTS
        }
    };

    let message = if state.logging_out {
        Some(SIGNING_OUT)
    } else {
        state.status.as_deref()
    };
    frame.render_widget(
        widgets::StatusBar::new(hints).message(message),
        areas.status,
    );

    if state.confirm_logout {
        frame.render_widget(
            widgets::ConfirmLogout::new(dashboard.header.user_email.as_deref()),
            area,
        );
    }
}

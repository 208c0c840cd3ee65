//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Header: top border + title row + bottom border
pub const HEADER_HEIGHT: u16 = 3;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Product name, user email, key hints
    pub header: Rect,

    /// Current view (app list, login, detail, new app)
    pub body: Rect,

    /// One-line status / hint bar
    pub status: Rect,
}

/// Split the screen into header, body and status rows
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

//! Helpers for centered overlays (login form, logout confirmation).

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

use crate::theme::palette;

/// Center a fixed-size rect within an area, clamped to the area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Draw a 1-cell shadow along the right and bottom edges of `modal`
pub fn render_shadow(buf: &mut Buffer, modal: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);

    let right_x = modal.x.saturating_add(modal.width);
    for y in modal.y.saturating_add(1)..modal.y.saturating_add(modal.height).saturating_add(1) {
        if let Some(cell) = buf.cell_mut((right_x, y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }

    let bottom_y = modal.y.saturating_add(modal.height);
    for x in modal.x.saturating_add(1)..modal.x.saturating_add(modal.width).saturating_add(1) {
        if let Some(cell) = buf.cell_mut((x, bottom_y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

/// Reset the cells under a modal
pub fn clear_area(buf: &mut Buffer, area: Rect) {
    Clear.render(area, buf);
}

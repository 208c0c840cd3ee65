//! Logout confirmation (enabled by `behavior.confirm_logout`)

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::modal_overlay::{centered_rect, clear_area, render_shadow};
use crate::theme::styles;

const DIALOG_WIDTH: u16 = 36;
const DIALOG_HEIGHT: u16 = 6;

pub struct ConfirmLogout<'a> {
    email: Option<&'a str>,
}

impl<'a> ConfirmLogout<'a> {
    pub fn new(email: Option<&'a str>) -> Self {
        Self { email }
    }
}

impl Widget for ConfirmLogout<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
        clear_area(buf, dialog);
        render_shadow(buf, dialog);

        let block = styles::modal_block(" Log out ");
        let inner = block.inner(dialog);
        block.render(dialog, buf);

        let question = match self.email {
            Some(email) => format!("Sign out {email}?"),
            None => "Sign out?".to_string(),
        };

        Paragraph::new(vec![
            Line::styled(question, styles::text_primary()),
            Line::from(""),
            Line::from(vec![
                Span::styled("[y]", styles::keybinding()),
                Span::styled(" Yes  ", styles::text_muted()),
                Span::styled("[n]", styles::keybinding()),
                Span::styled(" No", styles::text_muted()),
            ]),
        ])
        .alignment(Alignment::Center)
        .render(inner, buf);
    }
}

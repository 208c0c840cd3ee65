//! Sign-in form: why sign-in is needed plus a masked token input

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use rbdash_app::state::LoginState;

use super::modal_overlay::{centered_rect, clear_area, render_shadow};
use crate::theme::{icons::IconSet, styles};

const FORM_WIDTH: u16 = 56;
const FORM_HEIGHT: u16 = 11;

/// Longest run of mask characters drawn, regardless of token length
const MAX_MASK: usize = 32;

pub struct LoginForm<'a> {
    login: &'a LoginState,
    icons: IconSet,
}

impl<'a> LoginForm<'a> {
    pub fn new(login: &'a LoginState, icons: IconSet) -> Self {
        Self { login, icons }
    }

    fn masked_input(&self) -> String {
        let count = self.login.input.chars().count();
        let mut masked = "•".repeat(count.min(MAX_MASK));
        if count > MAX_MASK {
            masked.push('…');
        }
        masked
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let login: &'a LoginState = self.login;
        let mut lines = Vec::new();

        if let Some(notice) = login.notice.as_deref() {
            lines.push(Line::styled(notice, styles::status_yellow()));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled(self.icons.key(), styles::accent()),
            Span::styled(" API token", styles::text_secondary()),
        ]));

        let cursor = if self.login.submitting { "" } else { "▏" };
        lines.push(Line::from(vec![
            Span::styled("> ", styles::accent()),
            Span::styled(self.masked_input(), styles::text_primary()),
            Span::styled(cursor, styles::accent()),
        ]));
        lines.push(Line::from(""));

        if self.login.submitting {
            lines.push(Line::styled("Verifying token...", styles::text_muted()));
        } else if let Some(error) = login.error.as_deref() {
            lines.push(Line::from(vec![
                Span::styled(self.icons.alert(), styles::status_red()),
                Span::raw(" "),
                Span::styled(error, styles::status_red()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled("[Enter]", styles::keybinding()),
                Span::styled(" Sign in  ", styles::text_muted()),
                Span::styled("[Ctrl+U]", styles::keybinding()),
                Span::styled(" Clear  ", styles::text_muted()),
                Span::styled("[Esc]", styles::keybinding()),
                Span::styled(" Quit", styles::text_muted()),
            ]));
        }

        lines
    }
}

impl Widget for LoginForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let form = centered_rect(FORM_WIDTH, FORM_HEIGHT, area);
        clear_area(buf, form);
        render_shadow(buf, form);

        let block = styles::modal_block(" Sign in to RapidBuild ");
        let inner = block.inner(form);
        block.render(form, buf);

        if inner.height == 0 || inner.width < 2 {
            return;
        }

        let content = Rect {
            x: inner.x + 1,
            width: inner.width - 2,
            ..inner
        };
        Paragraph::new(self.lines())
            .wrap(Wrap { trim: true })
            .render(content, buf);
    }
}

//! Header bar: product name, signed-in user, dashboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use rbdash_app::view::HeaderView;

use crate::theme::{icons::IconSet, palette, styles};

const SHORTCUTS: &[(&str, &str)] = &[
    ("r", "Refresh"),
    ("n", "New App"),
    ("L", "Logout"),
    ("q", "Quit"),
];

/// Main header showing the product, the session user and key hints
pub struct MainHeader<'a> {
    header: &'a HeaderView,
    icons: IconSet,
    show_shortcuts: bool,
}

impl<'a> MainHeader<'a> {
    pub fn new(header: &'a HeaderView, icons: IconSet) -> Self {
        Self {
            header,
            icons,
            show_shortcuts: true,
        }
    }

    /// Hide dashboard shortcuts (login screen)
    pub fn without_shortcuts(mut self) -> Self {
        self.show_shortcuts = false;
        self
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let row = Rect { height: 1, ..inner };

        let dot_style = if self.header.user_email.is_some() {
            Style::default().fg(palette::STATUS_GREEN)
        } else {
            styles::text_muted()
        };

        let mut left_spans = vec![
            Span::raw(" "),
            Span::styled(self.icons.dot(), dot_style),
            Span::raw(" "),
            Span::styled(self.header.product, styles::accent_bold()),
        ];
        if let Some(email) = self.header.user_email.as_deref() {
            left_spans.extend([
                Span::raw(" "),
                Span::styled("/", styles::text_muted()),
                Span::raw(" "),
                Span::styled(self.icons.user(), styles::text_muted()),
                Span::raw(" "),
                Span::styled(email, styles::text_secondary()),
            ]);
        }

        let left_line = Line::from(left_spans);
        let left_width = left_line.width() as u16;
        left_line.render(row, buf);

        if !self.show_shortcuts {
            return;
        }

        let right_line = shortcuts_line();
        let right_width = right_line.width() as u16;

        // Only draw hints when they fit beside the title with a gap
        if left_width + right_width + 2 <= row.width {
            let right_area = Rect {
                x: row.x + row.width - right_width - 1,
                width: right_width,
                ..row
            };
            right_line.render(right_area, buf);
        }
    }
}

fn shortcuts_line() -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, label)) in SHORTCUTS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{key}]"), styles::keybinding()));
        spans.push(Span::styled(format!(" {label}"), styles::text_muted()));
    }
    Line::from(spans)
}

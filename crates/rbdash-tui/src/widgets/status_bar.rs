//! Bottom status line: transient messages, otherwise key hints

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

pub struct StatusBar<'a> {
    message: Option<&'a str>,
    hints: &'a [(&'a str, &'a str)],
}

impl<'a> StatusBar<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            message: None,
            hints,
        }
    }

    /// A message replaces the hints until it is cleared
    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(palette::DEEPEST_BG));

        let line = match self.message {
            Some(message) => Line::from(vec![
                Span::raw(" "),
                Span::styled(message, styles::status_yellow()),
            ]),
            None => {
                let mut spans = vec![Span::raw(" ")];
                for (i, (key, label)) in self.hints.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled("  ", styles::text_muted()));
                    }
                    spans.push(Span::styled(*key, styles::keybinding()));
                    spans.push(Span::styled(format!(" {label}"), styles::text_muted()));
                }
                Line::from(spans)
            }
        };
        line.render(area, buf);
    }
}

//! One app card in the dashboard list

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthChar;

use rbdash_app::view::{AppCard, LogoView, ProductionView};

use crate::theme::{icons::IconSet, palette, styles};

/// Borders + title, two description lines, created date, production row
pub const CARD_HEIGHT: u16 = 7;

/// Description lines shown on a card
pub const DESCRIPTION_LINES: usize = 2;

pub struct AppCardWidget<'a> {
    card: &'a AppCard,
    icons: IconSet,
    selected: bool,
}

impl<'a> AppCardWidget<'a> {
    pub fn new(card: &'a AppCard, icons: IconSet) -> Self {
        Self {
            card,
            icons,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn title_row(&self, area: Rect, buf: &mut Buffer) {
        let (logo, logo_style) = match self.card.logo {
            LogoView::Image { .. } => (self.icons.image(), styles::accent()),
            LogoView::Fallback => (self.icons.folder(), styles::text_muted()),
        };

        let (marker, title_style) = if self.selected {
            (self.icons.pointer(), styles::focused_selected())
        } else {
            (" ", styles::text_bold())
        };

        let badge = Span::styled(
            self.card.badge.text.as_str(),
            styles::badge(self.card.badge.tone),
        );
        let badge_width = badge.width() as u16;

        Line::from(vec![
            Span::styled(marker, styles::accent()),
            Span::raw(" "),
            Span::styled(logo, logo_style),
            Span::raw(" "),
            Span::styled(self.card.title.as_str(), title_style),
        ])
        .render(
            Rect {
                width: area.width.saturating_sub(badge_width + 1),
                ..area
            },
            buf,
        );

        if badge_width < area.width {
            let badge_area = Rect {
                x: area.x + area.width - badge_width,
                width: badge_width,
                ..area
            };
            Line::from(badge).render(badge_area, buf);
        }
    }

    fn production_line(&self) -> Option<Line<'a>> {
        let card: &'a AppCard = self.card;
        let line = match card.production.as_ref()? {
            ProductionView::Published { label, url } => Line::from(vec![
                Span::styled(self.icons.link(), styles::accent()),
                Span::raw(" "),
                Span::styled(label.as_str(), styles::text_secondary()),
                Span::raw("  "),
                Span::styled(url.as_str(), styles::link()),
            ]),
            ProductionView::Unpublished { label } => {
                Line::from(Span::styled(label.as_str(), styles::text_muted()))
            }
        };
        Some(line)
    }
}

impl Widget for AppCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block =
            styles::glass_block(self.selected).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 2 {
            return;
        }

        // Content is inset by one column on both sides
        let content = Rect {
            x: inner.x + 1,
            width: inner.width - 2,
            ..inner
        };
        let row = |offset: u16| -> Option<Rect> {
            (offset < content.height).then(|| Rect {
                y: content.y + offset,
                height: 1,
                ..content
            })
        };

        if let Some(area) = row(0) {
            self.title_row(area, buf);
        }

        if let Some(description) = self.card.description.as_deref() {
            let lines = clamp_lines(description, content.width as usize, DESCRIPTION_LINES);
            for (i, text) in lines.into_iter().enumerate() {
                if let Some(area) = row(1 + i as u16) {
                    Line::styled(text, styles::text_secondary()).render(area, buf);
                }
            }
        }

        if let Some(area) = row(3) {
            Line::from(vec![
                Span::styled("Created ", styles::text_muted()),
                Span::styled(self.card.created.as_str(), styles::text_secondary()),
            ])
            .render(area, buf);
        }

        if let (Some(area), Some(line)) = (row(4), self.production_line()) {
            line.render(area, buf);
        }
    }
}

/// Wrap `text` into at most `max_lines` lines of `width` columns.
///
/// Whitespace runs collapse to one space. When the text does not fit, the
/// last line ends with `…`.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for c in flat.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;

            if lines.len() == max_lines {
                if let Some(last) = lines.pop() {
                    lines.push(ellipsize(&last, width));
                }
                return lines;
            }
            if c == ' ' {
                continue;
            }
        }
        current.push(c);
        current_width += char_width;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn ellipsize(line: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in line.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width + 1 > width {
            break;
        }
        out.push(c);
        used += char_width;
    }
    let mut out = out.trim_end().to_string();
    out.push('…');
    out
}

//! The "My Apps" panel: loading indicator, error banner, empty state or cards

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use rbdash_app::view::{AppCard, DashboardView, EmptyState, ListView};

use super::app_card::{AppCardWidget, CARD_HEIGHT};
use super::modal_overlay::centered_rect;
use crate::theme::{icons::IconSet, palette, styles};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct AppList<'a> {
    view: &'a DashboardView,
    icons: IconSet,
    tick: u64,
}

impl<'a> AppList<'a> {
    pub fn new(view: &'a DashboardView, icons: IconSet) -> Self {
        Self {
            view,
            icons,
            tick: 0,
        }
    }

    /// Animation frame for the loading spinner
    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    fn title(&self) -> Line<'a> {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.view.header.title),
            styles::accent_bold(),
        )];
        if self.view.refreshing {
            spans.push(Span::styled(
                format!("{} refreshing ", self.icons.refresh()),
                styles::status_yellow(),
            ));
        }
        Line::from(spans)
    }

    fn render_centered(lines: Vec<Line<'_>>, area: Rect, buf: &mut Buffer) {
        let height = lines.len() as u16;
        let target = centered_rect(area.width, height, area);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(target, buf);
    }

    fn render_loading(&self, area: Rect, buf: &mut Buffer) {
        let frame = SPINNER[(self.tick as usize) % SPINNER.len()];
        let line = Line::from(vec![
            Span::styled(frame, styles::accent_bold()),
            Span::raw(" "),
            Span::styled("Loading apps...", styles::text_secondary()),
        ]);
        Self::render_centered(vec![line], area, buf);
    }

    fn render_error(&self, message: &str, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(vec![
                Span::styled(self.icons.alert(), styles::status_red()),
                Span::raw(" "),
                Span::styled(
                    message.to_string(),
                    styles::status_red().add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        Self::render_centered(lines, area, buf);
    }

    fn render_empty(&self, empty: &EmptyState, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::styled(self.icons.folder(), styles::text_muted()),
            Line::styled(empty.title, styles::text_bold()),
            Line::styled(empty.text, styles::text_secondary()),
            Line::from(""),
            Line::from(vec![
                Span::styled("[n]", styles::keybinding()),
                Span::raw(" "),
                Span::styled(
                    format!("{} {}", self.icons.plus(), empty.action),
                    styles::accent_bold(),
                ),
            ]),
        ];
        Self::render_centered(lines, area, buf);
    }

    fn render_cards(&self, cards: &[AppCard], area: Rect, buf: &mut Buffer) {
        let visible = ((area.height / CARD_HEIGHT) as usize).max(1);
        let selected = self.view.selected.min(cards.len().saturating_sub(1));
        let offset = (selected + 1).saturating_sub(visible);

        let mut y = area.y;
        for (index, card) in cards.iter().enumerate().skip(offset).take(visible) {
            let remaining = area.y + area.height - y;
            if remaining == 0 {
                break;
            }
            let card_area = Rect {
                y,
                height: CARD_HEIGHT.min(remaining),
                ..area
            };
            AppCardWidget::new(card, self.icons)
                .selected(index == selected)
                .render(card_area, buf);
            y += card_area.height;
        }
    }
}

impl Widget for AppList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = styles::glass_block(false)
            .title(self.title())
            .style(Style::default().bg(palette::DEEPEST_BG));

        let cards = self.view.cards();
        if !cards.is_empty() {
            let position = self.view.selected.min(cards.len() - 1) + 1;
            block = block.title_bottom(
                Line::styled(format!(" {}/{} ", position, cards.len()), styles::text_muted())
                    .right_aligned(),
            );
        }

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        match &self.view.list {
            ListView::Loading => self.render_loading(inner, buf),
            ListView::Error { message } => self.render_error(message, inner, buf),
            ListView::Empty(empty) => self.render_empty(empty, inner, buf),
            ListView::Cards(cards) => self.render_cards(cards, inner, buf),
        }
    }
}

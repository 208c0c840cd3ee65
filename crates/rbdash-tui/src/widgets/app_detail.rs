//! Full record of one app

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use rbdash_app::view::{AppDetailView, LogoView, ProductionView};

use crate::theme::{icons::IconSet, palette, styles};

/// Width of the field label column
const LABEL_WIDTH: usize = 14;

pub struct AppDetail<'a> {
    detail: Option<&'a AppDetailView>,
    icons: IconSet,
}

impl<'a> AppDetail<'a> {
    /// `None` renders a "not found" notice (the app vanished after a refetch)
    pub fn new(detail: Option<&'a AppDetailView>, icons: IconSet) -> Self {
        Self { detail, icons }
    }

    fn field(label: &str, value: Span<'a>) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{label:<LABEL_WIDTH$}"), styles::text_muted()),
            value,
        ])
    }

    fn fields(&self, detail: &'a AppDetailView) -> Vec<Line<'a>> {
        let card = &detail.card;
        let none = || Span::styled("-", styles::text_muted());

        let production = match card.production.as_ref() {
            Some(ProductionView::Published { label, url }) => Line::from(vec![
                Span::styled(format!("{:<LABEL_WIDTH$}", "Production"), styles::text_muted()),
                Span::styled(label.as_str(), styles::text_secondary()),
                Span::raw("  "),
                Span::styled(self.icons.link(), styles::accent()),
                Span::raw(" "),
                Span::styled(url.as_str(), styles::link()),
            ]),
            Some(ProductionView::Unpublished { label }) => Self::field(
                "Production",
                Span::styled(label.as_str(), styles::text_muted()),
            ),
            None => Self::field("Production", none()),
        };

        vec![
            Self::field("ID", Span::styled(detail.id.as_str(), styles::text_primary())),
            Self::field("Name", Span::styled(detail.name.as_str(), styles::text_primary())),
            Self::field(
                "Display name",
                detail
                    .display_name
                    .as_deref()
                    .map(|d| Span::styled(d, styles::text_primary()))
                    .unwrap_or_else(none),
            ),
            Self::field(
                "Status",
                Span::styled(card.badge.text.as_str(), styles::badge(card.badge.tone)),
            ),
            Self::field(
                "Created",
                Span::styled(
                    format!("{} ({})", card.created, detail.created_at),
                    styles::text_secondary(),
                ),
            ),
            Self::field(
                "Logo",
                detail
                    .logo_url
                    .as_deref()
                    .map(|url| Span::styled(url, styles::link()))
                    .unwrap_or_else(none),
            ),
            production,
        ]
    }
}

impl Widget for AppDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(detail) = self.detail else {
            let block = styles::glass_block(false).style(Style::default().bg(palette::DEEPEST_BG));
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(vec![
                Line::styled("App not found", styles::status_red()),
                Line::styled("[Esc] Back to My Apps", styles::text_muted()),
            ])
            .render(inner, buf);
            return;
        };

        let logo = match detail.card.logo {
            LogoView::Image { .. } => self.icons.image(),
            LogoView::Fallback => self.icons.folder(),
        };
        let block = styles::glass_block(true)
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(logo, styles::accent()),
                Span::raw(" "),
                Span::styled(detail.card.title.as_str(), styles::accent_bold()),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(vec![
                Span::styled(" [o]", styles::keybinding()),
                Span::styled(" Open production  ", styles::text_muted()),
                Span::styled("[Esc]", styles::keybinding()),
                Span::styled(" Back ", styles::text_muted()),
            ]))
            .style(Style::default().bg(palette::DEEPEST_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 2 {
            return;
        }

        let content = Rect {
            x: inner.x + 1,
            width: inner.width - 2,
            ..inner
        };

        let fields = self.fields(detail);
        let [fields_area, description_area] = Layout::vertical([
            Constraint::Length(fields.len() as u16 + 1),
            Constraint::Min(0),
        ])
        .areas(content);

        Paragraph::new(fields).render(fields_area, buf);

        let description = detail
            .card
            .description
            .as_deref()
            .map(|d| Line::styled(d, styles::text_secondary()))
            .unwrap_or_else(|| Line::styled("No description", styles::text_muted()));
        Paragraph::new(vec![Line::styled("Description", styles::text_muted()), description])
            .wrap(Wrap { trim: false })
            .render(description_area, buf);
    }
}

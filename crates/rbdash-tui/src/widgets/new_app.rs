//! Where to create a new app

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay::centered_rect;
use crate::theme::{icons::IconSet, palette, styles};

pub struct NewAppPanel<'a> {
    url: &'a str,
    icons: IconSet,
}

impl<'a> NewAppPanel<'a> {
    pub fn new(url: &'a str, icons: IconSet) -> Self {
        Self { url, icons }
    }
}

impl Widget for NewAppPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true)
            .title(Line::styled(
                format!(" {} New App ", self.icons.plus()),
                styles::accent_bold(),
            ))
            .style(Style::default().bg(palette::DEEPEST_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::styled("Apps are created in the RapidBuild web console:", styles::text_secondary()),
            Line::from(""),
            Line::from(vec![
                Span::styled(self.icons.link(), styles::accent()),
                Span::raw(" "),
                Span::styled(self.url, styles::link()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("[o]", styles::keybinding()),
                Span::styled(" Open in browser  ", styles::text_muted()),
                Span::styled("[Esc]", styles::keybinding()),
                Span::styled(" Back", styles::text_muted()),
            ]),
        ];

        let target = centered_rect(inner.width, lines.len() as u16, inner);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(target, buf);
    }
}

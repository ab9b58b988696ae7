use crate::events::Page;
use crate::i18n::{tr, Language};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use strum::IntoEnumIterator;

/// Top navigation bar: brand, section tabs, and the language toggle hint.
pub struct Header {
    current: Page,
    language: Language,
}

impl Header {
    pub fn new(current: Page, language: Language) -> Self {
        Self { current, language }
    }
}

impl Widget for Header {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(
                " Haowise ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
        ];

        for page in Page::iter() {
            let label = tr(self.language, page.title_key());
            let style = if page == self.current {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw("  "));
        }

        spans.push(Span::styled(
            format!("[Tab] ⇄  [F2] {}", self.language.toggle_label()),
            Style::default().fg(Color::DarkGray),
        ));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

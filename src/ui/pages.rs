//! Localized site-section content, rendered from the dictionary keys the
//! site defines for each page.

use crate::events::Page;
use crate::i18n::{tr, Language};
use crate::ui::wrap_text;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Dictionary keys making up one page: hero block, item grid, and an
/// optional call-to-action block.
struct PageKeys {
    hero_title: &'static str,
    hero_description: &'static str,
    section_title: &'static str,
    items: &'static [(&'static str, &'static str)],
    cta: Option<(&'static str, &'static str)>,
}

fn page_keys(page: Page) -> PageKeys {
    match page {
        Page::Home => PageKeys {
            hero_title: "heroTitle",
            hero_description: "heroDescription",
            section_title: "keyPointsTitle",
            items: &[
                ("keyPoint1Title", "keyPoint1Description"),
                ("keyPoint2Title", "keyPoint2Description"),
                ("keyPoint3Title", "keyPoint3Description"),
                ("keyPoint4Title", "keyPoint4Description"),
                ("keyPoint5Title", "keyPoint5Description"),
                ("keyPoint6Title", "keyPoint6Description"),
            ],
            cta: Some(("ctaTitle", "ctaDescription")),
        },
        Page::Solutions => PageKeys {
            hero_title: "solutionsHeroTitle",
            hero_description: "solutionsHeroDescription",
            section_title: "solutionsTitle",
            items: &[
                ("solution1Title", "solution1Description"),
                ("solution2Title", "solution2Description"),
                ("solution3Title", "solution3Description"),
                ("solution4Title", "solution4Description"),
                ("solution5Title", "solution5Description"),
                ("solution6Title", "solution6Description"),
            ],
            cta: None,
        },
        Page::Products => PageKeys {
            hero_title: "productsHeroTitle",
            hero_description: "productsHeroDescription",
            section_title: "productsTitle",
            items: &[
                ("product1Title", "product1Description"),
                ("product2Title", "product2Description"),
                ("product3Title", "product3Description"),
                ("product4Title", "product4Description"),
                ("product5Title", "product5Description"),
                ("product6Title", "product6Description"),
            ],
            cta: None,
        },
        Page::About => PageKeys {
            hero_title: "aboutHeroTitle",
            hero_description: "aboutHeroDescription",
            section_title: "aboutTitle",
            items: &[
                ("aboutPoint1Title", "aboutPoint1Description"),
                ("aboutPoint2Title", "aboutPoint2Description"),
                ("aboutPoint3Title", "aboutPoint3Description"),
                ("aboutPoint4Title", "aboutPoint4Description"),
                ("aboutPoint5Title", "aboutPoint5Description"),
            ],
            cta: None,
        },
        Page::Contact => PageKeys {
            hero_title: "contactHeroTitle",
            hero_description: "contactHeroDescription",
            section_title: "contactInfoTitle",
            items: &[
                ("contactInfoAddress", "contactInfoAddressValue"),
                ("contactInfoEmail", "contactInfoEmailValue"),
                ("contactInfoPhone", "contactInfoPhoneValue"),
                ("contactInfoHours", "contactInfoHoursValue"),
            ],
            cta: None,
        },
    }
}

/// Renders the current site section.
pub struct PageView {
    page: Page,
    language: Language,
}

impl PageView {
    pub fn new(page: Page, language: Language) -> Self {
        Self { page, language }
    }

    fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let keys = page_keys(self.page);
        let lang = self.language;
        let mut lines = Vec::new();

        for text in wrap_text(&tr(lang, keys.hero_title), width) {
            lines.push(Line::from(vec![Span::styled(
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]));
        }
        for text in wrap_text(&tr(lang, keys.hero_description), width) {
            lines.push(Line::from(vec![Span::styled(
                text,
                Style::default().fg(Color::Gray),
            )]));
        }

        lines.push(Line::from(vec![Span::raw("")]));
        lines.push(Line::from(vec![Span::styled(
            tr(lang, keys.section_title),
            Style::default().add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(vec![Span::raw("")]));

        for (title_key, description_key) in keys.items {
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    tr(lang, title_key),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]));
            for text in wrap_text(&tr(lang, description_key), width.saturating_sub(2)) {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(text, Style::default().fg(Color::Gray)),
                ]));
            }
        }

        if let Some((cta_title_key, cta_description_key)) = keys.cta {
            lines.push(Line::from(vec![Span::raw("")]));
            for text in wrap_text(&tr(lang, cta_title_key), width) {
                lines.push(Line::from(vec![Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )]));
            }
            for text in wrap_text(&tr(lang, cta_description_key), width) {
                lines.push(Line::from(vec![Span::styled(
                    text,
                    Style::default().fg(Color::Gray),
                )]));
            }
        }

        lines
    }
}

impl Widget for PageView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(tr(self.language, self.page.title_key()));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = self.build_lines(inner.width.saturating_sub(2) as usize);
        for (i, line) in lines.iter().take(inner.height as usize).enumerate() {
            buf.set_line(inner.x + 1, inner.y + i as u16, line, inner.width);
        }
    }
}

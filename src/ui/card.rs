//! Character card widget
//!
//! Each grid cell is a bordered card whose lines come from a
//! [`CardRenderer`]. The grid decides where a card goes; the renderer
//! decides what it says.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::dataset::{Kana, Kanji};

/// Turns one entry into the lines shown on its card
pub trait CardRenderer<A> {
    /// Number of content lines every card produced by this renderer has
    fn content_height(&self) -> u16;

    fn render(&self, label: &str, attributes: &A, revealed: bool, theme: &Theme)
        -> Vec<Line<'static>>;
}

/// Character with its romaji
#[derive(Debug, Clone, Copy)]
pub struct KanaRenderer {
    pub show_romaji: bool,
}

impl CardRenderer<Kana> for KanaRenderer {
    fn content_height(&self) -> u16 {
        2
    }

    fn render(&self, label: &str, kana: &Kana, _revealed: bool, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
        ))
        .centered()];
        if self.show_romaji {
            lines.push(
                Line::from(Span::styled(kana.romaji.clone(), Style::default().fg(theme.secondary)))
                    .centered(),
            );
        }
        lines
    }
}

/// Kanji flashcard: front shows level and strokes, back shows meaning
#[derive(Debug, Clone, Copy, Default)]
pub struct KanjiRenderer;

impl CardRenderer<Kanji> for KanjiRenderer {
    fn content_height(&self) -> u16 {
        3
    }

    fn render(&self, label: &str, kanji: &Kanji, revealed: bool, theme: &Theme) -> Vec<Line<'static>> {
        let level_color = theme.level_color(kanji.level);
        let character = Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(level_color).add_modifier(Modifier::BOLD),
        ))
        .centered();

        if revealed {
            vec![
                character,
                Line::from(Span::styled(kanji.meaning.clone(), Style::default().fg(theme.foreground)))
                    .centered(),
                Line::from(Span::styled(kanji.reading.clone(), Style::default().fg(theme.dimmed)))
                    .centered(),
            ]
        } else {
            vec![
                character,
                Line::from(Span::styled(kanji.level.as_str(), Style::default().fg(level_color)))
                    .centered(),
                Line::from(Span::styled(
                    format!("{} strokes", kanji.strokes),
                    Style::default().fg(theme.dimmed),
                ))
                .centered(),
            ]
        }
    }
}

/// Character card widget
pub struct CharacterCard<'a> {
    lines: Vec<Line<'static>>,
    selected: bool,
    theme: &'a Theme,
}

impl<'a> CharacterCard<'a> {
    pub fn new(lines: Vec<Line<'static>>, theme: &'a Theme) -> Self {
        Self {
            lines,
            selected: false,
            theme,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Card height in lines for a given number of content lines
    pub fn height(content_lines: u16) -> u16 {
        content_lines + 2
    }
}

impl Widget for CharacterCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (border, bg, border_type) = if self.selected {
            (self.theme.primary, self.theme.selection_bg, BorderType::Thick)
        } else {
            (self.theme.border, self.theme.surface, BorderType::Rounded)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(bg));
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        for (i, line) in self.lines.into_iter().take(inner.height as usize).enumerate() {
            let line = truncate_line(line, width);
            let row = Rect {
                y: inner.y + i as u16,
                height: 1,
                ..inner
            };
            line.render(row, buf);
        }
    }
}

/// Truncate every span of a line so the whole line fits `max_width`
fn truncate_line(line: Line<'static>, max_width: usize) -> Line<'static> {
    if line.width() <= max_width {
        return line;
    }

    let alignment = line.alignment;
    let mut remaining = max_width;
    let mut spans = Vec::with_capacity(line.spans.len());
    for span in line.spans {
        if remaining == 0 {
            break;
        }
        let text = truncate(&span.content, remaining);
        remaining = remaining.saturating_sub(text.width());
        spans.push(Span::styled(text, span.style));
    }

    let mut out = Line::from(spans);
    out.alignment = alignment;
    out
}

/// Truncate string to fit within max_width, adding ellipsis if needed
fn truncate(s: &str, max_width: usize) -> String {
    let width = s.width();
    if width <= max_width {
        s.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        let mut result = String::new();
        let mut current_width = 0;

        for c in s.chars() {
            let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if current_width + char_width + 1 > max_width {
                result.push('…');
                break;
            }
            result.push(c);
            current_width += char_width;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Level;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("hello", 1), "…");
        // Wide characters count double
        assert_eq!(truncate("ありがとう", 5), "あり…");
    }

    #[test]
    fn test_kana_renderer() {
        let theme = Theme::default();
        let kana = Kana { romaji: "shi".to_string() };

        let lines = KanaRenderer { show_romaji: true }.render("し", &kana, false, &theme);
        assert_eq!(lines.iter().map(text).collect::<Vec<_>>(), vec!["し", "shi"]);

        let lines = KanaRenderer { show_romaji: false }.render("し", &kana, false, &theme);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_kanji_flip() {
        let theme = Theme::default();
        let kanji = Kanji {
            meaning: "water".to_string(),
            reading: "sui".to_string(),
            strokes: 4,
            level: Level::Basic,
        };

        let front = KanjiRenderer.render("水", &kanji, false, &theme);
        assert_eq!(front.iter().map(text).collect::<Vec<_>>(), vec!["水", "basic", "4 strokes"]);

        let back = KanjiRenderer.render("水", &kanji, true, &theme);
        assert_eq!(back.iter().map(text).collect::<Vec<_>>(), vec!["水", "water", "sui"]);
        assert_eq!(back.len() as u16, KanjiRenderer.content_height());
    }

    #[test]
    fn test_card_renders_inside_border() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 7, 4);
        let mut buf = Buffer::empty(area);

        let lines = vec![Line::from("あ"), Line::from("a")];
        CharacterCard::new(lines, &theme).selected(true).render(area, &mut buf);

        assert_eq!(buf[(1, 1)].symbol(), "あ");
        assert_eq!(buf[(1, 2)].symbol(), "a");
        assert_eq!(buf[(0, 0)].fg, theme.primary);
    }

    #[test]
    fn test_card_zero_area() {
        let theme = Theme::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 5));
        CharacterCard::new(vec![Line::from("x")], &theme).render(Rect::new(0, 0, 0, 0), &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}

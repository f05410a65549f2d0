//! Chart drawing
//!
//! This module handles rendering the main UI:
//! - Tab bar (one tab per script)
//! - Sectioned card grid with scrolling
//! - Status bar

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Script};
use crate::partition::{partition, Entry};
use crate::ui::card::{CardRenderer, CharacterCard};
use crate::ui::layout::SectionGrid;
use crate::ui::theme::Theme;

/// Entries of one chart together with the renderer for their cards
pub(crate) struct ChartView<'a, A, R> {
    entries: &'a [Entry<A>],
    renderer: &'a R,
}

impl<'a, A, R: CardRenderer<A>> ChartView<'a, A, R> {
    pub(crate) fn new(entries: &'a [Entry<A>], renderer: &'a R) -> Self {
        Self { entries, renderer }
    }
}

/// Draw the whole screen, returning the scroll offset that keeps the
/// selection visible
pub(crate) fn draw_chart<A, R: CardRenderer<A>>(
    f: &mut Frame,
    app: &App,
    theme: &Theme,
    view: ChartView<'_, A, R>,
) -> usize {
    let area = f.area();
    let bg_block = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(1),    // Grid
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tabs(f, app, chunks[0], theme);
    let scroll = draw_grid(f, app, chunks[1], theme, &view);
    draw_status_bar(f, app, chunks[2], theme);
    scroll
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let titles: Vec<Line> = Script::ALL.iter().map(|s| Line::from(s.title())).collect();
    let selected = Script::ALL.iter().position(|s| *s == app.script()).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme.dimmed).bg(theme.background))
        .highlight_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" kana-chart ")
                .title_style(Style::default().fg(theme.primary)),
        );

    f.render_widget(tabs, area);
}

/// Draw the sectioned grid of cards
fn draw_grid<A, R: CardRenderer<A>>(
    f: &mut Frame,
    app: &App,
    area: Rect,
    theme: &Theme,
    view: &ChartView<'_, A, R>,
) -> usize {
    if area.width == 0 || area.height == 0 {
        return app.scroll();
    }

    let sections = partition(view.entries);
    let grid = SectionGrid::new(&sections);
    let selected = app.selected_index();
    let card_height = CharacterCard::height(view.renderer.content_height());

    let scroll = grid.scroll_to(selected, app.scroll(), card_height, area.height);
    let viewport_end = scroll + area.height as usize;

    for section in &sections {
        let columns = section.columns.max(1);
        let column_width = area.width / columns;

        for (local_idx, entry) in section.entries.iter().enumerate() {
            let index = section.offset + local_idx;
            let Some(top) = grid.card_top(index, card_height) else {
                continue;
            };

            // Only whole cards are drawn
            if top < scroll || top + card_height as usize > viewport_end {
                continue;
            }

            let col = (local_idx % columns as usize) as u16;
            let card_area = Rect {
                x: area.x + col * column_width,
                y: area.y + (top - scroll) as u16,
                width: column_width,
                height: card_height,
            };

            let lines = view.renderer.render(
                &entry.label,
                &entry.attributes,
                app.is_revealed(&entry.label),
                theme,
            );
            let card = CharacterCard::new(lines, theme).selected(index == selected);
            f.render_widget(card, card_area);
        }
    }

    scroll
}

/// Draw the status bar
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    if let Some(notice) = app.notice() {
        let bar = Paragraph::new(format!(" {}", notice))
            .style(Style::default().fg(theme.accent).bg(theme.background));
        f.render_widget(bar, area);
        return;
    }

    let total = app.total();
    let grid = app.grid();
    let position = grid.position(app.selected_index());

    let location = match position {
        Some(pos) => {
            let shape = grid.shapes()[pos.section];
            format!(
                " {}/{} | Section {}/{} · {} columns",
                app.selected_index() + 1,
                total,
                pos.section + 1,
                grid.shapes().len(),
                shape.columns
            )
        }
        None => " 0/0".to_string(),
    };

    let hints = if app.script() == Script::Kanji {
        " | ←↑↓→: move | Space: flip | Tab: chart | q: quit"
    } else {
        " | ←↑↓→: move | Tab: chart | q: quit"
    };

    let status_bar = Paragraph::new(format!("{location}{hints}"))
        .style(Style::default().fg(theme.dimmed).bg(theme.background));

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dataset::Library;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::io;
    use std::sync::{Arc, Mutex};

    fn render(app: &mut App, width: u16, height: u16) -> (Buffer, usize) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| crate::ui::draw(f, app)).unwrap();
        (terminal.backend().buffer().clone(), app.scroll())
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_first_row_of_cards() {
        let mut app = App::new(Library::builtin().unwrap(), Config::default());
        let (buf, scroll) = render(&mut app, 50, 30);
        assert_eq!(scroll, 0);

        // Tabs take 3 lines; first card row starts at y = 3, content at y = 4
        let text = row_text(&buf, 4);
        assert!(text.contains('あ'));
        assert!(text.contains('お'));
        assert!(row_text(&buf, 1).contains("Hiragana"));
        assert!(row_text(&buf, 29).contains("1/46"));
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut app = App::new(Library::builtin().unwrap(), Config::default());
        app.end();
        let (buf, scroll) = render(&mut app, 50, 14);
        // Grid viewport is 10 lines high; the last card must be fully visible
        assert!(scroll > 0);
        let grid_text: String = (3..13).map(|y| row_text(&buf, y)).collect();
        assert!(grid_text.contains('ん'));
    }

    #[test]
    fn test_kanji_sections_change_column_count() {
        let mut app = App::new(Library::builtin().unwrap(), Config::default());
        app.set_script(Script::Kanji);
        // Kanji cards are 5 lines: 10 rows of 5 columns, a gap, 4 rows of 4 columns
        let (buf, scroll) = render(&mut app, 40, 75);
        assert_eq!(scroll, 0);

        // First section: 40 / 5 = 8 cells per card
        assert_eq!(buf[(8, 3)].symbol(), "╭");
        assert!(row_text(&buf, 4).contains('一'));

        // One blank line after the first section's 50 lines
        assert_eq!(row_text(&buf, 53).trim(), "");

        // Second section: 40 / 4 = 10 cells per card
        assert_eq!(buf[(10, 54)].symbol(), "╭");
        assert_ne!(buf[(8, 54)].symbol(), "╭");
        assert!(row_text(&buf, 55).contains('本'));
        assert!(row_text(&buf, 74).contains("Section 1/2"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_theme_warns_once_across_frames() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut config = Config::default();
            config.appearance.theme = "neon".to_string();
            let mut app = App::new(Library::builtin().unwrap(), config);

            let mut terminal = Terminal::new(TestBackend::new(50, 30)).unwrap();
            for _ in 0..10 {
                terminal.draw(|f| crate::ui::draw(f, &mut app)).unwrap();
            }
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "{output}");
        assert!(warnings[0].contains("neon"));
    }
}

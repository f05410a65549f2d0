//! Drawing functions for the TUI
//!
//! - `chart` - tab bar, sectioned card grid, status bar

mod chart;

use ratatui::Frame;

use crate::app::{App, Script};
use crate::ui::card::{KanaRenderer, KanjiRenderer};

use chart::{draw_chart, ChartView};

/// Main draw function
pub fn draw(f: &mut Frame, app: &mut App) {
    let kana = KanaRenderer {
        show_romaji: app.config().appearance.show_romaji,
    };

    let theme = app.theme();
    let library = app.library();
    let scroll = match app.script() {
        Script::Hiragana => draw_chart(f, app, theme, ChartView::new(library.hiragana.entries(), &kana)),
        Script::Katakana => draw_chart(f, app, theme, ChartView::new(library.katakana.entries(), &kana)),
        Script::Kanji => draw_chart(f, app, theme, ChartView::new(library.kanji.entries(), &KanjiRenderer)),
    };
    app.set_scroll(scroll);
}

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::Config;
use crate::dataset::Library;
use crate::partition::partition;
use crate::ui::layout::{Direction, SectionGrid};
use crate::ui::theme::Theme;

/// Which chart is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Hiragana,
    Katakana,
    Kanji,
}

impl Script {
    pub const ALL: [Script; 3] = [Script::Hiragana, Script::Katakana, Script::Kanji];

    pub fn title(&self) -> &'static str {
        match self {
            Script::Hiragana => "Hiragana",
            Script::Katakana => "Katakana",
            Script::Kanji => "Kanji",
        }
    }

    fn position(&self) -> usize {
        Script::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Script {
        Script::ALL[(self.position() + 1) % Script::ALL.len()]
    }

    pub fn previous(&self) -> Script {
        Script::ALL[(self.position() + Script::ALL.len() - 1) % Script::ALL.len()]
    }
}

/// Application state
pub struct App {
    /// Loaded charts
    library: Library,
    /// Chart on screen
    script: Script,
    /// Selected entry index, one per chart
    selected: [usize; 3],
    /// First visible line of the grid
    scroll: usize,
    /// Kanji whose flashcard is turned over
    revealed: HashSet<String>,
    /// Message shown in the status bar (e.g. a failed reload)
    notice: Option<String>,
    /// Theme resolved from the config at startup
    theme: Theme,
    /// Configuration
    config: Config,
}

impl App {
    pub fn new(library: Library, config: Config) -> Self {
        let script = config.appearance.start_script;
        let theme = config.resolve_theme();
        Self {
            library,
            script,
            selected: [0; 3],
            scroll: 0,
            revealed: HashSet::new(),
            notice: None,
            theme,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn script(&self) -> Script {
        self.script
    }

    pub fn selected_index(&self) -> usize {
        self.selected[self.script.position()]
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: usize) {
        self.scroll = scroll;
    }

    /// Number of entries in the current chart
    pub fn total(&self) -> usize {
        match self.script {
            Script::Hiragana => self.library.hiragana.len(),
            Script::Katakana => self.library.katakana.len(),
            Script::Kanji => self.library.kanji.len(),
        }
    }

    /// Label of the selected entry, if the chart is not empty
    pub fn selected_label(&self) -> Option<&str> {
        let index = self.selected_index();
        let entry = match self.script {
            Script::Hiragana => self.library.hiragana.get(index).map(|e| &e.label),
            Script::Katakana => self.library.katakana.get(index).map(|e| &e.label),
            Script::Kanji => self.library.kanji.get(index).map(|e| &e.label),
        };
        entry.map(String::as_str)
    }

    /// Grid for the current chart
    pub fn grid(&self) -> SectionGrid {
        match self.script {
            Script::Hiragana => SectionGrid::new(&partition(self.library.hiragana.entries())),
            Script::Katakana => SectionGrid::new(&partition(self.library.katakana.entries())),
            Script::Kanji => SectionGrid::new(&partition(self.library.kanji.entries())),
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }

    pub fn is_revealed(&self, label: &str) -> bool {
        self.revealed.contains(label)
    }

    /// Switch to a chart
    pub fn set_script(&mut self, script: Script) {
        if script != self.script {
            self.script = script;
            self.scroll = 0;
        }
    }

    pub fn next_script(&mut self) {
        self.set_script(self.script.next());
    }

    pub fn previous_script(&mut self) {
        self.set_script(self.script.previous());
    }

    /// Move selection in the grid
    pub fn step(&mut self, direction: Direction) {
        let next = self.grid().step(self.selected_index(), direction);
        self.selected[self.script.position()] = next;
    }

    pub fn home(&mut self) {
        self.selected[self.script.position()] = self.grid().move_home();
    }

    pub fn end(&mut self) {
        self.selected[self.script.position()] = self.grid().move_end();
    }

    /// Turn over the selected kanji flashcard
    pub fn toggle_reveal(&mut self) {
        if self.script != Script::Kanji {
            return;
        }
        if let Some(label) = self.selected_label().map(str::to_string) {
            if !self.revealed.remove(&label) {
                self.revealed.insert(label);
            }
        }
    }

    /// Turn every flashcard face down
    pub fn hide_all(&mut self) {
        self.revealed.clear();
    }

    /// Replace the charts after a reload, keeping selections in range
    pub fn replace_library(&mut self, library: Library) {
        self.library = library;
        let totals = [
            self.library.hiragana.len(),
            self.library.katakana.len(),
            self.library.kanji.len(),
        ];
        for (selected, total) in self.selected.iter_mut().zip(totals) {
            *selected = (*selected).min(total.saturating_sub(1));
        }
        let kanji = &self.library.kanji;
        self.revealed
            .retain(|label| kanji.entries().iter().any(|e| &e.label == label));
    }
}

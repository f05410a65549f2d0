use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::Script;
use crate::ui::theme::{serde_color, Theme};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub datasets: DatasetConfig,
    pub appearance: AppearanceConfig,
    pub reload: ReloadConfig,
}

/// Optional dataset files replacing the built-in charts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub hiragana: Option<PathBuf>,
    pub katakana: Option<PathBuf>,
    pub kanji: Option<PathBuf>,
}

impl DatasetConfig {
    /// Whether any dataset comes from disk
    pub fn has_files(&self) -> bool {
        self.hiragana.is_some() || self.katakana.is_some() || self.kanji.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme preset: "dark", "light", "paper"
    pub theme: String,
    /// Chart shown at startup
    pub start_script: Script,
    /// Show romaji under kana characters
    pub show_romaji: bool,
    /// Hex color overriding the preset's primary color
    #[serde(with = "serde_color")]
    pub primary: Option<Color>,
}

/// Background reload of dataset files while the terminal has focus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            start_script: Script::Hiragana,
            show_romaji: true,
            primary: None,
        }
    }
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 5,
        }
    }
}

impl ReloadConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Default config location under the user's config dir
    pub fn default_path() -> String {
        dirs::config_dir()
            .map(|dir| dir.join("kana-chart/config.toml").display().to_string())
            .unwrap_or_else(|| "~/.config/kana-chart/config.toml".to_string())
    }

    /// Resolve the configured theme preset, falling back to the default.
    ///
    /// Warns on an unknown preset; call once, not per frame.
    pub fn resolve_theme(&self) -> Theme {
        let theme = Theme::from_preset(&self.appearance.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme preset '{}', using default", self.appearance.theme);
            Theme::default()
        });

        match self.appearance.primary {
            Some(color) => theme.with_primary(color),
            None => theme,
        }
    }
}

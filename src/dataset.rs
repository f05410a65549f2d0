//! Character datasets
//!
//! A dataset is a JSON object mapping each character to its attributes:
//!
//! ```json
//! { "あ": { "romaji": "a" }, "い": { "romaji": "i" } }
//! ```
//!
//! Document order is kept. Duplicate labels and malformed records are
//! rejected here, before anything reaches the grid.

use anyhow::{Context, Result};
use serde::de::{self, Deserialize, DeserializeOwned, Deserializer, MapAccess, Visitor};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::config::DatasetConfig;
use crate::partition::{partition, Entry, Section};

const HIRAGANA_JSON: &str = include_str!("../data/hiragana.json");
const KATAKANA_JSON: &str = include_str!("../data/katakana.json");
const KANJI_JSON: &str = include_str!("../data/kanji.json");

/// Dataset validation error
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("duplicate label `{0}`")]
    DuplicateLabel(String),
    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Attributes of a Hiragana or Katakana character
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Kana {
    pub romaji: String,
}

/// Attributes of a Kanji flashcard
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Kanji {
    pub meaning: String,
    pub reading: String,
    pub strokes: u32,
    pub level: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Basic,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Basic => "basic",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

/// Ordered entries with unique labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset<A> {
    entries: Vec<Entry<A>>,
}

impl<A> Default for Dataset<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<A> Dataset<A> {
    /// Build a dataset, rejecting duplicate labels
    pub fn new(entries: Vec<Entry<A>>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.label.as_str()) {
                return Err(DatasetError::DuplicateLabel(entry.label.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry<A>] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry<A>> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display sections for this dataset
    pub fn sections(&self) -> Vec<Section<'_, A>> {
        partition(&self.entries)
    }
}

impl<A: DeserializeOwned> Dataset<A> {
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a dataset file, expanding `~`
    pub fn load(path: &Path) -> Result<Self> {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        let path = PathBuf::from(expanded);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read dataset from {}", path.display()))?;
        let dataset = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse dataset from {}", path.display()))?;
        tracing::debug!("Loaded {} entries from {}", dataset.len(), path.display());
        Ok(dataset)
    }
}

impl<'de, A: Deserialize<'de>> Deserialize<'de> for Dataset<A> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DatasetVisitor<A>(PhantomData<A>);

        impl<'de, A: Deserialize<'de>> Visitor<'de> for DatasetVisitor<A> {
            type Value = Dataset<A>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping labels to attribute records")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, attributes)) = map.next_entry::<String, A>()? {
                    entries.push(Entry::new(label, attributes));
                }
                Dataset::new(entries).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_map(DatasetVisitor(PhantomData))
    }
}

/// The three charts shown by the application
#[derive(Debug, Clone)]
pub struct Library {
    pub hiragana: Dataset<Kana>,
    pub katakana: Dataset<Kana>,
    pub kanji: Dataset<Kanji>,
}

impl Library {
    /// Datasets compiled into the binary
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            hiragana: Dataset::from_json_str(HIRAGANA_JSON).context("built-in hiragana")?,
            katakana: Dataset::from_json_str(KATAKANA_JSON).context("built-in katakana")?,
            kanji: Dataset::from_json_str(KANJI_JSON).context("built-in kanji")?,
        })
    }

    /// Built-in datasets, each replaced by its configured file if any
    pub fn load(config: &DatasetConfig) -> Result<Self> {
        let mut library = Self::builtin()?;
        if let Some(path) = &config.hiragana {
            library.hiragana = Dataset::load(path)?;
        }
        if let Some(path) = &config.katakana {
            library.katakana = Dataset::load(path)?;
        }
        if let Some(path) = &config.kanji {
            library.kanji = Dataset::load(path)?;
        }
        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_keeps_document_order() {
        let json = r#"{"ん": {"romaji": "n"}, "あ": {"romaji": "a"}, "か": {"romaji": "ka"}}"#;
        let dataset: Dataset<Kana> = Dataset::from_json_str(json).unwrap();
        let labels: Vec<_> = dataset.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["ん", "あ", "か"]);
        assert_eq!(dataset.get(2).unwrap().attributes.romaji, "ka");
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let json = r#"{"あ": {"romaji": "a"}, "あ": {"romaji": "o"}}"#;
        let err = Dataset::<Kana>::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("duplicate label `あ`"));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let entries = vec![Entry::new("a", 1), Entry::new("b", 2), Entry::new("a", 3)];
        match Dataset::new(entries) {
            Err(DatasetError::DuplicateLabel(label)) => assert_eq!(label, "a"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_null_attributes_rejected() {
        assert!(Dataset::<Kana>::from_json_str(r#"{"あ": null}"#).is_err());
        assert!(Dataset::<Kana>::from_json_str(r#"["あ"]"#).is_err());
    }

    #[test]
    fn test_kanji_level_parsing() {
        let json = r#"{"日": {"meaning": "sun", "reading": "nichi", "strokes": 4, "level": "basic"}}"#;
        let dataset: Dataset<Kanji> = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.entries()[0].attributes.level, Level::Basic);

        let bad = r#"{"日": {"meaning": "sun", "reading": "nichi", "strokes": 4, "level": "expert"}}"#;
        assert!(Dataset::<Kanji>::from_json_str(bad).is_err());
    }

    #[test]
    fn test_builtin_library_sizes() {
        let library = Library::builtin().unwrap();
        assert_eq!(library.hiragana.len(), 46);
        assert_eq!(library.katakana.len(), 46);
        assert!(library.kanji.len() > 46);

        assert_eq!(library.hiragana.sections().len(), 2);
        assert_eq!(library.kanji.sections()[1].columns, 4);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ア": {{"romaji": "a"}}}}"#).unwrap();

        let dataset: Dataset<Kana> = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_library_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ア": {{"romaji": "a"}}, "イ": {{"romaji": "i"}}}}"#).unwrap();

        let config = DatasetConfig {
            katakana: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let library = Library::load(&config).unwrap();
        assert_eq!(library.katakana.len(), 2);
        assert_eq!(library.hiragana.len(), 46);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = Dataset::<Kana>::load(Path::new("/nonexistent/kana.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset"));
    }
}

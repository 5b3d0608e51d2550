//! Puzzle definition shared by the interactive session and the verifier.

use crate::{ConfigError, Entry, GridSize, Position, PuzzleIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Clue texts keyed by entry id.
///
/// Grouping into across/down is editorial and does not have to follow the
/// physical orientation of the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clues {
    #[serde(default)]
    pub across: BTreeMap<u32, String>,
    #[serde(default)]
    pub down: BTreeMap<u32, String>,
}

/// Declarative puzzle definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default)]
    pub title: String,
    pub rows: usize,
    pub cols: usize,
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub clues: Clues,
    /// Cells highlighted once the puzzle is solved
    #[serde(default)]
    pub highlight: Vec<Position>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        let across = [
            (1, "Which financial ratio indicates the extent to which a company uses debt to finance assets?"),
            (3, "The \"Oracle of Omaha\""),
            (5, "This entrepreneur's Sneaker resale empire made Wall Street sweat"),
            (7, "His garage startup redefined personal computing"),
        ];
        let down = [
            (2, "War: Logistics, Business: ?"),
            (4, "A new business venture created to solve a problem with innovation and growth potential"),
            (6, "Once mocked as \"The facebook\" , now it owns multiple worlds"),
            (8, "Which company owns and produces xbox gaming consoles?"),
        ];

        Self {
            title: "The Boardroom".to_string(),
            rows: 10,
            cols: 12,
            entries: vec![
                Entry::new(1, "LEVERAGE", [5, 0], [5, 7]),
                Entry::new(2, "STRATEGY", [0, 3], [7, 3]),
                Entry::new(3, "BUFFETT", [8, 4], [8, 10]),
                // Declared end is one row past the grid; the answer still fits
                Entry::new(4, "STARTUP", [3, 5], [10, 5]),
                Entry::new(5, "STOCKX", [2, 6], [2, 11]),
                Entry::new(6, "META", [0, 7], [3, 7]),
                Entry::new(7, "JOBS", [6, 8], [6, 11]),
                Entry::new(8, "MICROSOFT", [0, 9], [8, 9]),
            ],
            clues: Clues {
                across: across.iter().map(|(id, t)| (*id, t.to_string())).collect(),
                down: down.iter().map(|(id, t)| (*id, t.to_string())).collect(),
            },
            // Y of STRATEGY, A of STARTUP, an F of BUFFETT, O of MICROSOFT, L of LEVERAGE
            highlight: vec![
                Position::new(7, 3),
                Position::new(5, 5),
                Position::new(8, 6),
                Position::new(4, 9),
                Position::new(5, 0),
            ],
        }
    }
}

impl PuzzleConfig {
    /// Largest accepted row or column count
    pub const MAX_DIMENSION: usize = 100;

    /// Parse and validate a JSON puzzle definition
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PuzzleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON puzzle definition from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.rows, self.cols)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.rows > Self::MAX_DIMENSION || self.cols > Self::MAX_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: Self::MAX_DIMENSION,
            });
        }

        let size = self.size();
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.id == 0 {
                return Err(ConfigError::InvalidId);
            }
            if !seen.insert(entry.id) {
                return Err(ConfigError::DuplicateId(entry.id));
            }
            if entry.answer.is_empty() {
                return Err(ConfigError::EmptyAnswer(entry.id));
            }
            if !entry.answer.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(ConfigError::InvalidAnswer {
                    id: entry.id,
                    answer: entry.answer.clone(),
                });
            }
            if !size.contains(entry.start) {
                return Err(ConfigError::StartOutOfBounds {
                    id: entry.id,
                    start: entry.start,
                });
            }
        }
        Ok(())
    }

    /// Clue text for an entry, whichever list it sits in
    pub fn clue(&self, id: u32) -> Option<&str> {
        self.clues
            .across
            .get(&id)
            .or_else(|| self.clues.down.get(&id))
            .map(String::as_str)
    }
}

/// A validated configuration together with its derived index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    config: PuzzleConfig,
    index: PuzzleIndex,
}

impl Puzzle {
    pub fn new(config: PuzzleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_validated(PuzzleConfig::from_json(json)?))
    }

    fn from_validated(config: PuzzleConfig) -> Self {
        let index = PuzzleIndex::build(config.size(), &config.entries);
        log::debug!(
            "built puzzle `{}`: {} entries, {} active cells",
            config.title,
            config.entries.len(),
            index.active_count()
        );
        Self { config, index }
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn index(&self) -> &PuzzleIndex {
        &self.index
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::from_validated(PuzzleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PuzzleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.size(), GridSize::new(10, 12));
        assert_eq!(config.clue(4).map(|c| c.starts_with("A new business")), Some(true));
        assert_eq!(config.clue(9), None);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PuzzleConfig::default();
        let parsed = PuzzleConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(Puzzle::new(parsed).unwrap(), Puzzle::default());
    }

    #[test]
    fn test_minimal_json() {
        let json = r#"{
            "rows": 3, "cols": 3,
            "entries": [{"id": 1, "answer": "CAT", "start": [0, 0], "end": [0, 2]}]
        }"#;
        let puzzle = Puzzle::from_json(json).unwrap();
        assert_eq!(puzzle.index().active_count(), 3);
        assert!(puzzle.config().highlight.is_empty());
        assert!(puzzle.config().clues.across.is_empty());
    }

    #[test]
    fn test_rejects_bad_entries() {
        let mut config = PuzzleConfig::default();
        config.entries.push(Entry::new(1, "DUP", [0, 0], [0, 2]));
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateId(1))));

        let mut config = PuzzleConfig::default();
        config.entries.push(Entry::new(0, "ZERO", [0, 0], [0, 3]));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidId)));

        let mut config = PuzzleConfig::default();
        config.entries.push(Entry::new(9, "", [0, 0], [0, 3]));
        assert!(matches!(config.validate(), Err(ConfigError::EmptyAnswer(9))));

        let mut config = PuzzleConfig::default();
        config.entries.push(Entry::new(9, "lower", [0, 0], [0, 4]));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAnswer { id: 9, .. })
        ));

        let mut config = PuzzleConfig::default();
        config.entries.push(Entry::new(9, "OUT", [10, 0], [10, 2]));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { id: 9, .. })
        ));

        let mut config = PuzzleConfig::default();
        config.rows = 0;
        assert!(matches!(Puzzle::new(config), Err(ConfigError::EmptyGrid)));
    }

    #[test]
    fn test_grid_size_limit() {
        let entry = r#"[{"id": 1, "answer": "HI", "start": [0, 0], "end": [0, 1]}]"#;
        let wide = format!(r#"{{"rows": 1, "cols": 20000, "entries": {}}}"#, entry);
        assert!(matches!(
            PuzzleConfig::from_json(&wide),
            Err(ConfigError::GridTooLarge { rows: 1, cols: 20000, max: 100 })
        ));

        let mut config = PuzzleConfig::default();
        config.rows = PuzzleConfig::MAX_DIMENSION;
        config.cols = PuzzleConfig::MAX_DIMENSION;
        assert!(config.validate().is_ok());
        config.rows += 1;
        assert!(matches!(
            Puzzle::new(config),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            PuzzleConfig::from_json("{\"rows\": 3}"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            PuzzleConfig::load("/nonexistent/puzzle.json"),
            Err(ConfigError::Io(_))
        ));
    }
}

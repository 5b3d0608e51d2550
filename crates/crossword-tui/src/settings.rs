use crossword_core::{ConfigError, PuzzleConfig};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "crossword";

/// `<config_dir>/crossword/puzzle.json`
pub fn default_puzzle_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("puzzle.json"))
}

/// `<data_local_dir>/crossword/crossword.log`, falling back to the temp dir
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("crossword.log")
}

/// Load the puzzle definition.
///
/// An explicit path must load. Without one the per-user puzzle file is used
/// when present, otherwise the built-in puzzle.
pub fn load_puzzle(explicit: Option<&Path>) -> Result<PuzzleConfig, ConfigError> {
    if let Some(path) = explicit {
        log::info!("loading puzzle from {}", path.display());
        return PuzzleConfig::load(path);
    }

    match default_puzzle_path() {
        Some(path) if path.is_file() => {
            log::info!("loading puzzle from {}", path.display());
            PuzzleConfig::load(path)
        }
        _ => Ok(PuzzleConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_must_exist() {
        let missing = Path::new("/nonexistent/crossword/puzzle.json");
        assert!(matches!(load_puzzle(Some(missing)), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_explicit_path_loads() {
        let path = std::env::temp_dir().join(format!("crossword-puzzle-{}.json", std::process::id()));
        let json = r#"{"rows": 2, "cols": 2, "entries": [{"id": 1, "answer": "HI", "start": [0, 0], "end": [0, 1]}]}"#;
        std::fs::write(&path, json).unwrap();

        let config = load_puzzle(Some(&path)).unwrap();
        assert_eq!(config.entries.len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_log_path_named() {
        assert!(default_log_path().ends_with("crossword/crossword.log"));
    }
}

use crossword_core::{
    InputResult, Nav, Position, Puzzle, PuzzleConfig, Session, Verifier, VerifyError,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

uniffi::setup_scaffolding!();

/// What an edit or navigation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum EditResult {
    /// Nothing changed (inactive cell, or blocked movement)
    Ignored,
    /// Only the focus moved
    Moved,
    /// The grid changed
    Updated,
    /// The grid changed and the puzzle is now solved (reported once)
    Solved,
}

impl From<InputResult> for EditResult {
    fn from(r: InputResult) -> Self {
        match r {
            InputResult::Ignored => EditResult::Ignored,
            InputResult::Moved => EditResult::Moved,
            InputResult::Updated => EditResult::Updated,
            InputResult::Solved => EditResult::Solved,
        }
    }
}

/// Navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
    Enter,
}

impl From<NavDirection> for Nav {
    fn from(d: NavDirection) -> Self {
        match d {
            NavDirection::Up => Nav::Up,
            NavDirection::Down => Nav::Down,
            NavDirection::Left => Nav::Left,
            NavDirection::Right => Nav::Right,
            NavDirection::Enter => Nav::Enter,
        }
    }
}

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct CellPosition {
    pub row: u32,
    pub col: u32,
}

impl From<Position> for CellPosition {
    fn from(pos: Position) -> Self {
        Self {
            row: pos.row as u32,
            col: pos.col as u32,
        }
    }
}

/// Cell state for UI rendering
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct CellState {
    pub row: u32,
    pub col: u32,
    /// Whether any entry covers this cell
    pub is_active: bool,
    /// Clue number when an entry starts here
    pub number: Option<u32>,
    /// Current letter, empty when unfilled
    pub value: String,
    /// Marked after the puzzle is solved
    pub is_highlighted: bool,
    pub is_focused: bool,
}

/// Outcome of checking a submission
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum VerifyOutcome {
    Pass,
    /// Some active cell is empty
    Incomplete,
    /// Every cell is filled but at least one letter is wrong
    Incorrect,
    /// The request body could not be read as a submission
    Malformed,
    /// The puzzle definition used for checking is itself invalid
    InvalidPuzzle { reason: String },
}

impl From<Result<(), VerifyError>> for VerifyOutcome {
    fn from(result: Result<(), VerifyError>) -> Self {
        match result {
            Ok(()) => VerifyOutcome::Pass,
            Err(VerifyError::IncompleteSubmission) => VerifyOutcome::Incomplete,
            Err(VerifyError::IncorrectSolution) => VerifyOutcome::Incorrect,
            Err(VerifyError::MalformedSubmission) => VerifyOutcome::Malformed,
        }
    }
}

/// Result of checking a puzzle definition
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum ConfigValidation {
    Valid,
    Invalid { reason: String },
}

/// The crossword game interface for mobile platforms
#[derive(uniffi::Object)]
pub struct CrosswordGame {
    session: Mutex<Session>,
}

impl CrosswordGame {
    fn with_puzzle(puzzle: Puzzle) -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(Session::new(Arc::new(puzzle))),
        })
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[uniffi::export]
impl CrosswordGame {
    /// Create a game for the built-in puzzle
    #[uniffi::constructor]
    pub fn new_default() -> Arc<Self> {
        Self::with_puzzle(Puzzle::default())
    }

    /// Commit typed text at a cell. Only the first character counts.
    pub fn type_text(&self, row: u32, col: u32, text: String) -> EditResult {
        let pos = Position::new(row as usize, col as usize);
        self.session().type_text(pos, &text).into()
    }

    /// Clear a cell, or step back to the previous cell when it is empty
    pub fn backspace(&self, row: u32, col: u32) -> EditResult {
        let pos = Position::new(row as usize, col as usize);
        self.session().backspace(pos).into()
    }

    /// Move focus from a cell to the nearest active cell in a direction
    pub fn navigate(&self, row: u32, col: u32, direction: NavDirection) -> EditResult {
        let pos = Position::new(row as usize, col as usize);
        self.session().navigate(pos, direction.into()).into()
    }

    /// Move focus to a cell. Returns false for inactive cells.
    pub fn set_focus(&self, row: u32, col: u32) -> bool {
        self.session()
            .set_focus(Position::new(row as usize, col as usize))
    }

    pub fn focus(&self) -> CellPosition {
        self.session().focus().into()
    }

    pub fn rows(&self) -> u32 {
        self.session().puzzle().index().size().rows as u32
    }

    pub fn cols(&self) -> u32 {
        self.session().puzzle().index().size().cols as u32
    }

    /// Get all cell states in row-major order (for bulk rendering)
    pub fn get_all_cells(&self) -> Vec<CellState> {
        self.session()
            .cells()
            .into_iter()
            .map(|view| CellState {
                row: view.pos.row as u32,
                col: view.pos.col as u32,
                is_active: view.active,
                number: view.number,
                value: view.value.map(String::from).unwrap_or_default(),
                is_highlighted: view.highlighted,
                is_focused: view.focused,
            })
            .collect()
    }

    pub fn is_solved(&self) -> bool {
        self.session().is_solved()
    }

    /// Clue text for an entry id
    pub fn clue(&self, id: u32) -> Option<String> {
        self.session()
            .puzzle()
            .config()
            .clue(id)
            .map(str::to_string)
    }

    pub fn title(&self) -> String {
        self.session().puzzle().config().title.clone()
    }

    /// Filled cells as a `{"r-c": "L"}` object
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session().snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Verification request body (`{"grid": {...}}`) for the current grid
    pub fn request_json(&self) -> String {
        self.session().request_json()
    }

    /// Cells marked once the puzzle is solved
    pub fn highlights(&self) -> Vec<CellPosition> {
        self.session()
            .highlights()
            .iter()
            .map(|pos| (*pos).into())
            .collect()
    }
}

// Free functions (UniFFI constructors can't return Option)

/// Create a game from a JSON puzzle definition. Returns None if it is invalid.
#[uniffi::export]
pub fn game_from_config_json(json: String) -> Option<Arc<CrosswordGame>> {
    Puzzle::from_json(&json).ok().map(CrosswordGame::with_puzzle)
}

/// Check a puzzle definition without creating a game
#[uniffi::export]
pub fn validate_config(json: String) -> ConfigValidation {
    match PuzzleConfig::from_json(&json) {
        Ok(_) => ConfigValidation::Valid,
        Err(e) => ConfigValidation::Invalid {
            reason: e.to_string(),
        },
    }
}

/// Check a verification request body against a puzzle definition.
/// `None` checks against the built-in puzzle.
#[uniffi::export]
pub fn verify_request(config_json: Option<String>, body: String) -> VerifyOutcome {
    let config = match config_json {
        Some(json) => match PuzzleConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                return VerifyOutcome::InvalidPuzzle {
                    reason: e.to_string(),
                }
            }
        },
        None => PuzzleConfig::default(),
    };
    Verifier::new(&config).verify_request(&body).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT: &str = r#"{"rows": 3, "cols": 3, "entries": [{"id": 1, "answer": "CAT", "start": [0, 0], "end": [0, 2]}]}"#;

    #[test]
    fn test_default_game_starts_at_first_active_cell() {
        let game = CrosswordGame::new_default();
        assert_eq!(game.rows(), 10);
        assert_eq!(game.cols(), 12);
        assert_eq!(game.focus(), CellPosition { row: 0, col: 3 });
        assert!(!game.is_solved());
        assert_eq!(game.get_all_cells().len(), 120);
    }

    #[test]
    fn test_solve_through_bindings() {
        let game = game_from_config_json(CAT.to_string()).unwrap();
        assert_eq!(game.type_text(0, 0, "c".to_string()), EditResult::Updated);
        assert_eq!(game.focus(), CellPosition { row: 0, col: 1 });
        assert_eq!(game.type_text(0, 1, "a".to_string()), EditResult::Updated);
        assert_eq!(game.type_text(0, 2, "t".to_string()), EditResult::Solved);
        assert!(game.is_solved());

        // Solved is only reported once
        assert_eq!(game.type_text(0, 2, "t".to_string()), EditResult::Updated);
        assert_eq!(
            verify_request(Some(CAT.to_string()), game.request_json()),
            VerifyOutcome::Pass
        );
    }

    #[test]
    fn test_cell_states() {
        let game = game_from_config_json(CAT.to_string()).unwrap();
        game.type_text(0, 0, "c".to_string());
        let cells = game.get_all_cells();
        assert_eq!(cells[0].value, "C");
        assert_eq!(cells[0].number, Some(1));
        assert!(cells[1].is_focused);
        assert!(!cells[3].is_active);
        assert_eq!(cells[3].value, "");
        assert_eq!(game.snapshot_json(), r#"{"0-0":"C"}"#);
    }

    #[test]
    fn test_navigation_and_backspace() {
        let game = game_from_config_json(CAT.to_string()).unwrap();
        assert_eq!(game.navigate(0, 0, NavDirection::Right), EditResult::Moved);
        assert_eq!(game.focus(), CellPosition { row: 0, col: 1 });
        assert_eq!(game.navigate(0, 1, NavDirection::Down), EditResult::Ignored);
        assert!(!game.set_focus(2, 2));
        assert!(game.set_focus(0, 2));

        game.type_text(0, 1, "A".to_string());
        assert_eq!(game.backspace(0, 1), EditResult::Updated);
        assert_eq!(game.snapshot_json(), "{}");
    }

    #[test]
    fn test_invalid_config() {
        assert!(game_from_config_json("not json".to_string()).is_none());
        assert_eq!(validate_config(CAT.to_string()), ConfigValidation::Valid);

        let empty = r#"{"rows": 0, "cols": 3, "entries": []}"#;
        assert!(matches!(
            validate_config(empty.to_string()),
            ConfigValidation::Invalid { .. }
        ));
        assert!(matches!(
            verify_request(Some(empty.to_string()), "{}".to_string()),
            VerifyOutcome::InvalidPuzzle { .. }
        ));

        let huge = r#"{"rows": 1, "cols": 20000, "entries": []}"#;
        assert!(game_from_config_json(huge.to_string()).is_none());
        assert!(matches!(
            validate_config(huge.to_string()),
            ConfigValidation::Invalid { reason } if reason.contains("limited to 100")
        ));
    }

    #[test]
    fn test_verify_outcomes() {
        let cat = Some(CAT.to_string());
        assert_eq!(
            verify_request(cat.clone(), r#"{"grid": {"0-0": "C"}}"#.to_string()),
            VerifyOutcome::Incomplete
        );
        assert_eq!(
            verify_request(
                cat.clone(),
                r#"{"grid": {"0-0": "C", "0-1": "O", "0-2": "T"}}"#.to_string()
            ),
            VerifyOutcome::Incorrect
        );
        assert_eq!(
            verify_request(cat, "{not json".to_string()),
            VerifyOutcome::Malformed
        );
        assert_eq!(
            verify_request(None, r#"{"grid": {}}"#.to_string()),
            VerifyOutcome::Incomplete
        );
    }

    #[test]
    fn test_highlights_after_solving() {
        let game = CrosswordGame::new_default();
        assert_eq!(game.title(), "The Boardroom");
        assert!(game.clue(1).is_some());
        assert!(game.highlights().is_empty());

        let puzzle = Puzzle::default();
        let mut last = EditResult::Ignored;
        for (pos, letter) in puzzle.index().solution() {
            last = game.type_text(pos.row as u32, pos.col as u32, letter.to_string());
        }
        assert_eq!(last, EditResult::Solved);
        assert_eq!(game.highlights().len(), 5);
        assert!(game.highlights().contains(&CellPosition { row: 5, col: 0 }));
        assert!(game.get_all_cells().iter().filter(|c| c.is_highlighted).count() == 5);
    }
}

//! Per-player input state: the fill-in grid, focus, and the solved latch.

use crate::{Position, Puzzle, PuzzleIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Letters typed so far, keyed by cell. Cleared cells are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillGrid {
    cells: BTreeMap<Position, char>,
}

impl FillGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        self.cells.get(&pos).copied()
    }

    pub fn set(&mut self, pos: Position, letter: Option<char>) {
        match letter {
            Some(c) => self.cells.insert(pos, c),
            None => self.cells.remove(&pos),
        };
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.cells.iter().map(|(p, c)| (*p, *c))
    }

    /// Wire form: `{"row-col": "L"}`
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.cells
            .iter()
            .map(|(pos, c)| (pos.key(), c.to_string()))
            .collect()
    }
}

/// Navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nav {
    Up,
    Down,
    Left,
    Right,
    /// Same as `Right`
    Enter,
}

impl Nav {
    fn delta(self) -> (isize, isize) {
        match self {
            Nav::Up => (-1, 0),
            Nav::Down => (1, 0),
            Nav::Left => (0, -1),
            Nav::Right | Nav::Enter => (0, 1),
        }
    }
}

/// An input event applied at the focused cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Text(String),
    Backspace,
    Nav(Nav),
}

/// What an event did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputResult {
    /// Nothing changed
    Ignored,
    /// Only the focus moved
    Moved,
    /// The fill-in grid changed
    Updated,
    /// The fill-in grid changed and the puzzle became solved
    Solved,
}

/// Everything a render surface needs to draw one cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub pos: Position,
    pub active: bool,
    pub number: Option<u32>,
    pub value: Option<char>,
    pub highlighted: bool,
    pub focused: bool,
}

/// One player's attempt at a puzzle
#[derive(Debug, Clone)]
pub struct Session {
    puzzle: Arc<Puzzle>,
    fill: FillGrid,
    focus: Position,
    solved: bool,
    highlights: BTreeSet<Position>,
}

impl Session {
    pub fn new(puzzle: Arc<Puzzle>) -> Self {
        let focus = puzzle
            .index()
            .active_cells()
            .next()
            .unwrap_or(Position::new(0, 0));
        Self {
            puzzle,
            fill: FillGrid::new(),
            focus,
            solved: false,
            highlights: BTreeSet::new(),
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    fn index(&self) -> &PuzzleIndex {
        self.puzzle.index()
    }

    pub fn fill(&self) -> &FillGrid {
        &self.fill
    }

    pub fn focus(&self) -> Position {
        self.focus
    }

    /// Once set this stays true, even if letters are later changed
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn highlights(&self) -> &BTreeSet<Position> {
        &self.highlights
    }

    pub fn active_count(&self) -> usize {
        self.index().active_count()
    }

    /// Active cells currently holding a letter
    pub fn filled_count(&self) -> usize {
        self.index()
            .active_cells()
            .filter(|pos| self.fill.get(*pos).is_some())
            .count()
    }

    /// Move focus to a cell. Only active cells take focus.
    pub fn set_focus(&mut self, pos: Position) -> bool {
        if !self.index().is_active(pos) {
            return false;
        }
        self.focus = pos;
        true
    }

    /// Apply an event at the focused cell
    pub fn apply(&mut self, event: InputEvent) -> InputResult {
        let at = self.focus;
        match event {
            InputEvent::Text(text) => self.type_text(at, &text),
            InputEvent::Backspace => self.backspace(at),
            InputEvent::Nav(nav) => self.navigate(at, nav),
        }
    }

    /// Commit typed text at `at`.
    ///
    /// Only the first character is kept, upper-cased. Empty text clears the
    /// cell. A committed letter moves focus to the next active cell down
    /// (vertical cells) or to the right (everything else).
    pub fn type_text(&mut self, at: Position, text: &str) -> InputResult {
        if !self.index().is_active(at) {
            log::trace!("ignoring input at inactive cell {}", at);
            return InputResult::Ignored;
        }

        let letter = text.chars().next().and_then(|c| c.to_uppercase().next());
        self.fill.set(at, letter);
        self.focus = at;

        if letter.is_some() {
            let down = self
                .index()
                .orientation_at(at)
                .is_some_and(|o| o.advances_down());
            let next = if down {
                self.index().scan(at, 1, 0)
            } else {
                self.index().scan(at, 0, 1)
            };
            if let Some(next) = next {
                self.focus = next;
            }
        }

        self.after_edit()
    }

    /// Delete at `at`.
    ///
    /// A filled cell is cleared in place. An empty cell hands the deletion to
    /// the nearest active cell to the left, or failing that above, which takes
    /// focus and is cleared.
    pub fn backspace(&mut self, at: Position) -> InputResult {
        if !self.index().is_active(at) {
            log::trace!("ignoring backspace at inactive cell {}", at);
            return InputResult::Ignored;
        }

        if self.fill.get(at).is_some() {
            self.fill.set(at, None);
            self.focus = at;
            return self.after_edit();
        }

        let target = self
            .index()
            .scan(at, 0, -1)
            .or_else(|| self.index().scan(at, -1, 0));

        match target {
            Some(target) => {
                self.focus = target;
                if self.fill.get(target).is_some() {
                    self.fill.set(target, None);
                    self.after_edit()
                } else {
                    InputResult::Moved
                }
            }
            None => InputResult::Ignored,
        }
    }

    /// Move to the nearest active cell in a direction, if there is one
    pub fn navigate(&mut self, at: Position, nav: Nav) -> InputResult {
        let (d_row, d_col) = nav.delta();
        match self.index().scan(at, d_row, d_col) {
            Some(next) => {
                self.focus = next;
                InputResult::Moved
            }
            None => InputResult::Ignored,
        }
    }

    /// Run the completion check after the fill-in grid changed
    fn after_edit(&mut self) -> InputResult {
        if self.solved || !self.check_complete() {
            return InputResult::Updated;
        }

        self.solved = true;
        let index = self.puzzle.index();
        self.highlights = self
            .puzzle
            .config()
            .highlight
            .iter()
            .copied()
            .filter(|pos| index.is_active(*pos) && index.solution_at(*pos).is_some())
            .collect();

        log::info!(
            "puzzle `{}` solved, {} highlighted cells",
            self.puzzle.config().title,
            self.highlights.len()
        );
        InputResult::Solved
    }

    /// Every active cell filled and matching the solution
    fn check_complete(&self) -> bool {
        let index = self.index();
        let all_filled = index.active_cells().all(|pos| self.fill.get(pos).is_some());
        let all_correct = index
            .solution()
            .iter()
            .all(|(pos, expected)| self.fill.get(*pos) == Some(*expected));
        all_filled && all_correct
    }

    pub fn cell(&self, pos: Position) -> CellView {
        let index = self.index();
        CellView {
            pos,
            active: index.is_active(pos),
            number: index.start_number(pos),
            value: self.fill.get(pos),
            highlighted: self.highlights.contains(&pos),
            focused: pos == self.focus,
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> Vec<CellView> {
        self.index()
            .size()
            .positions()
            .map(|pos| self.cell(pos))
            .collect()
    }

    /// Wire form of the fill-in grid
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.fill.snapshot()
    }

    /// Verification request body for the current grid
    pub fn request_json(&self) -> String {
        serde_json::json!({ "grid": self.snapshot() }).to_string()
    }
}

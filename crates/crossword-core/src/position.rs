use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the puzzle grid.
///
/// Serialized as a `[row, col]` pair. The text form `"row-col"` is the key
/// used by grid snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Snapshot key for this cell, e.g. `"5-0"`
    pub fn key(&self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    /// Offset by `n` unit steps, or `None` if that leaves the grid
    pub fn step(&self, step: Step, n: usize, size: GridSize) -> Option<Self> {
        let row = self.row as isize + step.d_row as isize * n as isize;
        let col = self.col as isize + step.d_col as isize * n as isize;
        size.position(row, col)
    }
}

impl From<[usize; 2]> for Position {
    fn from([row, col]: [usize; 2]) -> Self {
        Self::new(row, col)
    }
}

impl From<Position> for [usize; 2] {
    fn from(pos: Position) -> Self {
        [pos.row, pos.col]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Convert signed coordinates into a position if they fall inside the grid
    pub fn position(&self, row: isize, col: isize) -> Option<Position> {
        if row < 0 || col < 0 {
            return None;
        }
        let pos = Position::new(row as usize, col as usize);
        self.contains(pos).then_some(pos)
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }
}

/// Unit step between consecutive cells of an entry.
///
/// Each component is in `{-1, 0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub d_row: i8,
    pub d_col: i8,
}

impl Step {
    pub const RIGHT: Step = Step { d_row: 0, d_col: 1 };
    pub const LEFT: Step = Step { d_row: 0, d_col: -1 };
    pub const DOWN: Step = Step { d_row: 1, d_col: 0 };
    pub const UP: Step = Step { d_row: -1, d_col: 0 };

    /// Resolve the step leading from `start` toward `end`.
    ///
    /// Same row gives a horizontal step (rightward when the columns are also
    /// equal), same column gives a vertical step, and anything else falls
    /// back to rightward.
    pub fn resolve(start: Position, end: Position) -> Self {
        if start.row == end.row {
            if end.col >= start.col {
                Step::RIGHT
            } else {
                Step::LEFT
            }
        } else if start.col == end.col {
            if end.row >= start.row {
                Step::DOWN
            } else {
                Step::UP
            }
        } else {
            Step::RIGHT
        }
    }
}

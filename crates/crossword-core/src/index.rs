//! Aggregated lookup tables derived from the entry list.

use crate::{Entry, ExpandedEntry, GridSize, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Direction an entry runs through a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
    Both,
}

impl Orientation {
    /// Auto-advance goes down the column for vertical cells
    pub fn advances_down(&self) -> bool {
        matches!(self, Orientation::Vertical | Orientation::Both)
    }
}

/// Solution, active cells, start numbers and orientation for one puzzle.
///
/// Built in entry order; where entries share a cell the later entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleIndex {
    size: GridSize,
    entries: Vec<ExpandedEntry>,
    solution: BTreeMap<Position, char>,
    /// Active cells in the order entries first reach them
    entry_order: Vec<Position>,
    start_numbers: BTreeMap<Position, u32>,
    orientation: BTreeMap<Position, Orientation>,
}

impl PuzzleIndex {
    pub fn build(size: GridSize, entries: &[Entry]) -> Self {
        let entries: Vec<ExpandedEntry> = entries.iter().map(|e| e.expand(size)).collect();

        let mut solution = BTreeMap::new();
        let mut entry_order = Vec::new();
        let mut start_numbers = BTreeMap::new();
        let mut orientation = BTreeMap::new();

        for entry in &entries {
            if let Some(start) = entry.start() {
                start_numbers.insert(start, entry.id);
            }

            for (i, (pos, letter)) in entry.placed().enumerate() {
                match solution.insert(pos, letter) {
                    None => entry_order.push(pos),
                    Some(previous) if previous != letter => {
                        log::debug!(
                            "entry {} overwrites {} at {} with {}",
                            entry.id,
                            previous,
                            pos,
                            letter
                        );
                    }
                    Some(_) => {}
                }
                orientation.insert(pos, cell_orientation(&entry.cells, i));
            }
        }

        Self {
            size,
            entries,
            solution,
            entry_order,
            start_numbers,
            orientation,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn entries(&self) -> &[ExpandedEntry] {
        &self.entries
    }

    pub fn is_active(&self, pos: Position) -> bool {
        self.solution.contains_key(&pos)
    }

    /// Active cells in row-major order
    pub fn active_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.solution.keys().copied()
    }

    /// Active cells in entry order, each listed where it first appears
    pub fn active_in_entry_order(&self) -> &[Position] {
        &self.entry_order
    }

    pub fn active_count(&self) -> usize {
        self.solution.len()
    }

    pub fn solution_at(&self, pos: Position) -> Option<char> {
        self.solution.get(&pos).copied()
    }

    pub fn solution(&self) -> &BTreeMap<Position, char> {
        &self.solution
    }

    pub fn start_number(&self, pos: Position) -> Option<u32> {
        self.start_numbers.get(&pos).copied()
    }

    pub fn start_numbers(&self) -> &BTreeMap<Position, u32> {
        &self.start_numbers
    }

    pub fn orientation_at(&self, pos: Position) -> Option<Orientation> {
        self.orientation.get(&pos).copied()
    }

    /// Nearest active cell strictly past `from`, walking by `(d_row, d_col)`
    pub fn scan(&self, from: Position, d_row: isize, d_col: isize) -> Option<Position> {
        let mut row = from.row as isize + d_row;
        let mut col = from.col as isize + d_col;
        while let Some(pos) = self.size.position(row, col) {
            if self.is_active(pos) {
                return Some(pos);
            }
            row += d_row;
            col += d_col;
        }
        None
    }
}

/// Orientation of the `i`th cell judged by its neighbours within the same entry
fn cell_orientation(cells: &[Position], i: usize) -> Orientation {
    let pos = cells[i];
    let neighbours = [i.checked_sub(1).map(|p| cells[p]), cells.get(i + 1).copied()];

    let vertical = neighbours.iter().flatten().any(|n| n.col == pos.col);
    let horizontal = neighbours.iter().flatten().any(|n| n.row == pos.row);

    match (vertical, horizontal) {
        (true, true) => Orientation::Both,
        (true, false) => Orientation::Vertical,
        _ => Orientation::Horizontal,
    }
}

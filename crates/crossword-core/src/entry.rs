use crate::{GridSize, Position, Step};
use serde::{Deserialize, Serialize};

/// A word placement: its answer and the coordinates it runs between.
///
/// `end` only determines the writing direction; the number of cells comes
/// from the answer length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u32,
    pub answer: String,
    pub start: Position,
    pub end: Position,
}

impl Entry {
    pub fn new(id: u32, answer: &str, start: [usize; 2], end: [usize; 2]) -> Self {
        Self {
            id,
            answer: answer.to_string(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// Unit step from `start` toward `end`
    pub fn step(&self) -> Step {
        Step::resolve(self.start, self.end)
    }

    /// Lay the answer out on a grid of the given size.
    ///
    /// Stops at the first step that leaves the grid, so the tail of a
    /// too-long answer is dropped.
    pub fn expand(&self, size: GridSize) -> ExpandedEntry {
        let step = self.step();
        let letters: Vec<char> = self.answer.chars().collect();

        let mut cells = Vec::with_capacity(letters.len());
        for i in 0..letters.len() {
            match self.start.step(step, i, size) {
                Some(pos) => cells.push(pos),
                None => break,
            }
        }

        if cells.len() < letters.len() {
            log::debug!(
                "entry {} ({}) truncated to {} of {} letters at grid edge",
                self.id,
                self.answer,
                cells.len(),
                letters.len()
            );
        }

        ExpandedEntry {
            id: self.id,
            letters,
            cells,
            step,
        }
    }
}

/// An entry with concrete cell coordinates, one per placed letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedEntry {
    pub id: u32,
    /// Every letter of the answer, including any that did not fit
    pub letters: Vec<char>,
    /// Placed cells; may be shorter than `letters`
    pub cells: Vec<Position>,
    pub step: Step,
}

impl ExpandedEntry {
    pub fn start(&self) -> Option<Position> {
        self.cells.first().copied()
    }

    /// Placed cells paired with their expected letters
    pub fn placed(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.cells.iter().copied().zip(self.letters.iter().copied())
    }

    pub fn is_truncated(&self) -> bool {
        self.cells.len() < self.letters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: GridSize = GridSize::new(10, 12);

    #[test]
    fn test_expand_across() {
        let entry = Entry::new(1, "CAT", [0, 0], [0, 2]);
        let expanded = entry.expand(SIZE);
        assert_eq!(
            expanded.cells,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
        let placed: String = expanded.placed().map(|(_, c)| c).collect();
        assert_eq!(placed, "CAT");
        assert!(!expanded.is_truncated());
    }

    #[test]
    fn test_expand_in_bounds_matches_answer_length() {
        let entries = [
            Entry::new(1, "LEVERAGE", [5, 0], [5, 7]),
            Entry::new(2, "STRATEGY", [0, 3], [7, 3]),
            Entry::new(8, "MICROSOFT", [0, 9], [8, 9]),
            Entry::new(9, "BACK", [4, 4], [4, 1]),
        ];
        for entry in &entries {
            assert_eq!(entry.expand(SIZE).cells.len(), entry.answer.len());
        }
    }

    #[test]
    fn test_end_out_of_bounds_still_fits() {
        // Declared end lies past the last row but seven letters fit rows 3..=9
        let entry = Entry::new(4, "STARTUP", [3, 5], [10, 5]);
        let expanded = entry.expand(SIZE);
        assert_eq!(expanded.cells.len(), 7);
        assert_eq!(expanded.cells.last(), Some(&Position::new(9, 5)));
    }

    #[test]
    fn test_truncates_at_first_exit() {
        let entry = Entry::new(1, "ABCDEF", [0, 9], [0, 11]);
        let expanded = entry.expand(SIZE);
        assert_eq!(expanded.cells.len(), 3);
        assert!(expanded.is_truncated());

        let upward = Entry::new(2, "ABCD", [1, 0], [0, 0]);
        assert_eq!(upward.expand(SIZE).cells.len(), 2);
    }

    #[test]
    fn test_diagonal_defaults_right() {
        let entry = Entry::new(1, "AB", [2, 2], [4, 4]);
        let expanded = entry.expand(SIZE);
        assert_eq!(expanded.cells, vec![Position::new(2, 2), Position::new(2, 3)]);
    }

    #[test]
    fn test_json_shape() {
        let entry: Entry =
            serde_json::from_str(r#"{"id":3,"answer":"BUFFETT","start":[8,4],"end":[8,10]}"#)
                .unwrap();
        assert_eq!(entry, Entry::new(3, "BUFFETT", [8, 4], [8, 10]));
    }
}

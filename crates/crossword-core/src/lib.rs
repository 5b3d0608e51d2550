//! Crossword grid engine.
//!
//! Turns a list of word placements into a playable grid: entries are
//! expanded into cells, aggregated into a [`PuzzleIndex`], and played through
//! a [`Session`] that handles typing, deletion and navigation. A separately
//! built [`Verifier`] re-checks submitted grids against its own copy of the
//! solution.
//!
//! ```
//! use crossword_core::{Entry, Position, Puzzle, PuzzleConfig, Session, Verifier};
//! use std::sync::Arc;
//!
//! let config = PuzzleConfig {
//!     title: "demo".into(),
//!     rows: 3,
//!     cols: 3,
//!     entries: vec![Entry::new(1, "CAT", [0, 0], [0, 2])],
//!     clues: Default::default(),
//!     highlight: Vec::new(),
//! };
//! let verifier = Verifier::new(&config);
//! let mut session = Session::new(Arc::new(Puzzle::new(config).unwrap()));
//! for (col, letter) in ["c", "a", "t"].iter().enumerate() {
//!     session.type_text(Position::new(0, col), letter);
//! }
//! assert!(session.is_solved());
//! assert!(verifier.handle_request(&session.request_json()).ok);
//! ```

mod config;
mod entry;
mod error;
mod index;
mod position;
mod session;
mod verify;

pub use config::{Clues, Puzzle, PuzzleConfig};
pub use entry::{Entry, ExpandedEntry};
pub use error::{ConfigError, VerifyError};
pub use index::{Orientation, PuzzleIndex};
pub use position::{GridSize, Position, Step};
pub use session::{CellView, FillGrid, InputEvent, InputResult, Nav, Session};
pub use verify::{VerifyResponse, Verifier};

use crate::Position;
use thiserror::Error;

/// Problems with a puzzle definition, raised when it is loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read puzzle file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid puzzle json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    #[error("grid is {rows}x{cols}; rows and columns are limited to {max}")]
    GridTooLarge { rows: usize, cols: usize, max: usize },
    #[error("entry ids must be positive")]
    InvalidId,
    #[error("entry id {0} is used more than once")]
    DuplicateId(u32),
    #[error("entry {0} has an empty answer")]
    EmptyAnswer(u32),
    #[error("entry {id} answer `{answer}` must contain only A-Z")]
    InvalidAnswer { id: u32, answer: String },
    #[error("entry {id} starts at {start}, outside the grid")]
    StartOutOfBounds { id: u32, start: Position },
}

/// Reasons a submitted grid is rejected by [`crate::Verifier`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("Puzzle not fully filled")]
    IncompleteSubmission,
    #[error("Incorrect solution")]
    IncorrectSolution,
    #[error("Invalid payload")]
    MalformedSubmission,
}

impl VerifyError {
    /// Stable reason code carried in responses
    pub fn code(&self) -> &'static str {
        match self {
            VerifyError::IncompleteSubmission => "incomplete_submission",
            VerifyError::IncorrectSolution => "incorrect_solution",
            VerifyError::MalformedSubmission => "malformed_submission",
        }
    }
}

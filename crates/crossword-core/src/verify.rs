//! Authoritative re-check of a submitted grid.
//!
//! The verifier builds its own [`PuzzleIndex`] from the configuration rather
//! than trusting anything computed by the client session.

use crate::{PuzzleConfig, PuzzleIndex, VerifyError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response body returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<String>,
}

impl VerifyResponse {
    pub fn pass() -> Self {
        Self {
            ok: true,
            error: None,
            code: None,
        }
    }

    pub fn fail(err: &VerifyError) -> Self {
        Self {
            ok: false,
            error: Some(err.to_string()),
            code: Some(err.code().to_string()),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<Result<(), VerifyError>> for VerifyResponse {
    fn from(result: Result<(), VerifyError>) -> Self {
        match result {
            Ok(()) => Self::pass(),
            Err(err) => Self::fail(&err),
        }
    }
}

/// Stateless checker holding a trusted copy of the solution
#[derive(Debug, Clone)]
pub struct Verifier {
    index: PuzzleIndex,
}

impl Verifier {
    pub fn new(config: &PuzzleConfig) -> Self {
        Self {
            index: PuzzleIndex::build(config.size(), &config.entries),
        }
    }

    /// Check a snapshot map of `"row-col"` to letter.
    ///
    /// Every active cell must hold exactly one character equal to the
    /// solution letter. Cells are visited in entry order and the first
    /// failing cell decides the outcome.
    pub fn verify(&self, grid: &Map<String, Value>) -> Result<(), VerifyError> {
        for pos in self.index.active_in_entry_order() {
            let submitted = grid.get(&pos.key()).map(value_text).unwrap_or_default();
            let submitted = submitted.to_uppercase();

            let mut chars = submitted.chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    log::debug!("rejecting submission: {} is empty or overfull", pos);
                    return Err(VerifyError::IncompleteSubmission);
                }
            };
            if self.index.solution_at(*pos) != Some(letter) {
                log::debug!("rejecting submission: {} does not match", pos);
                return Err(VerifyError::IncorrectSolution);
            }
        }
        Ok(())
    }

    /// Check a request body of the form `{"grid": {...}}`.
    ///
    /// A missing or falsy `grid` counts as an empty submission, as does an
    /// array (it has no cell keys). Any other non-object `grid` is malformed.
    pub fn verify_request(&self, body: &str) -> Result<(), VerifyError> {
        let body: Value =
            serde_json::from_str(body).map_err(|_| VerifyError::MalformedSubmission)?;
        let grid = match body.get("grid") {
            Some(Value::Object(grid)) => grid.clone(),
            Some(Value::Array(_)) => Map::new(),
            Some(value) if is_falsy(value) => Map::new(),
            None => Map::new(),
            Some(_) => return Err(VerifyError::MalformedSubmission),
        };
        self.verify(&grid)
    }

    /// Verify a request body and build the response
    pub fn handle_request(&self, body: &str) -> VerifyResponse {
        let result = self.verify_request(body);
        match &result {
            Ok(()) => log::info!("submission verified"),
            Err(err) => log::warn!("submission rejected: {}", err.code()),
        }
        result.into()
    }
}

/// `null`, `false`, `0` and `""`
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text of a submitted cell value; falsy values read as empty
fn value_text(value: &Value) -> String {
    if is_falsy(value) {
        String::new()
    } else {
        display_text(value)
    }
}

/// Stringify the way the web client does: arrays join with commas and
/// `null` items vanish
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
        other => other.to_string(),
    }
}

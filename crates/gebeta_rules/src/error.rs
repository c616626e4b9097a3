//! State construction errors.

use derive_more::{Display, Error};
use tracing::instrument;

/// A game state that cannot exist: wrong board shape, broken seed total,
/// or contradictory turn attributes.
///
/// Raised only when a state is built from parts or deserialized, never
/// during play.
#[derive(Debug, Clone, Display, Error)]
#[display("State error: {} at {}:{}", message, file, line)]
pub struct StateError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StateError {
    /// Creates a new state error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for StateError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Malformed game state: {}", err))
    }
}

/// A player index other than 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Invalid player index {}: expected 0 or 1", index)]
pub struct InvalidPlayer {
    /// The rejected index.
    pub index: u8,
}

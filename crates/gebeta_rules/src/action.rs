//! Move rejections and their severities.
//!
//! Every rule violation is reported as a value. Callers decide how loudly to
//! surface it using [`MoveError::severity`].

use super::{Pit, Player};
use serde::{Deserialize, Serialize};

/// How a rejection should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The game cannot continue along this path.
    #[display("error")]
    Blocking,
    /// A slip worth pointing out; the player simply picks another pit.
    #[display("warning")]
    Advisory,
    /// Informational only.
    #[display("info")]
    Info,
}

/// Ways a race move can be wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RaceViolation {
    /// The row is not a player's home row.
    #[display("Invalid row for race phase move")]
    WrongRow,
    /// The player already ran their race.
    #[display("{} has already completed their race move", _0)]
    AlreadyRaced(Player),
    /// Races start from the leftmost pit only.
    #[display("During race phase, you can only move from your leftmost pit (hole {})", expected)]
    WrongPit {
        /// The leftmost pit's hole index.
        expected: usize,
    },
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MoveError {
    /// The game is already over.
    #[display("Game is over! Start a new game to continue playing")]
    GameFinished,

    /// No variant has been chosen yet.
    #[display("Game hasn't started yet. Choose a variant to begin")]
    NotStarted,

    /// The coordinates are outside the board.
    #[display("Pit {} is not on the board", _0)]
    OffBoard(Pit),

    /// A race move broke a race rule.
    #[display("{}", _0)]
    InvalidRaceMove(RaceViolation),

    /// The source pit has no seeds.
    #[display("Cannot move from an empty hole {}", _0)]
    EmptyPit(Pit),

    /// The row does not belong to the player to move.
    #[display("{} can only move from row {}", player, home_row)]
    WrongRow {
        /// The player to move.
        player: Player,
        /// The row they may sow from.
        home_row: usize,
    },

    /// A relay is pending and must be sown from its origin.
    #[display("{} must continue relay sowing from pit {}", player, origin)]
    RelayPending {
        /// The player to move.
        player: Player,
        /// The pit the relay continues from.
        origin: Pit,
    },

    /// The mover's home row is empty.
    #[display("{} has no valid moves left", _0)]
    NoMovesLeft(Player),
}

impl MoveError {
    /// How this rejection should be surfaced.
    pub fn severity(&self) -> Severity {
        match self {
            MoveError::EmptyPit(_) => Severity::Advisory,
            MoveError::InvalidRaceMove(RaceViolation::WrongPit { .. }) => Severity::Advisory,
            MoveError::GameFinished
            | MoveError::NotStarted
            | MoveError::OffBoard(_)
            | MoveError::InvalidRaceMove(_)
            | MoveError::WrongRow { .. }
            | MoveError::RelayPending { .. }
            | MoveError::NoMovesLeft(_) => Severity::Blocking,
        }
    }

    /// Whether the rejection blocks further play along this path.
    pub fn is_blocking(&self) -> bool {
        self.severity() == Severity::Blocking
    }
}

impl std::error::Error for MoveError {}

/// A message paired with its severity, for feedback that is not a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}", message)]
pub struct Notice {
    /// How to surface the message.
    pub severity: Severity,
    /// The message.
    pub message: &'static str,
}

//! Gebeta rules - a pure engine for two sowing games
//!
//! Two variants share one engine:
//!
//! - **12-hole** Gebeta: two rows of six pits, four seeds each, a store per
//!   player passed during sowing.
//! - **18-hole** Gabata: three rows of six pits, three seeds each, an opening
//!   race that decides who moves first, and relay sowing.
//!
//! # Architecture
//!
//! - **Types**: variants, players, pits, the board and the immutable game state
//! - **Rules**: sowing, capture, relay, race and game-over as pure functions
//! - **Contracts**: move validation as composable preconditions, with
//!   invariant checks as postconditions
//! - **Engine**: `start_game`, `apply_move` and `reset_game`
//! - **Hint**: wire types for the advisory move-suggestion collaborator
//!
//! # Example
//!
//! ```
//! use gebeta_rules::{Variant, apply_move, start_game};
//!
//! let state = start_game(Variant::TwelveHole);
//! let state = apply_move(&state, 0, 0).unwrap();
//! assert_eq!(state.board().rows()[0], [0, 5, 5, 5, 5, 4]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod engine;
mod error;
mod hint;
pub mod invariants;
mod phases;
mod pit;
pub mod rules;
mod types;

pub use action::{MoveError, Notice, RaceViolation, Severity};
pub use contracts::validate;
pub use engine::{apply_move, capture_report, legal_moves, reset_game, reset_notice, start_game};
pub use error::{InvalidPlayer, StateError};
pub use hint::{HintReply, HintRequest, HintResponse};
pub use phases::{Outcome, Phase, RaceRun, RaceState};
pub use pit::{HOLES, Pit};
pub use rules::{Capture, NoCapture};
pub use types::{Board, GameState, Player, Variant};

//! Board shape invariant: the board matches its variant for the whole game.

use super::super::{GameState, Phase};
use super::Invariant;

/// Invariant: the board has the variant's row count, and only variants
/// with a race can be in the race phase.
pub struct BoardShapeInvariant;

impl Invariant<GameState> for BoardShapeInvariant {
    fn holds(state: &GameState) -> bool {
        let rows_match = state.board().row_count() == state.variant().rows();
        let race_allowed = !matches!(state.phase(), Phase::Race(_)) || state.variant().has_race();
        rows_match && race_allowed
    }

    fn description() -> &'static str {
        "Board dimensions and phase match the variant"
    }
}

//! Seed total invariant: seeds are neither created nor destroyed.

use super::super::GameState;
use super::Invariant;

/// Invariant: once a game has started, board plus stores hold exactly the
/// variant's total (48 or 54). The setup state holds none.
pub struct SeedTotalInvariant;

impl Invariant<GameState> for SeedTotalInvariant {
    fn holds(state: &GameState) -> bool {
        let expected = if state.phase().is_started() {
            state.variant().total_seeds()
        } else {
            0
        };
        state.total_seeds() == u64::from(expected)
    }

    fn description() -> &'static str {
        "Board and stores hold the variant's seed total"
    }
}

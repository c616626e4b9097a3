//! Turn consistency invariant: turn attributes do not contradict each other.

use super::super::rules::RELAY_MAX_CHAIN;
use super::super::{GameState, Phase, Player};
use super::Invariant;

/// Invariant: a winner only exists once the game is over, a finished game
/// is in the playing phase, and a pending relay belongs to a running
/// eighteen-hole game and points at a pit on the board.
///
/// A race still in progress is missing at least one run and has no winner;
/// a decided race has already handed over to play.
pub struct TurnConsistentInvariant;

impl Invariant<GameState> for TurnConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let winner_ok = state.winner().is_none() || state.is_over();
        let over_ok = !state.is_over() || matches!(state.phase(), Phase::Playing);
        let race_ok = state.race().is_none_or(|race| {
            race.winner().is_none() && !Player::BOTH.iter().all(|&player| race.has_raced(player))
        });
        let relay_ok = match state.relay_origin() {
            None => !state.relay_sowing() && state.relay_chain() == 0,
            Some(origin) => {
                state.relay_sowing()
                    && state.variant().has_race()
                    && !state.is_over()
                    && matches!(state.phase(), Phase::Playing)
                    && state.board().contains(origin)
                    && state.relay_chain() <= RELAY_MAX_CHAIN
            }
        };
        winner_ok && over_ok && race_ok && relay_ok
    }

    fn description() -> &'static str {
        "Winner, game-over, race and relay attributes are consistent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pit, RaceRun, Variant, start_game};

    #[test]
    fn test_new_game_holds() {
        assert!(TurnConsistentInvariant::holds(&start_game(Variant::EighteenHole)));
    }

    #[test]
    fn test_relay_during_race_violates() {
        let mut state = start_game(Variant::EighteenHole);
        state.set_relay(Some(Pit::new(0, 1)));
        assert!(!TurnConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_race_with_both_runs_violates() {
        let mut state = start_game(Variant::EighteenHole);
        let run = RaceRun {
            steps: 3,
            landed_empty: false,
        };
        if let Phase::Race(race) = state.phase_mut() {
            race.record(Player::First, run);
            assert!(TurnConsistentInvariant::holds(&state));
        }
        if let Phase::Race(race) = state.phase_mut() {
            race.record(Player::Second, run);
        }
        assert!(!TurnConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_relay_chain_past_limit_violates() {
        let mut state = start_game(Variant::EighteenHole);
        state.set_phase(Phase::Playing);
        for _ in 0..RELAY_MAX_CHAIN {
            state.set_relay(Some(Pit::new(0, 1)));
        }
        assert!(TurnConsistentInvariant::holds(&state));
        state.set_relay(Some(Pit::new(0, 1)));
        assert!(!TurnConsistentInvariant::holds(&state));
        state.set_relay(None);
        assert_eq!(state.relay_chain(), 0);
        assert!(TurnConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_finished_game_with_winner_holds() {
        let mut state = start_game(Variant::TwelveHole);
        state.finish(Some(Player::Second));
        assert!(TurnConsistentInvariant::holds(&state));
    }
}

//! Contract-based move validation.
//!
//! Contracts define correctness through preconditions and postconditions:
//! a move may only be applied when its precondition holds, and the state it
//! produces must satisfy the postcondition. The precondition is the move
//! validator; each check below is one rule, composed in a fixed order.

use super::action::{MoveError, RaceViolation};
use super::invariants::{GebetaInvariants, InvariantSet, InvariantViolation};
use super::rules::race_start;
use super::{GameState, Phase, Pit, RaceState};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not ended.
pub struct GameNotFinished;

impl GameNotFinished {
    /// Rejects moves once the game is over.
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        if state.is_over() {
            Err(MoveError::GameFinished)
        } else {
            Ok(())
        }
    }
}

/// Precondition: a variant has been chosen.
pub struct GameStarted;

impl GameStarted {
    /// Rejects moves at the setup screen.
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        match state.phase() {
            Phase::Setup => Err(MoveError::NotStarted),
            Phase::Race(_) | Phase::Playing => Ok(()),
        }
    }
}

/// Precondition: the pit lies on the board.
pub struct OnBoard;

impl OnBoard {
    /// Rejects coordinates outside the board.
    pub fn check(pit: &Pit, state: &GameState) -> Result<(), MoveError> {
        if state.board().contains(*pit) {
            Ok(())
        } else {
            Err(MoveError::OffBoard(*pit))
        }
    }
}

/// Precondition for race moves: a home row, a player who has not raced,
/// and that player's leftmost pit.
pub struct RaceMoveLegal;

impl RaceMoveLegal {
    /// Checks the race rules for `pit`.
    #[instrument(skip(state, race))]
    pub fn check(pit: &Pit, state: &GameState, race: &RaceState) -> Result<(), MoveError> {
        let variant = state.variant();
        let racer = variant
            .row_owner(pit.row)
            .ok_or(MoveError::InvalidRaceMove(RaceViolation::WrongRow))?;

        if race.has_raced(racer) {
            return Err(MoveError::InvalidRaceMove(RaceViolation::AlreadyRaced(racer)));
        }

        let expected = race_start(variant, racer).hole;
        if pit.hole != expected {
            return Err(MoveError::InvalidRaceMove(RaceViolation::WrongPit { expected }));
        }
        Ok(())
    }
}

/// Precondition: the source pit holds seeds.
pub struct PitNotEmpty;

impl PitNotEmpty {
    /// Rejects sowing from an empty pit.
    pub fn check(pit: &Pit, state: &GameState) -> Result<(), MoveError> {
        if state.board().get(*pit).unwrap_or(0) == 0 {
            Err(MoveError::EmptyPit(*pit))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the mover sows from their own row, or from the relay
/// origin while a relay is pending.
pub struct MoverOwnsRow;

impl MoverOwnsRow {
    /// Rejects pits the current player may not sow from.
    pub fn check(pit: &Pit, state: &GameState) -> Result<(), MoveError> {
        let player = state.current_player();
        if let Some(origin) = state.relay_origin() {
            return if *pit == origin {
                Ok(())
            } else {
                Err(MoveError::RelayPending { player, origin })
            };
        }

        let home_row = state.variant().home_row(player);
        if pit.row != home_row {
            Err(MoveError::WrongRow { player, home_row })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the mover's home row still has seeds.
///
/// Game-over detection should make this unreachable.
pub struct PlayerHasMoves;

impl PlayerHasMoves {
    /// Rejects moves when the current player's home row is empty.
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        let player = state.current_player();
        if state.board().row_is_empty(state.variant().home_row(player)) {
            warn!(%player, "Home row empty in an unfinished game");
            Err(MoveError::NoMovesLeft(player))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: every rule for the current phase, in order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(pit: &Pit, state: &GameState) -> Result<(), MoveError> {
        GameNotFinished::check(state)?;
        GameStarted::check(state)?;
        OnBoard::check(pit, state)?;

        match state.phase() {
            Phase::Race(race) => RaceMoveLegal::check(pit, state, race),
            Phase::Setup | Phase::Playing => {
                PitNotEmpty::check(pit, state)?;
                MoverOwnsRow::check(pit, state)?;
                PlayerHasMoves::check(state)
            }
        }
    }
}

/// Reports whether sowing from `(row, hole)` is legal, without touching the
/// state.
pub fn validate(state: &GameState, row: usize, hole: usize) -> Result<(), MoveError> {
    LegalMove::check(&Pit::new(row, hole), state)
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for sowing moves.
///
/// Preconditions: [`LegalMove`].
///
/// Postconditions:
/// - State invariants hold for the new state
/// - The variant is unchanged
/// - No seed was created or destroyed
pub struct MoveContract;

impl Contract<GameState, Pit> for MoveContract {
    fn pre(state: &GameState, action: &Pit) -> Result<(), MoveError> {
        LegalMove::check(action, state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = GebetaInvariants::check_all(after).err().unwrap_or_default();

        if before.variant() != after.variant() {
            violations.push(InvariantViolation::new("Variant is fixed for the whole game"));
        }
        if before.total_seeds() != after.total_seeds() {
            violations.push(InvariantViolation::new("Seeds are conserved across the move"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Asserts the move postcondition (panic on violation in debug builds).
#[instrument(skip(before, after))]
pub fn assert_invariants(before: &GameState, after: &GameState) {
    if let Err(violations) = MoveContract::post(before, after) {
        warn!(?violations, "Move postcondition violated");
        debug_assert!(false, "Move postcondition violated: {:?}", violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Variant, reset_game, start_game};

    #[test]
    fn test_precondition_checks_finished_before_phase() {
        let mut state = start_game(Variant::TwelveHole);
        state.finish(None);
        assert_eq!(MoveContract::pre(&state, &Pit::new(0, 0)), Err(MoveError::GameFinished));
    }

    #[test]
    fn test_setup_rejects_moves() {
        assert_eq!(validate(&reset_game(), 0, 0), Err(MoveError::NotStarted));
    }

    #[test]
    fn test_off_board_is_rejected() {
        let state = start_game(Variant::TwelveHole);
        assert_eq!(validate(&state, 2, 0), Err(MoveError::OffBoard(Pit::new(2, 0))));
        assert_eq!(validate(&state, 0, 6), Err(MoveError::OffBoard(Pit::new(0, 6))));
    }

    #[test]
    fn test_empty_pit_reported_before_wrong_row() {
        let state = GameState::from_parts(
            Variant::TwelveHole,
            vec![[4, 4, 4, 4, 4, 4], [0, 4, 4, 4, 4, 4]],
            [0, 4],
            Phase::Playing,
            Player::First,
        )
        .unwrap();
        assert_eq!(validate(&state, 1, 0), Err(MoveError::EmptyPit(Pit::new(1, 0))));
        assert_eq!(
            validate(&state, 1, 1),
            Err(MoveError::WrongRow {
                player: Player::First,
                home_row: 0
            })
        );
    }

    #[test]
    fn test_middle_row_is_never_a_source() {
        let state = GameState::from_parts(
            Variant::EighteenHole,
            vec![[3; 6]; 3],
            [0, 0],
            Phase::Playing,
            Player::First,
        )
        .unwrap();
        for hole in 0..6 {
            assert!(matches!(validate(&state, 1, hole), Err(MoveError::WrongRow { .. })));
        }
    }

    #[test]
    fn test_no_moves_left_is_defensive() {
        let state = GameState::from_parts(
            Variant::TwelveHole,
            vec![[0; 6], [8; 6]],
            [0, 0],
            Phase::Playing,
            Player::First,
        )
        .unwrap();
        assert_eq!(PlayerHasMoves::check(&state), Err(MoveError::NoMovesLeft(Player::First)));
    }

    #[test]
    fn test_race_row_and_pit_rules() {
        let state = start_game(Variant::EighteenHole);
        let race = state.race().unwrap();
        assert_eq!(
            RaceMoveLegal::check(&Pit::new(1, 0), &state, race),
            Err(MoveError::InvalidRaceMove(RaceViolation::WrongRow))
        );
        assert_eq!(
            RaceMoveLegal::check(&Pit::new(2, 0), &state, race),
            Err(MoveError::InvalidRaceMove(RaceViolation::WrongPit { expected: 5 }))
        );
        assert!(RaceMoveLegal::check(&Pit::new(2, 5), &state, race).is_ok());
        assert!(RaceMoveLegal::check(&Pit::new(0, 0), &state, race).is_ok());
    }

    #[test]
    fn test_postcondition_detects_lost_seed() {
        let before = start_game(Variant::TwelveHole);
        let mut after = before.clone();
        after.board_mut()[Pit::new(1, 1)] -= 1;
        let violations = MoveContract::post(&before, &after).unwrap_err();
        assert!(violations.iter().any(|v| v.description.contains("conserved")));
    }
}

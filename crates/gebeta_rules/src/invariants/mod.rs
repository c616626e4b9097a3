//! First-class invariants for Gebeta game states.
//!
//! Invariants are logical properties that must hold for every state the
//! engine hands out. They are testable independently, back
//! [`GameState::check_consistency`](crate::GameState::check_consistency),
//! and form the postcondition of the move contract.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        collect(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        collect(violations)
    }
}

pub mod board_shape;
pub mod seed_total;
pub mod turn_consistent;

pub use board_shape::BoardShapeInvariant;
pub use seed_total::SeedTotalInvariant;
pub use turn_consistent::TurnConsistentInvariant;

/// All Gebeta state invariants as a composable set.
pub type GebetaInvariants = (
    BoardShapeInvariant,
    SeedTotalInvariant,
    TurnConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameState, Variant, apply_move, start_game};

    #[test]
    fn test_invariant_set_holds_for_new_games() {
        assert!(GebetaInvariants::check_all(&start_game(Variant::TwelveHole)).is_ok());
        assert!(GebetaInvariants::check_all(&start_game(Variant::EighteenHole)).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let state = start_game(Variant::TwelveHole);
        let state = apply_move(&state, 0, 2).unwrap();
        let state = apply_move(&state, 1, 4).unwrap();
        assert!(GebetaInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = start_game(Variant::TwelveHole);
        state.board_mut()[crate::Pit::new(0, 0)] += 1;
        state.finish(Some(crate::Player::First));
        state.set_relay(Some(crate::Pit::new(0, 0)));

        let violations = GebetaInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type ShapeAndTotal = (BoardShapeInvariant, SeedTotalInvariant);
        assert!(ShapeAndTotal::check_all(&GameState::setup()).is_ok());
    }
}

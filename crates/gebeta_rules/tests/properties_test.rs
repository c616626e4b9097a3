//! Property tests over random legal play.

use gebeta_rules::{GameState, Pit, Variant, apply_move, legal_moves, start_game, validate};
use proptest::prelude::*;

fn variant() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::TwelveHole), Just(Variant::EighteenHole)]
}

/// Plays up to `choices.len()` moves, each picked from the legal moves by
/// index, and returns every state visited.
fn playout(variant: Variant, choices: &[usize]) -> Vec<GameState> {
    let mut states = vec![start_game(variant)];
    for &choice in choices {
        let state = states.last().expect("at least the start state");
        let moves = legal_moves(state);
        if moves.is_empty() {
            break;
        }
        let pit = moves[choice % moves.len()];
        let next = apply_move(state, pit.row, pit.hole).expect("legal move must apply");
        states.push(next);
    }
    states
}

proptest! {
    #[test]
    fn seeds_are_conserved(variant in variant(), choices in prop::collection::vec(any::<usize>(), 0..200)) {
        for state in playout(variant, &choices) {
            prop_assert_eq!(state.total_seeds(), u64::from(variant.total_seeds()));
            prop_assert!(state.check_consistency().is_ok());
        }
    }

    #[test]
    fn apply_move_is_deterministic(
        variant in variant(),
        choices in prop::collection::vec(any::<usize>(), 0..60),
        row in 0usize..3,
        hole in 0usize..6,
    ) {
        let states = playout(variant, &choices);
        let state = states.last().expect("at least the start state");
        prop_assert_eq!(apply_move(state, row, hole), apply_move(state, row, hole));
    }

    #[test]
    fn validator_and_engine_agree(
        variant in variant(),
        choices in prop::collection::vec(any::<usize>(), 0..60),
        row in 0usize..4,
        hole in 0usize..7,
    ) {
        let states = playout(variant, &choices);
        let state = states.last().expect("at least the start state");
        let verdict = validate(state, row, hole);
        match apply_move(state, row, hole) {
            Ok(_) => prop_assert!(verdict.is_ok()),
            Err(err) => prop_assert_eq!(verdict, Err(err)),
        }
    }

    #[test]
    fn finished_games_have_no_moves(variant in variant(), choices in prop::collection::vec(any::<usize>(), 0..400)) {
        let states = playout(variant, &choices);
        let last = states.last().expect("at least the start state");
        if last.is_over() {
            prop_assert!(legal_moves(last).is_empty());
            prop_assert_eq!(last.board().total(), 0);
            prop_assert!(last.outcome().is_some());
        } else {
            prop_assert!(!legal_moves(last).is_empty());
            let pit: Pit = legal_moves(last)[0];
            prop_assert!(validate(last, pit.row, pit.hole).is_ok());
        }
    }
}

//! The eighteen-hole race deciding who moves first.
//!
//! Each player sows once from the leftmost pit of their home row. The sow is
//! only simulated: it counts steps and notes whether the last seed found an
//! empty pit, and the real board carries into play untouched.

use super::super::{Board, Pit, Player, RaceRun, Variant};
use crate::pit::HOLES;
use tracing::{debug, instrument};

/// Longest race sow: one lap of the eighteen-pit ring.
pub const RACE_MAX_STEPS: u32 = Variant::EighteenHole.rows() as u32 * HOLES as u32;

/// The pit a player races from: hole 0 of row 0 for player 0, hole 5 of the
/// last row for player 1 (each player's left as they face the board).
pub const fn race_start(variant: Variant, player: Player) -> Pit {
    let hole = match player {
        Player::First => 0,
        Player::Second => HOLES - 1,
    };
    Pit::new(variant.home_row(player), hole)
}

/// Simulates a race sow from `start` on a scratch copy of `board`.
#[instrument(skip(board), fields(start = %start))]
pub fn simulate_run(board: &Board, start: Pit) -> RaceRun {
    let rows = board.row_count();
    let mut scratch = board.clone();
    let steps = scratch.take(start).min(RACE_MAX_STEPS);

    let mut at = start;
    let mut landed_empty = false;
    for _ in 0..steps {
        at = at.ring_successor(rows);
        landed_empty = scratch[at] == 0;
        scratch[at] += 1;
    }

    debug!(steps, landed_empty, last = %at, "Race run simulated");
    RaceRun { steps, landed_empty }
}

/// Picks the race winner from both runs.
///
/// A run ending in an empty pit wins outright. Otherwise fewer steps win,
/// and equal step counts go to player 1.
pub fn decide(first: RaceRun, second: RaceRun) -> Player {
    match (first.landed_empty, second.landed_empty) {
        (true, false) => Player::First,
        (false, true) => Player::Second,
        _ if first.steps < second.steps => Player::First,
        _ => Player::Second,
    }
}

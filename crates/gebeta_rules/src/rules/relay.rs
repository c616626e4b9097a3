//! Relay sowing on the eighteen-hole board.

use super::super::{Board, Pit, Variant};
use super::Terminal;

/// Most relay sows one turn may chain: one per seed in play.
///
/// A relay chain is forced, so a chain that revisits a position would
/// otherwise repeat forever.
pub const RELAY_MAX_CHAIN: u32 = Variant::EighteenHole.total_seeds();

/// The pit the mover must sow again from, if the relay rule applies.
///
/// Relay applies on the eighteen-hole board when the last seed landed in a
/// pit that already held seeds and no capture took place.
pub fn relay_origin(variant: Variant, board: &Board, terminal: Terminal, captured: bool) -> Option<Pit> {
    if !variant.has_race() || captured {
        return None;
    }
    terminal
        .pit()
        .filter(|&pit| board.get(pit).is_some_and(|seeds| seeds > 1))
}

/// Drops `origin` once `chain` relay sows have already been taken this
/// turn; the turn then passes as if the last seed had found an empty pit.
pub fn within_chain_limit(origin: Option<Pit>, chain: u32) -> Option<Pit> {
    origin.filter(|_| chain < RELAY_MAX_CHAIN)
}

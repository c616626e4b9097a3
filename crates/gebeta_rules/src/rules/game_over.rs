//! End-of-game detection, sweep and winner.

use super::super::{Board, Player, Variant};
use tracing::{info, instrument};

/// Whether either player's home row is empty.
pub fn is_finished(variant: Variant, board: &Board) -> bool {
    Player::BOTH
        .iter()
        .any(|&player| board.row_is_empty(variant.home_row(player)))
}

/// The player credited with a row's leftover seeds.
///
/// The eighteen-hole middle row goes to player 0.
pub fn sweep_recipient(variant: Variant, row: usize) -> Player {
    variant.row_owner(row).unwrap_or(Player::First)
}

/// Moves every seed left on the board into the stores.
#[instrument(skip(board, stores), fields(variant = %variant))]
pub fn sweep(variant: Variant, board: &mut Board, stores: &mut [u32; 2]) {
    for row in 0..board.row_count() {
        let recipient = sweep_recipient(variant, row);
        stores[recipient.index()] += board.row_sum(row);
    }
    board.clear();
    info!(store_0 = stores[0], store_1 = stores[1], "Board swept");
}

/// The player with strictly more seeds; `None` on equal stores.
pub fn decide_winner(stores: [u32; 2]) -> Option<Player> {
    match stores[0].cmp(&stores[1]) {
        std::cmp::Ordering::Greater => Some(Player::First),
        std::cmp::Ordering::Less => Some(Player::Second),
        std::cmp::Ordering::Equal => None,
    }
}

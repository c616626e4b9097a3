//! Counterclockwise seed distribution.

use super::super::{Board, Pit, Player, Variant};
use crate::pit::HOLES;
use tracing::{debug, instrument};

/// Where the last seed of a sow came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    /// A pit on the board.
    Pit(Pit),
    /// The mover's store (twelve-hole only).
    Store(Player),
}

impl Terminal {
    /// The terminal pit, unless the sow ended in a store.
    pub fn pit(self) -> Option<Pit> {
        match self {
            Terminal::Pit(pit) => Some(pit),
            Terminal::Store(_) => None,
        }
    }
}

/// Board and stores after a sow, plus where it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SowOutcome {
    /// The board after distribution.
    pub board: Board,
    /// The stores after distribution.
    pub stores: [u32; 2],
    /// Where the last seed landed.
    pub terminal: Terminal,
}

/// Lifts every seed from `source` and sows them one per position.
///
/// Twelve-hole boards run row 0 left to right, then row 1 right to left,
/// passing each player's store at the row ends; only the mover's store takes
/// a seed. Eighteen-hole boards form a single ring of `row * 6 + hole`
/// without stores. An empty source sows nothing and ends where it started.
#[instrument(skip(board), fields(variant = %variant, mover = %mover, source = %source))]
pub fn sow(board: &Board, stores: [u32; 2], variant: Variant, mover: Player, source: Pit) -> SowOutcome {
    let mut board = board.clone();
    let mut stores = stores;
    let seeds = board.take(source);

    let terminal = if seeds == 0 {
        Terminal::Pit(source)
    } else {
        match variant {
            Variant::TwelveHole => sow_twelve(&mut board, &mut stores, mover, source, seeds),
            Variant::EighteenHole => sow_ring(&mut board, variant.rows(), source, seeds),
        }
    };

    debug!(seeds, ?terminal, "Sowing finished");
    SowOutcome {
        board,
        stores,
        terminal,
    }
}

/// Next pit counterclockwise on the two-row board, and the owner of the
/// store passed on the way there.
fn twelve_successor(at: Pit) -> (Pit, Option<Player>) {
    match at.row {
        0 if at.hole < HOLES - 1 => (Pit::new(0, at.hole + 1), None),
        0 => (Pit::new(1, HOLES - 1), Some(Player::First)),
        _ if at.hole > 0 => (Pit::new(1, at.hole - 1), None),
        _ => (Pit::new(0, 0), Some(Player::Second)),
    }
}

fn sow_twelve(board: &mut Board, stores: &mut [u32; 2], mover: Player, source: Pit, mut seeds: u32) -> Terminal {
    let mut at = source;
    loop {
        let (next, store) = twelve_successor(at);
        if store == Some(mover) {
            stores[mover.index()] += 1;
            seeds -= 1;
            if seeds == 0 {
                return Terminal::Store(mover);
            }
        }
        board[next] += 1;
        seeds -= 1;
        at = next;
        if seeds == 0 {
            return Terminal::Pit(at);
        }
    }
}

fn sow_ring(board: &mut Board, rows: usize, source: Pit, seeds: u32) -> Terminal {
    let mut at = source;
    for _ in 0..seeds {
        at = at.ring_successor(rows);
        board[at] += 1;
    }
    Terminal::Pit(at)
}

//! Capture after the last seed lands.

use super::super::{Board, Pit, Player, Severity, Variant};
use tracing::{debug, instrument};

/// A capture that took place (or would take place).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capture {
    /// The terminal pit on the mover's row.
    pub pit: Pit,
    /// The pit across from it.
    pub opposite: Pit,
    /// Seeds moved into the mover's store.
    pub seeds: u32,
}

/// Why a landing does not capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum NoCapture {
    /// The pit is not on the mover's home row.
    #[display("Can only capture on your own row")]
    NotOwnRow,
    /// The pit held seeds before the last one landed.
    #[display("Can only capture when landing in hole with exactly 1 seed")]
    NotSingleSeed,
    /// Nothing to take across the board.
    #[display("Cannot capture from empty opposite hole")]
    OppositeEmpty,
}

impl NoCapture {
    /// How the reason should be surfaced.
    pub fn severity(&self) -> Severity {
        match self {
            NoCapture::NotOwnRow | NoCapture::NotSingleSeed => Severity::Blocking,
            NoCapture::OppositeEmpty => Severity::Info,
        }
    }
}

/// The pit across from `pit`, on the opponent's home row.
///
/// On the three-row board this skips the middle row, which is never
/// captured from.
pub fn opposite_pit(variant: Variant, mover: Player, pit: Pit) -> Pit {
    Pit::new(variant.home_row(mover.opponent()), pit.hole)
}

/// Reports whether a last seed in `pit` captures for `mover`.
///
/// A capture needs the pit on the mover's home row, holding exactly one
/// seed (it was empty before the landing), and a non-empty opposite pit.
pub fn capture_check(board: &Board, variant: Variant, mover: Player, pit: Pit) -> Result<Capture, NoCapture> {
    if pit.row != variant.home_row(mover) {
        return Err(NoCapture::NotOwnRow);
    }
    let landed = board.get(pit).unwrap_or(0);
    if landed != 1 {
        return Err(NoCapture::NotSingleSeed);
    }
    let opposite = opposite_pit(variant, mover, pit);
    let across = board.get(opposite).unwrap_or(0);
    if across == 0 {
        return Err(NoCapture::OppositeEmpty);
    }
    Ok(Capture {
        pit,
        opposite,
        seeds: landed + across,
    })
}

/// Applies the capture for a last seed in `pit`, if there is one.
#[instrument(skip(board, stores), fields(variant = %variant, mover = %mover, pit = %pit))]
pub fn resolve_capture(
    board: &mut Board,
    stores: &mut [u32; 2],
    variant: Variant,
    mover: Player,
    pit: Pit,
) -> Option<Capture> {
    match capture_check(board, variant, mover, pit) {
        Ok(capture) => {
            board[capture.pit] = 0;
            board[capture.opposite] = 0;
            stores[mover.index()] += capture.seeds;
            debug!(seeds = capture.seeds, opposite = %capture.opposite, "Captured");
            Some(capture)
        }
        Err(reason) => {
            debug!(%reason, "No capture");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_hole_capture_takes_both_pits() {
        let mut board = Board::from_rows(vec![[0, 0, 0, 1, 0, 0], [0, 0, 0, 3, 0, 0]]);
        let mut stores = [0, 0];
        let capture = resolve_capture(&mut board, &mut stores, Variant::TwelveHole, Player::First, Pit::new(0, 3));
        assert_eq!(capture.map(|c| c.seeds), Some(4));
        assert_eq!(stores, [4, 0]);
        assert_eq!(board.total(), 0);
    }

    #[test]
    fn test_opposite_skips_middle_row() {
        assert_eq!(
            opposite_pit(Variant::EighteenHole, Player::First, Pit::new(0, 2)),
            Pit::new(2, 2)
        );
        assert_eq!(
            opposite_pit(Variant::EighteenHole, Player::Second, Pit::new(2, 2)),
            Pit::new(0, 2)
        );
    }

    #[test]
    fn test_reasons_for_no_capture() {
        let board = Board::from_rows(vec![[2, 1, 0, 0, 0, 0], [5, 5, 0, 0, 0, 0], [0; 6]]);
        let v = Variant::EighteenHole;
        assert_eq!(
            capture_check(&board, v, Player::First, Pit::new(1, 0)),
            Err(NoCapture::NotOwnRow)
        );
        assert_eq!(
            capture_check(&board, v, Player::First, Pit::new(0, 0)),
            Err(NoCapture::NotSingleSeed)
        );
        // Middle row seeds do not count as the opposite pit.
        assert_eq!(
            capture_check(&board, v, Player::First, Pit::new(0, 1)),
            Err(NoCapture::OppositeEmpty)
        );
        assert_eq!(NoCapture::OppositeEmpty.severity(), Severity::Info);
    }
}

//! Board coordinates.

use serde::{Deserialize, Serialize};

/// Number of pits in every row, for both variants.
pub const HOLES: usize = 6;

/// A pit on the board, addressed by row and hole index.
///
/// Rows are numbered from player 0's side. Hole indices run 0..6 in every
/// row; the counterclockwise direction depends on the variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("({row}, {hole})")]
pub struct Pit {
    /// Row index.
    pub row: usize,
    /// Hole index within the row.
    pub hole: usize,
}

impl Pit {
    /// Creates a pit coordinate.
    pub const fn new(row: usize, hole: usize) -> Self {
        Self { row, hole }
    }

    /// Position of this pit on the three-row ring (`row * 6 + hole`).
    pub const fn ring_index(self) -> usize {
        self.row * HOLES + self.hole
    }

    /// Inverse of [`Pit::ring_index`].
    pub const fn from_ring_index(index: usize) -> Self {
        Self {
            row: index / HOLES,
            hole: index % HOLES,
        }
    }

    /// Next pit along a ring of `rows` full rows.
    pub const fn ring_successor(self, rows: usize) -> Self {
        Self::from_ring_index((self.ring_index() + 1) % (rows * HOLES))
    }
}

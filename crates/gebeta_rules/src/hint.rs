//! Wire types for the move-suggestion collaborator.
//!
//! The collaborator is advisory. Its replies never touch a [`GameState`];
//! they only name a pit worth highlighting.

use super::{Board, GameState, HOLES, Pit, Player, Variant};
use serde::{Deserialize, Serialize};

/// The position sent to the collaborator.
///
/// Two requests are equal exactly when they describe the same position, so a
/// reply can be matched against the live game to detect staleness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintRequest {
    /// Seed counts, row 0 first.
    pub board: Board,
    /// The player asking.
    pub current_player: Player,
    /// The rule variant.
    pub variant: Variant,
    /// Both stores.
    pub stores: [u32; 2],
}

impl From<&GameState> for HintRequest {
    fn from(state: &GameState) -> Self {
        Self {
            board: state.board().clone(),
            current_player: state.current_player(),
            variant: state.variant(),
            stores: state.stores(),
        }
    }
}

/// A suggestion from the collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintResponse {
    /// Hole on the asking player's home row.
    pub suggested_hole: usize,
    /// Collaborator's confidence, nominally in `0.0..=1.0`.
    pub confidence: f64,
    /// Free-form explanation.
    pub reasoning: String,
}

impl HintResponse {
    /// The suggested pit on `player`'s home row, or `None` if the hole is
    /// off the board.
    pub fn suggested_pit(&self, variant: Variant, player: Player) -> Option<Pit> {
        (self.suggested_hole < HOLES).then(|| Pit::new(variant.home_row(player), self.suggested_hole))
    }
}

/// Either body the collaborator may send back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HintReply {
    /// A suggestion.
    Suggestion(HintResponse),
    /// The collaborator could not suggest a move.
    Failure {
        /// Reason given by the collaborator.
        error: String,
    },
}

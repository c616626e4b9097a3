//! Core domain types: variants, players, the board and the game state.

use super::error::{InvalidPlayer, StateError};
use super::invariants::{GebetaInvariants, InvariantSet};
use super::phases::{Outcome, Phase, RaceState};
use super::pit::{HOLES, Pit};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use tracing::{debug, instrument};

/// Rule variant, fixed when the game starts.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Variant {
    /// Classic Gebeta: two rows of six, four seeds per hole.
    #[default]
    #[serde(rename = "12-hole")]
    #[strum(serialize = "12-hole")]
    TwelveHole,
    /// Gabata: three rows of six, three seeds per hole, race phase and relay sowing.
    #[serde(rename = "18-hole")]
    #[strum(serialize = "18-hole")]
    EighteenHole,
}

impl Variant {
    /// Number of board rows.
    pub const fn rows(self) -> usize {
        match self {
            Variant::TwelveHole => 2,
            Variant::EighteenHole => 3,
        }
    }

    /// Seeds placed in every pit at the start.
    pub const fn seeds_per_hole(self) -> u32 {
        match self {
            Variant::TwelveHole => 4,
            Variant::EighteenHole => 3,
        }
    }

    /// Seeds in play for the whole game (48 or 54).
    pub const fn total_seeds(self) -> u32 {
        self.rows() as u32 * HOLES as u32 * self.seeds_per_hole()
    }

    /// Whether games of this variant open with a race.
    pub const fn has_race(self) -> bool {
        matches!(self, Variant::EighteenHole)
    }

    /// The row a player sows from.
    pub const fn home_row(self, player: Player) -> usize {
        match player {
            Player::First => 0,
            Player::Second => self.rows() - 1,
        }
    }

    /// The player whose home row is `row`, if any. The middle row has no owner.
    pub const fn row_owner(self, row: usize) -> Option<Player> {
        if row == 0 {
            Some(Player::First)
        } else if row == self.rows() - 1 {
            Some(Player::Second)
        } else {
            None
        }
    }
}

/// One of the two players.
///
/// Serialized as its index (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    /// Player 0, owner of row 0.
    First,
    /// Player 1, owner of the last row.
    Second,
}

impl Player {
    /// Both players in index order.
    pub const BOTH: [Player; 2] = [Player::First, Player::Second];

    /// Returns the opponent player.
    pub const fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Index into per-player arrays.
    pub const fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.index() as u8
    }
}

impl TryFrom<u8> for Player {
    type Error = InvalidPlayer;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Player::First),
            1 => Ok(Player::Second),
            index => Err(InvalidPlayer { index }),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// The pits, `rows × 6` seed counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    rows: Vec<[u32; HOLES]>,
}

impl Board {
    /// A board filled for the start of a game.
    pub fn new(variant: Variant) -> Self {
        Self {
            rows: vec![[variant.seeds_per_hole(); HOLES]; variant.rows()],
        }
    }

    /// A board of the variant's shape with no seeds.
    pub fn empty(variant: Variant) -> Self {
        Self {
            rows: vec![[0; HOLES]; variant.rows()],
        }
    }

    /// Wraps explicit rows. The shape is checked against a variant by
    /// [`GameState::from_parts`].
    pub fn from_rows(rows: Vec<[u32; HOLES]>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All rows, row 0 first.
    pub fn rows(&self) -> &[[u32; HOLES]] {
        &self.rows
    }

    /// Seeds in `pit`, or `None` off the board.
    pub fn get(&self, pit: Pit) -> Option<u32> {
        self.rows.get(pit.row).and_then(|row| row.get(pit.hole)).copied()
    }

    /// Whether `pit` lies on this board.
    pub fn contains(&self, pit: Pit) -> bool {
        self.get(pit).is_some()
    }

    /// Whether every pit in `row` is empty. Rows off the board count as empty.
    pub fn row_is_empty(&self, row: usize) -> bool {
        self.rows.get(row).is_none_or(|pits| pits.iter().all(|&seeds| seeds == 0))
    }

    /// Seeds in `row`, saturating at `u32::MAX`.
    pub fn row_sum(&self, row: usize) -> u32 {
        self.rows
            .get(row)
            .map_or(0, |pits| pits.iter().fold(0u32, |sum, &seeds| sum.saturating_add(seeds)))
    }

    /// Seeds on the whole board. Widened so no count of `u32` pits can
    /// overflow it.
    pub fn total(&self) -> u64 {
        self.rows.iter().flatten().map(|&seeds| u64::from(seeds)).sum()
    }

    /// Every pit coordinate, row by row.
    pub fn pits(&self) -> impl Iterator<Item = Pit> + '_ {
        (0..self.rows.len()).flat_map(|row| (0..HOLES).map(move |hole| Pit::new(row, hole)))
    }

    /// Empties `pit`, returning the seeds it held.
    pub(crate) fn take(&mut self, pit: Pit) -> u32 {
        std::mem::take(&mut self[pit])
    }

    /// Empties every pit.
    pub(crate) fn clear(&mut self) {
        for row in &mut self.rows {
            *row = [0; HOLES];
        }
    }

    /// Formats the board as a human-readable grid, last row on top.
    pub fn display(&self) -> String {
        let mut result = String::from("     ");
        for hole in 0..HOLES {
            result.push_str(&format!("{:>4}", hole));
        }
        for (row, pits) in self.rows.iter().enumerate().rev() {
            result.push_str(&format!("\nrow {} [", row));
            for seeds in pits {
                result.push_str(&format!("{:>4}", seeds));
            }
            result.push_str(" ]");
        }
        result
    }
}

impl Index<Pit> for Board {
    type Output = u32;

    fn index(&self, pit: Pit) -> &u32 {
        &self.rows[pit.row][pit.hole]
    }
}

impl IndexMut<Pit> for Board {
    fn index_mut(&mut self, pit: Pit) -> &mut u32 {
        &mut self.rows[pit.row][pit.hole]
    }
}

/// Complete snapshot of a game.
///
/// Every accepted move produces a new value; a state handed out by the
/// engine is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    variant: Variant,
    board: Board,
    stores: [u32; 2],
    phase: Phase,
    current_player: Player,
    game_over: bool,
    winner: Option<Player>,
    relay_sowing: bool,
    relay_origin: Option<Pit>,
    #[serde(default)]
    relay_chain: u32,
}

impl GameState {
    /// The blank state shown before a variant is chosen.
    pub fn setup() -> Self {
        let variant = Variant::default();
        Self {
            variant,
            board: Board::empty(variant),
            stores: [0, 0],
            phase: Phase::Setup,
            current_player: Player::First,
            game_over: false,
            winner: None,
            relay_sowing: false,
            relay_origin: None,
            relay_chain: 0,
        }
    }

    /// A freshly seeded game of `variant`.
    pub(crate) fn start(variant: Variant) -> Self {
        let phase = if variant.has_race() {
            Phase::Race(RaceState::new())
        } else {
            Phase::Playing
        };
        Self {
            variant,
            board: Board::new(variant),
            phase,
            ..Self::setup()
        }
    }

    /// Builds a state mid-game, for resuming play or setting up positions.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the board shape, seed total or phase do not
    /// fit the variant.
    #[instrument(skip(rows))]
    pub fn from_parts(
        variant: Variant,
        rows: Vec<[u32; HOLES]>,
        stores: [u32; 2],
        phase: Phase,
        current_player: Player,
    ) -> Result<Self, StateError> {
        let state = Self {
            variant,
            board: Board::from_rows(rows),
            stores,
            phase,
            current_player,
            ..Self::setup()
        };
        state.check_consistency()?;
        Ok(state)
    }

    /// Deserializes a state from JSON and checks it.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] for malformed JSON or an inconsistent state.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let state: Self = serde_json::from_str(json)?;
        state.check_consistency()?;
        debug!(variant = %state.variant, "Loaded game state");
        Ok(state)
    }

    /// Checks the structural invariants of this state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] listing every violated invariant.
    pub fn check_consistency(&self) -> Result<(), StateError> {
        GebetaInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            StateError::new(format!("Inconsistent game state: {}", descriptions))
        })
    }

    /// Returns the rule variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns both stores, indexed by player.
    pub fn stores(&self) -> [u32; 2] {
        self.stores
    }

    /// Returns one player's store.
    pub fn store(&self, player: Player) -> u32 {
        self.stores[player.index()]
    }

    /// Returns the phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the race progress while racing.
    pub fn race(&self) -> Option<&RaceState> {
        self.phase.race()
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// The winner of a finished game; `None` for a tie or an unfinished game.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// The outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        self.game_over.then(|| match self.winner {
            Some(player) => Outcome::Winner(player),
            None => Outcome::Tie,
        })
    }

    /// Whether the mover must sow again before the turn passes.
    pub fn relay_sowing(&self) -> bool {
        self.relay_sowing
    }

    /// The pit a pending relay must be sown from.
    pub fn relay_origin(&self) -> Option<Pit> {
        self.relay_origin
    }

    /// Relay sows already taken in the current turn.
    pub fn relay_chain(&self) -> u32 {
        self.relay_chain
    }

    /// Seeds on the board plus both stores.
    pub fn total_seeds(&self) -> u64 {
        self.board.total() + self.stores.iter().map(|&seeds| u64::from(seeds)).sum::<u64>()
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn set_position(&mut self, board: Board, stores: [u32; 2]) {
        self.board = board;
        self.stores = stores;
    }

    pub(crate) fn phase_mut(&mut self) -> &mut Phase {
        &mut self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    /// Sets a pending relay, extending the chain by one, or clears it and
    /// ends the chain.
    pub(crate) fn set_relay(&mut self, origin: Option<Pit>) {
        self.relay_sowing = origin.is_some();
        self.relay_origin = origin;
        self.relay_chain = match origin {
            Some(_) => self.relay_chain.saturating_add(1),
            None => 0,
        };
    }

    pub(crate) fn finish(&mut self, winner: Option<Player>) {
        self.game_over = true;
        self.winner = winner;
        self.set_relay(None);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::setup()
    }
}

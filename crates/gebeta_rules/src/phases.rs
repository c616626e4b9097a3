//! Game phases, the race sub-state and final outcomes.

use super::Player;
use serde::{Deserialize, Serialize};

/// Phase of a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No game in progress; a variant has to be chosen.
    Setup,
    /// Eighteen-hole preliminary race deciding who moves first.
    Race(RaceState),
    /// Normal turn-taking.
    Playing,
}

impl Phase {
    /// Returns the race state while racing.
    pub fn race(&self) -> Option<&RaceState> {
        match self {
            Phase::Race(race) => Some(race),
            Phase::Setup | Phase::Playing => None,
        }
    }

    /// True once a variant has been chosen.
    pub fn is_started(&self) -> bool {
        !matches!(self, Phase::Setup)
    }
}

/// Result of one player's simulated race sow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceRun {
    /// Sowing steps taken from the leftmost pit.
    pub steps: u32,
    /// Whether the last seed landed in a pit that was empty.
    pub landed_empty: bool,
}

/// Progress of the race phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaceState {
    runs: [Option<RaceRun>; 2],
    winner: Option<Player>,
}

impl RaceState {
    /// A race nobody has run yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The run recorded for `player`, if they have raced.
    pub fn run(&self, player: Player) -> Option<RaceRun> {
        self.runs[player.index()]
    }

    /// Whether `player` has already taken their race move.
    pub fn has_raced(&self, player: Player) -> bool {
        self.runs[player.index()].is_some()
    }

    /// The race winner, once both players have raced.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Records a run and resolves the race when both runs are in.
    pub(crate) fn record(&mut self, player: Player, run: RaceRun) -> Option<Player> {
        self.runs[player.index()] = Some(run);
        if let [Some(first), Some(second)] = self.runs {
            self.winner = Some(crate::rules::race::decide(first, second));
        }
        self.winner
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player finished with strictly more seeds.
    Winner(Player),
    /// Both stores hold the same count.
    Tie,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Tie => None,
        }
    }

    /// Returns true if the game was a tie.
    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} wins", player),
            Outcome::Tie => write!(f, "It's a tie"),
        }
    }
}

//! Live game session: the single owner of the current state.
//!
//! Moves are applied synchronously through `&mut self`. Hint requests run as
//! background tasks and report back over a oneshot channel, tagged with the
//! position they were asked for. A reply is only surfaced while the live
//! position still matches; anything else is stale and dropped.

use crate::hint_client::{HintError, HintProvider};
use derive_new::new;
use gebeta_rules::{
    GameState, HintRequest, HintResponse, MoveError, Notice, Phase, Pit, Variant, apply_move, reset_game,
    reset_notice, start_game,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

type HintOutcome = (HintRequest, Result<HintResponse, HintError>);

/// A suggestion that still applies to the live position.
#[derive(Debug, Clone, PartialEq, new)]
pub struct Suggestion {
    /// The pit to highlight.
    pub pit: Pit,
    /// The collaborator's confidence.
    pub confidence: f64,
    /// The collaborator's explanation.
    pub reasoning: String,
}

/// Where the latest hint request stands.
#[derive(Debug, Clone)]
pub enum HintStatus {
    /// No request has been made since the last result.
    Idle,
    /// A request is in flight.
    Pending,
    /// A suggestion for the live position.
    Ready(Suggestion),
    /// The reply was for a position the game has moved past.
    Stale,
    /// The request failed; the game is unaffected.
    Failed(HintError),
}

struct PendingHint {
    receiver: oneshot::Receiver<HintOutcome>,
    task: JoinHandle<()>,
}

/// A game in progress plus its hint plumbing.
pub struct GameSession {
    state: GameState,
    provider: Option<Arc<dyn HintProvider>>,
    timeout: Duration,
    pending: Option<PendingHint>,
}

impl GameSession {
    /// Creates a session at the setup screen. Without a provider, hints are
    /// unavailable.
    #[instrument(skip(provider), fields(hints = provider.is_some()))]
    pub fn new(provider: Option<Arc<dyn HintProvider>>, timeout: Duration) -> Self {
        info!("Creating game session");
        Self {
            state: reset_game(),
            provider,
            timeout,
            pending: None,
        }
    }

    /// The live state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Starts a new game of `variant`, dropping any pending hint.
    #[instrument(skip(self))]
    pub fn start(&mut self, variant: Variant) -> &GameState {
        self.cancel_hint();
        self.state = start_game(variant);
        &self.state
    }

    /// Returns to the setup screen. The notice describes what was discarded.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Notice {
        let notice = reset_notice(&self.state);
        self.cancel_hint();
        self.state = reset_game();
        notice
    }

    /// Applies a move for the current player.
    ///
    /// # Errors
    ///
    /// Returns the rule violation; the live state is unchanged.
    #[instrument(skip(self))]
    pub fn play(&mut self, row: usize, hole: usize) -> Result<&GameState, MoveError> {
        self.state = apply_move(&self.state, row, hole)?;
        Ok(&self.state)
    }

    /// Starts a background hint request for the live position, replacing
    /// any request already in flight.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`HintError`] when hints are disabled, there is no position
    /// to suggest for, or a relay leaves only one legal pit.
    #[instrument(skip(self))]
    pub fn request_hint(&mut self) -> Result<(), HintError> {
        let provider = self
            .provider
            .clone()
            .ok_or_else(|| HintError::new("Hints are disabled".to_string()))?;
        if self.state.phase() != &Phase::Playing || self.state.is_over() {
            return Err(HintError::new("Hints are only available during play".to_string()));
        }
        if let Some(origin) = self.state.relay_origin() {
            return Err(HintError::new(format!("Relay sowing must continue from {}", origin)));
        }

        self.cancel_hint();
        let request = HintRequest::from(&self.state);
        let (sender, receiver) = oneshot::channel();
        let timeout = self.timeout;

        let task = tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, provider.suggest(&request)).await {
                Ok(result) => result,
                Err(_) => Err(HintError::new(format!(
                    "Hint request timed out after {} ms",
                    timeout.as_millis()
                ))),
            };
            if sender.send((request, result)).is_err() {
                debug!("Hint receiver dropped before delivery");
            }
        });

        debug!("Hint request spawned");
        self.pending = Some(PendingHint { receiver, task });
        Ok(())
    }

    /// Checks the pending hint without waiting.
    pub fn poll_hint(&mut self) -> HintStatus {
        let Some(pending) = self.pending.as_mut() else {
            return HintStatus::Idle;
        };

        match pending.receiver.try_recv() {
            Err(oneshot::error::TryRecvError::Empty) => HintStatus::Pending,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending = None;
                HintStatus::Failed(HintError::new("Hint task ended without a result".to_string()))
            }
            Ok(outcome) => {
                self.pending = None;
                self.resolve(outcome)
            }
        }
    }

    /// Waits for the pending hint to finish.
    pub async fn wait_hint(&mut self) -> HintStatus {
        let Some(pending) = self.pending.take() else {
            return HintStatus::Idle;
        };

        match pending.receiver.await {
            Ok(outcome) => self.resolve(outcome),
            Err(_) => HintStatus::Failed(HintError::new("Hint task ended without a result".to_string())),
        }
    }

    fn resolve(&self, (request, result): HintOutcome) -> HintStatus {
        if request != HintRequest::from(&self.state) {
            warn!("Discarding hint for an outdated position");
            return HintStatus::Stale;
        }

        match result {
            Ok(response) => {
                let variant = self.state.variant();
                let player = self.state.current_player();
                match response.suggested_pit(variant, player) {
                    Some(pit) => HintStatus::Ready(Suggestion::new(pit, response.confidence, response.reasoning)),
                    None => {
                        warn!(hole = response.suggested_hole, "Suggested hole is off the board");
                        HintStatus::Failed(HintError::new(format!(
                            "Suggested hole {} is not on the board",
                            response.suggested_hole
                        )))
                    }
                }
            }
            Err(err) => {
                warn!(error = %err.message, "Hint unavailable");
                HintStatus::Failed(err)
            }
        }
    }

    fn cancel_hint(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("Aborting pending hint request");
            pending.task.abort();
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.cancel_hint();
    }
}

//! Game engine: starting, resetting and applying moves.
//!
//! Every entry point takes a state by reference and returns a new one. A
//! rejected move leaves the caller's state exactly as it was.

use super::action::{MoveError, Notice, Severity};
use super::contracts::{Contract, MoveContract, assert_invariants};
use super::rules::{
    self, Capture, NoCapture, SowOutcome, capture_check, decide_winner, is_finished, race_start,
    relay_origin, resolve_capture, simulate_run, sweep, within_chain_limit,
};
use super::{GameState, Phase, Pit, Player, Variant};
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Lifecycle
// ─────────────────────────────────────────────────────────────

/// Starts a fresh game of `variant`.
///
/// Twelve-hole games go straight to play; eighteen-hole games open with the
/// race. Player 0 is nominally to move either way.
#[instrument]
pub fn start_game(variant: Variant) -> GameState {
    let state = GameState::start(variant);
    info!(%variant, seeds = variant.total_seeds(), "Game started");
    state
}

/// Returns to the setup screen, discarding the current game.
#[instrument]
pub fn reset_game() -> GameState {
    debug!("Game reset");
    GameState::setup()
}

/// The notice to show before resetting `state`.
pub fn reset_notice(state: &GameState) -> Notice {
    if !state.phase().is_started() {
        Notice {
            severity: Severity::Info,
            message: "Game already at setup screen",
        }
    } else if state.is_over() {
        Notice {
            severity: Severity::Info,
            message: "Resetting completed game",
        }
    } else {
        Notice {
            severity: Severity::Advisory,
            message: "Resetting current game",
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Moves
// ─────────────────────────────────────────────────────────────

/// Applies the current player's move from `(row, hole)`.
///
/// During the race this records a simulated race sow for the owner of the
/// row. During play it sows, captures, checks for relay and checks for the
/// end of the game.
///
/// # Errors
///
/// Returns [`MoveError`] if the move breaks a rule; the input state is
/// untouched.
#[instrument(skip(state), fields(variant = %state.variant(), player = %state.current_player()))]
pub fn apply_move(state: &GameState, row: usize, hole: usize) -> Result<GameState, MoveError> {
    let pit = Pit::new(row, hole);
    if let Err(err) = MoveContract::pre(state, &pit) {
        warn!(%pit, error = %err, severity = %err.severity(), "Move rejected");
        return Err(err);
    }

    let next = match state.phase() {
        Phase::Race(_) => race_move(state, pit),
        Phase::Setup | Phase::Playing => sowing_move(state, pit),
    };

    assert_invariants(state, &next);
    Ok(next)
}

fn race_move(state: &GameState, pit: Pit) -> GameState {
    let variant = state.variant();
    // Validation guarantees a home row here.
    let racer = variant.row_owner(pit.row).unwrap_or(Player::First);
    let run = simulate_run(state.board(), race_start(variant, racer));

    let mut next = state.clone();
    let resolved = match next.phase_mut() {
        Phase::Race(race) => race.record(racer, run),
        Phase::Setup | Phase::Playing => None,
    };

    if let Some(winner) = resolved {
        info!(%winner, "Race decided");
        next.set_phase(Phase::Playing);
        next.set_current_player(winner);
    } else {
        debug!(%racer, steps = run.steps, landed_empty = run.landed_empty, "Race run recorded");
    }
    next
}

fn sowing_move(state: &GameState, pit: Pit) -> GameState {
    let variant = state.variant();
    let mover = state.current_player();

    let SowOutcome {
        mut board,
        mut stores,
        terminal,
    } = rules::sow(state.board(), state.stores(), variant, mover, pit);

    let capture = terminal
        .pit()
        .and_then(|end| resolve_capture(&mut board, &mut stores, variant, mover, end));
    let relay = relay_origin(variant, &board, terminal, capture.is_some());
    let chain = state.relay_chain();
    let limited = within_chain_limit(relay, chain);
    if let (Some(origin), None) = (relay, limited) {
        warn!(%origin, chain, "Relay chain limit reached, turn passes");
    }
    let relay = limited;

    let finished = is_finished(variant, &board);
    if finished {
        sweep(variant, &mut board, &mut stores);
    }

    let mut next = state.clone();
    next.set_position(board, stores);

    if finished {
        let winner = decide_winner(stores);
        info!(?winner, store_0 = stores[0], store_1 = stores[1], "Game over");
        next.finish(winner);
    } else {
        next.set_relay(relay);
        match relay {
            Some(origin) => debug!(%origin, "Relay sowing continues"),
            None => next.set_current_player(mover.opponent()),
        }
    }
    next
}

// ─────────────────────────────────────────────────────────────
//  Queries
// ─────────────────────────────────────────────────────────────

/// Every pit the current player may legally sow from.
pub fn legal_moves(state: &GameState) -> Vec<Pit> {
    state
        .board()
        .pits()
        .filter(|pit| MoveContract::pre(state, pit).is_ok())
        .collect()
}

/// Reports whether a last seed landing in `(row, hole)` would capture for
/// the current player, on the board as it stands.
pub fn capture_report(state: &GameState, row: usize, hole: usize) -> Result<Capture, NoCapture> {
    capture_check(
        state.board(),
        state.variant(),
        state.current_player(),
        Pit::new(row, hole),
    )
}

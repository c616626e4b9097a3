//! Game rules for Gebeta and Gabata.
//!
//! This module contains pure functions over boards and stores. The engine
//! composes them into whole moves; keeping them separate lets each rule be
//! tested and reported on by itself.

pub mod capture;
pub mod game_over;
pub mod race;
pub mod relay;
pub mod sowing;

pub use capture::{Capture, NoCapture, capture_check, opposite_pit, resolve_capture};
pub use game_over::{decide_winner, is_finished, sweep, sweep_recipient};
pub use race::{RACE_MAX_STEPS, decide, race_start, simulate_run};
pub use relay::{RELAY_MAX_CHAIN, relay_origin, within_chain_limit};
pub use sowing::{SowOutcome, Terminal, sow};

//! Gebeta - terminal play for the Gebeta and Gabata sowing games
//!
//! The rules live in the `gebeta_rules` crate. This crate adds everything
//! around them.
//!
//! # Architecture
//!
//! - **Config**: TOML file plus environment overrides
//! - **Hint client**: async HTTP client for the advisory move-suggestion service
//! - **Session**: the single owner of a live game, with background hint requests
//! - **Play**: the hot-seat loop over stdin and stdout
//!
//! # Example
//!
//! ```no_run
//! use gebeta::{AppConfig, GameSession, HintClient, HintProvider};
//! use gebeta_rules::Variant;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load("gebeta.toml")?;
//! let provider: Arc<dyn HintProvider> = Arc::new(HintClient::from_config(&config));
//! let mut session = GameSession::new(Some(provider), config.hint_timeout());
//! session.start(Variant::TwelveHole);
//! session.play(0, 0)?;
//! session.request_hint()?;
//! let status = session.wait_hint().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod hint_client;
pub mod play;
mod session;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_PATH, HINT_URL_ENV};

// Crate-level exports - Hint client
pub use hint_client::{HintClient, HintError, HintProvider};

// Crate-level exports - Session management
pub use session::{GameSession, HintStatus, Suggestion};

//! Gebeta - Unified CLI
//!
//! Terminal play, one-shot hints and state checks.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use gebeta::cli::{Cli, Command};
use gebeta::{AppConfig, GameSession, HintClient, HintProvider};
use gebeta_rules::{GameState, HintRequest, legal_moves};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { variant, config } => run_play(variant, &config).await,
        Command::Hint { state, config } => run_hint(&state, &config).await,
        Command::Check { state } => run_check(&state),
    }
}

/// Run the hot-seat play loop
#[instrument(skip(config_path), fields(config_path = %config_path.display()))]
async fn run_play(variant: Option<gebeta_rules::Variant>, config_path: &Path) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let provider: Option<Arc<dyn HintProvider>> = if *config.hints_enabled() {
        Some(Arc::new(HintClient::from_config(&config)))
    } else {
        info!("Hints disabled by configuration");
        None
    };

    let session = GameSession::new(provider, config.hint_timeout());
    let variant = variant.unwrap_or(*config.default_variant());
    info!(%variant, "Starting play loop");
    gebeta::play::run(session, Some(variant)).await
}

/// Ask the hint service once about a saved state
#[instrument(skip(state_path, config_path))]
async fn run_hint(state_path: &Path, config_path: &Path) -> Result<()> {
    let state = load_state(state_path)?;
    let config = AppConfig::load(config_path)?;
    let client = HintClient::from_config(&config);

    let response = client.suggest(&HintRequest::from(&state)).await?;
    match response.suggested_pit(state.variant(), state.current_player()) {
        Some(pit) => println!(
            "{} should sow from {} (confidence {:.2}): {}",
            state.current_player(),
            pit,
            response.confidence,
            response.reasoning
        ),
        None => anyhow::bail!("Hint service suggested hole {}, which is not on the board", response.suggested_hole),
    }
    Ok(())
}

/// Validate a saved state and list its legal moves
#[instrument(skip(state_path))]
fn run_check(state_path: &Path) -> Result<()> {
    let state = load_state(state_path)?;
    println!("{}", state.board().display());
    println!("{}", gebeta::play::status_line(&state));

    let moves = legal_moves(&state);
    if moves.is_empty() {
        println!("No legal moves");
    } else {
        let moves = moves.iter().map(|pit| pit.to_string()).collect::<Vec<_>>();
        println!("Legal moves: {}", moves.join(" "));
    }
    Ok(())
}

fn load_state(path: &Path) -> Result<GameState> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(GameState::from_json(&json)?)
}

//! Command-line interface for gebeta.

use clap::{Parser, Subcommand};
use gebeta_rules::Variant;
use std::path::PathBuf;

/// Gebeta - Ethiopian sowing games in the terminal
#[derive(Parser, Debug)]
#[command(name = "gebeta")]
#[command(about = "Play Gebeta (12-hole) and Gabata (18-hole) with optional move hints", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hot-seat game on this terminal
    Play {
        /// Variant to start with (12-hole or 18-hole). Defaults to the configured variant.
        #[arg(short, long)]
        variant: Option<Variant>,

        /// Path to the configuration file
        #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Ask the hint service about a saved game state
    Hint {
        /// Game state as JSON
        state: PathBuf,

        /// Path to the configuration file
        #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Check a saved game state and list its legal moves
    Check {
        /// Game state as JSON
        state: PathBuf,
    },
}

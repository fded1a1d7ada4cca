//! Command-line interface for bitways.

use clap::{Parser, Subcommand};

/// Bitways - rule engine for the bitwise-operator board game
#[derive(Parser, Debug)]
#[command(name = "bitways")]
#[command(about = "Rule engine for the bitwise-operator board game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the legal and editing moves of a position
    Legal {
        /// Position, quoted, e.g. "startpos b - 1 moves 4n"
        position: String,

        /// Skip the distinctness pass
        #[arg(long)]
        all: bool,
    },

    /// Apply moves to a position and print the result
    Play {
        /// Position, quoted, e.g. "startpos b - 1"
        position: String,

        /// Move codes to apply in order
        moves: Vec<String>,

        /// Number of moves to undo afterwards
        #[arg(long, default_value = "0")]
        undo: usize,
    },

    /// Play one game between two random strategies
    Selfplay {
        /// Path to engine configuration (defaults to ./bitways.toml, then built-in defaults)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Override the configured seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

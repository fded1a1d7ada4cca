//! Bitways - unified CLI
//!
//! Inspects positions, applies moves and runs self-play games.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use bitways::{Board, EngineConfig, RandomMove, play_game};
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Legal { position, all } => run_legal(&position, all),
        Command::Play {
            position,
            moves,
            undo,
        } => run_play(&position, &moves, undo),
        Command::Selfplay { config, seed } => run_selfplay(config, seed),
    }
}

/// Decodes a position argument; a bare `startpos` stands for the start.
fn parse_board(position: &str) -> Result<Board> {
    if position.trim() == "startpos" {
        return Ok(Board::new());
    }
    position
        .trim()
        .parse()
        .with_context(|| format!("Invalid position {position:?}"))
}

/// List legal and editing moves
#[instrument]
fn run_legal(position: &str, all: bool) -> Result<()> {
    let mut board = parse_board(position)?;

    let playable = if all {
        board.playable_moves()
    } else {
        board.legal_moves()
    };
    println!("playable ({}):", playable.len());
    for mv in &playable {
        match mv.duplicate_of() {
            Some(original) => println!("  {mv} = {original}"),
            None => println!("  {mv}"),
        }
    }

    let edits = board.edit_moves();
    println!("edit ({}):", edits.len());
    for mv in &edits {
        println!("  {mv}");
    }
    Ok(())
}

/// Apply moves, optionally undo some, and print the result
#[instrument(skip(moves), fields(count = moves.len()))]
fn run_play(position: &str, moves: &[String], undo: usize) -> Result<()> {
    let mut board = parse_board(position)?;

    for code in moves {
        board
            .push_code(code)
            .with_context(|| format!("Move {code} rejected"))?;
    }
    for _ in 0..undo {
        let mv = board.undo().context("Undo failed")?;
        info!(code = %mv, "Undid move");
    }

    println!("{board}");
    print!("{}", board.diagram());
    println!("{}", board.status());
    Ok(())
}

/// Run one self-play game
#[instrument]
fn run_selfplay(config: Option<std::path::PathBuf>, seed: Option<u64>) -> Result<()> {
    let mut config = match config {
        Some(path) => EngineConfig::from_file(&path)?,
        None => EngineConfig::discover(".")?,
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut black = RandomMove::from_config("random-black", &config, 0);
    let mut white = RandomMove::from_config("random-white", &config, 1);
    let record = play_game(&config, &mut black, &mut white)?;

    println!("{record}");
    Ok(())
}

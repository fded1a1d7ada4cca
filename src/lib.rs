//! Bitways application library.
//!
//! Wraps the [`bitways_core`] rule engine with configuration, pluggable
//! move-selection strategies and a self-play driver.
//!
//! # Architecture
//!
//! - **Config**: [`EngineConfig`] loaded from TOML
//! - **Strategy**: [`Strategy`] implementations choosing moves
//! - **Self-play**: [`play_game`] running two strategies against each other
//!
//! # Example
//!
//! ```
//! use bitways::{EngineConfig, FirstMove, RandomMove, play_game};
//!
//! let config = EngineConfig::default().with_max_plies(10);
//! let mut black = FirstMove::new("first");
//! let mut white = RandomMove::from_config("random", &config, 1);
//! let record = play_game(&config, &mut black, &mut white).unwrap();
//! assert!(*record.plies() <= 10);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod selfplay;
mod strategy;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, EngineConfig};

// Crate-level exports - Strategies
pub use strategy::{Choice, FirstMove, RandomMove, Strategy};

// Crate-level exports - Self-play
pub use selfplay::{Ending, GameRecord, SelfPlayError, play_game};

// Crate-level exports - Engine types
pub use bitways_core::{Board, Color, GameStatus, Move, MoveError, ParseError, Snapshot};

//! Self-play driver.

use crate::config::{ConfigError, EngineConfig};
use crate::strategy::{Choice, Strategy};
use bitways_core::{Color, GameStatus, MoveError};
use derive_getters::Getters;
use derive_more::{Display, From};
use std::fmt;
use tracing::{error, info, instrument, warn};

/// Why a self-play game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The board reached a terminal status.
    Terminal,
    /// The side to move resigned.
    Resignation(Color),
    /// The ply cap was reached.
    PlyLimit,
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ending::Terminal => write!(f, "terminal position"),
            Ending::Resignation(color) => write!(f, "{color} resigned"),
            Ending::PlyLimit => write!(f, "ply limit"),
        }
    }
}

/// Outcome of one self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameRecord {
    /// Name of the Black strategy.
    black: String,
    /// Name of the White strategy.
    white: String,
    /// Full notation: start position plus every move played.
    notation: String,
    /// Status of the final position.
    status: GameStatus,
    /// How the game stopped.
    ending: Ending,
    /// Number of moves played.
    plies: u32,
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "black:  {}", self.black)?;
        writeln!(f, "white:  {}", self.white)?;
        writeln!(f, "plies:  {}", self.plies)?;
        writeln!(f, "ending: {}", self.ending)?;
        writeln!(f, "status: {}", self.status)?;
        write!(f, "game:   {}", self.notation)
    }
}

/// Self-play failure.
#[derive(Debug, Display, From)]
pub enum SelfPlayError {
    /// The configured start position is unusable.
    #[display("{}", _0)]
    Config(ConfigError),

    /// A strategy chose a move the board rejected.
    #[display("Strategy {} chose an illegal move: {}", strategy, source)]
    #[from(ignore)]
    IllegalChoice {
        /// Name of the offending strategy.
        strategy: String,
        /// Rejection reason.
        source: MoveError,
    },
}

impl std::error::Error for SelfPlayError {}

/// Plays one game between two strategies from the configured start.
///
/// # Errors
///
/// Returns [`SelfPlayError`] if the start position is invalid or a strategy
/// picks an illegal move.
#[instrument(skip_all, fields(black = black.name(), white = white.name()))]
pub fn play_game(
    config: &EngineConfig,
    black: &mut dyn Strategy,
    white: &mut dyn Strategy,
) -> Result<GameRecord, SelfPlayError> {
    let mut board = config.start_board()?;
    let mut plies = 0;

    let ending = loop {
        if board.status().is_terminal() {
            break Ending::Terminal;
        }
        if plies >= *config.max_plies() {
            break Ending::PlyLimit;
        }

        let mover = board.turn();
        let strategy: &mut dyn Strategy = match mover {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };

        match strategy.choose(&mut board) {
            Choice::Play(mv) => {
                board.push(mv).map_err(|source| SelfPlayError::IllegalChoice {
                    strategy: strategy.name().to_string(),
                    source,
                })?;
                plies += 1;
            }
            Choice::Resign => {
                warn!(%mover, strategy = strategy.name(), "Strategy resigned");
                break Ending::Resignation(mover);
            }
        }
    };

    if let Err(violations) = board.check_invariants() {
        error!(?violations, "Board invariants violated after self-play");
    }

    let record = GameRecord {
        black: black.name().to_string(),
        white: white.name().to_string(),
        notation: board.to_string(),
        status: board.status(),
        ending,
        plies,
    };
    info!(plies, status = %record.status, ending = %record.ending, "Game finished");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::FirstMove;

    #[test]
    fn test_ply_limit_stops_game() {
        let config = EngineConfig::default().with_max_plies(6);
        let record = play_game(&config, &mut FirstMove::new("a"), &mut FirstMove::new("b")).unwrap();
        assert!(*record.plies() <= 6);
        if *record.ending() == Ending::PlyLimit {
            assert_eq!(*record.plies(), 6);
        }
        let replayed: Board = record.notation().parse().unwrap();
        assert_eq!(replayed.history().len(), *record.plies() as usize);
    }

    #[test]
    fn test_empty_start_is_stalemate() {
        let config = EngineConfig::default().with_start("7/7/7/7/7/7 b - 1");
        let record = play_game(&config, &mut FirstMove::new("a"), &mut FirstMove::new("b")).unwrap();
        // No playable move is a stalemate, which is terminal before anyone moves.
        assert_eq!(*record.ending(), Ending::Terminal);
        assert_eq!(*record.status(), GameStatus::Stalemate);
        assert_eq!(*record.plies(), 0);
    }

    #[test]
    fn test_bad_start_is_config_error() {
        let config = EngineConfig::default().with_start("startpos q - 1");
        let err = play_game(&config, &mut FirstMove::new("a"), &mut FirstMove::new("b")).unwrap_err();
        assert!(matches!(err, SelfPlayError::Config(_)));
    }
}

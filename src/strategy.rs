//! Move-selection policies.
//!
//! A strategy looks at a board and either names a playable move or
//! resigns. Strategies may simulate moves on the board but must leave it
//! as they found it.

use crate::config::EngineConfig;
use bitways_core::{Board, GameStatus, Move, Simulation};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Decision of a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Play this move.
    Play(Move),
    /// Give up the game.
    Resign,
}

/// A move-selection policy.
pub trait Strategy {
    /// Name used in logs and game records.
    fn name(&self) -> &str;

    /// Chooses a move for the side to move.
    fn choose(&mut self, board: &mut Board) -> Choice;
}

/// Plays the first distinct playable move.
#[derive(Debug, Clone)]
pub struct FirstMove {
    name: String,
}

impl FirstMove {
    /// Creates a first-move strategy.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Strategy for FirstMove {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, board), fields(strategy = %self.name))]
    fn choose(&mut self, board: &mut Board) -> Choice {
        match board.distinct_moves().into_iter().next() {
            Some(mv) => {
                debug!(code = %mv, "Strategy chose move");
                Choice::Play(mv)
            }
            None => Choice::Resign,
        }
    }
}

/// Plays a uniformly random playable move from a seeded generator.
///
/// With `prefer_mates` set, a move that wins on the spot is played first.
#[derive(Debug, Clone)]
pub struct RandomMove {
    name: String,
    rng: StdRng,
    prefer_mates: bool,
    distinct: bool,
}

impl RandomMove {
    /// Creates a random strategy.
    pub fn new(name: impl Into<String>, seed: u64, prefer_mates: bool, distinct: bool) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
            prefer_mates,
            distinct,
        }
    }

    /// Creates a random strategy from configuration, offsetting the seed so
    /// that two players sharing a config do not mirror each other.
    pub fn from_config(name: impl Into<String>, config: &EngineConfig, offset: u64) -> Self {
        Self::new(
            name,
            config.seed().wrapping_add(offset),
            *config.prefer_mates(),
            *config.distinct(),
        )
    }

    /// First move that wins immediately for the side to move.
    #[instrument(skip_all, fields(candidates = moves.len()))]
    fn find_mate(board: &mut Board, moves: &[Move]) -> Option<Move> {
        let mover = board.turn();
        moves
            .iter()
            .find(|mv| {
                Simulation::start(board, (*mv).clone()).is_ok_and(|simulation| {
                    simulation.board().status() == GameStatus::Won(mover)
                })
            })
            .cloned()
    }
}

impl Strategy for RandomMove {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, board), fields(strategy = %self.name))]
    fn choose(&mut self, board: &mut Board) -> Choice {
        let moves = if self.distinct {
            board.distinct_moves()
        } else {
            board.playable_moves()
        };

        if self.prefer_mates {
            if let Some(mv) = Self::find_mate(board, &moves) {
                debug!(code = %mv, "Strategy found a winning move");
                return Choice::Play(mv);
            }
        }

        match moves.choose(&mut self.rng) {
            Some(mv) => {
                debug!(code = %mv, "Strategy chose move");
                Choice::Play(mv.clone())
            }
            None => Choice::Resign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_on_startpos() {
        let mut board = Board::new();
        let mut strategy = FirstMove::new("first");
        assert_eq!(strategy.choose(&mut board), Choice::Play(Move::parse("2n").unwrap()));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_resigns_without_moves() {
        let mut board = Board::empty();
        assert_eq!(FirstMove::new("first").choose(&mut board), Choice::Resign);
        assert_eq!(RandomMove::new("random", 1, true, true).choose(&mut board), Choice::Resign);
    }

    #[test]
    fn test_random_is_reproducible() {
        let mut board = Board::new();
        let mut a = RandomMove::new("a", 42, false, true);
        let mut b = RandomMove::new("b", 42, false, true);
        for _ in 0..5 {
            assert_eq!(a.choose(&mut board), b.choose(&mut board));
        }
    }

    #[test]
    fn test_random_prefers_mate() {
        let mut board: Board = "7/3x2x/2x3x/1x4x/x5x/3xx1x b - 10".parse().unwrap();
        let before = board.clone();
        let mut strategy = RandomMove::new("random", 3, true, true);
        let Choice::Play(mv) = strategy.choose(&mut board) else {
            panic!("Expected a move");
        };
        assert_eq!(board, before);
        board.push(mv).unwrap();
        assert_eq!(board.status(), GameStatus::Won(bitways_core::Color::Black));
    }
}

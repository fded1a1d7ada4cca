//! Terminal-state evaluation.

use super::win::WinProgress;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Play continues.
    InProgress,
    /// One colour has recorded all three of its clear targets.
    Won(Color),
    /// The side to move has no playable move and nobody has won.
    Stalemate,
    /// Both colours have recorded all of their clear targets.
    ///
    /// No ruling exists for this case; it is reported as its own terminal
    /// state and left for the caller to score.
    DoubleCompletion,
}

impl GameStatus {
    /// Whether the game is over.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// The winning colour, if any.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Won(color) => Some(color),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won(color) => write!(f, "{color} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::DoubleCompletion => write!(f, "double completion"),
        }
    }
}

/// Derives the status from win progress and whether a playable move exists.
#[instrument]
pub fn evaluate(progress: &WinProgress, has_playable_move: bool) -> GameStatus {
    match (progress.completed(Color::Black), progress.completed(Color::White)) {
        (true, true) => GameStatus::DoubleCompletion,
        (true, false) => GameStatus::Won(Color::Black),
        (false, true) => GameStatus::Won(Color::White),
        (false, false) if !has_playable_move => GameStatus::Stalemate,
        (false, false) => GameStatus::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Square;
    use crate::position::Snapshot;
    use crate::types::Stone;

    fn progress_with(stones: &[(Stone, u8, u8)]) -> WinProgress {
        let mut snapshot = Snapshot::empty();
        for &(stone, file, rank) in stones {
            snapshot.set(Square::new(file, rank).unwrap(), stone);
        }
        let mut progress = WinProgress::new();
        progress.scan(&snapshot, 1);
        progress
    }

    fn black_triple() -> Vec<(Stone, u8, u8)> {
        let b = Stone::Black;
        vec![
            (b, 0, 0), (b, 1, 0), (b, 2, 0),
            (b, 0, 1), (b, 1, 2), (b, 2, 3), (b, 3, 4),
            (b, 6, 0), (b, 6, 1), (b, 6, 2), (b, 6, 3), (b, 6, 4),
        ]
    }

    fn white_triple() -> Vec<(Stone, u8, u8)> {
        let w = Stone::White;
        vec![
            (w, 4, 1), (w, 4, 2), (w, 4, 3),
            (w, 1, 5), (w, 2, 4), (w, 3, 3), (w, 4, 2),
            (w, 0, 5), (w, 1, 5), (w, 2, 5), (w, 3, 5), (w, 4, 5),
        ]
    }

    #[test]
    fn test_in_progress_with_moves() {
        assert_eq!(evaluate(&WinProgress::new(), true), GameStatus::InProgress);
    }

    #[test]
    fn test_stalemate_without_moves() {
        let status = evaluate(&WinProgress::new(), false);
        assert_eq!(status, GameStatus::Stalemate);
        assert!(status.is_terminal());
        assert_eq!(status.winner(), None);
    }

    #[test]
    fn test_black_triple_wins() {
        let progress = progress_with(&black_triple());
        assert_eq!(evaluate(&progress, true), GameStatus::Won(Color::Black));
        assert_eq!(evaluate(&progress, false), GameStatus::Won(Color::Black));
    }

    #[test]
    fn test_white_triple_wins() {
        let progress = progress_with(&white_triple());
        assert_eq!(evaluate(&progress, true).winner(), Some(Color::White));
    }

    #[test]
    fn test_both_triples_is_double_completion() {
        let mut stones = black_triple();
        stones.extend(white_triple());
        let progress = progress_with(&stones);
        assert_eq!(evaluate(&progress, true), GameStatus::DoubleCompletion);
    }
}

//! History replay invariant.

use super::Invariant;
use crate::board::{Board, HistoryEntry};

/// Invariant: replaying the history from the origin reproduces the current
/// position.
pub struct HistoryReplaysInvariant;

impl Invariant<Board> for HistoryReplaysInvariant {
    fn holds(board: &Board) -> bool {
        let moves: Vec<_> = board.history().iter().map(HistoryEntry::mv).cloned().collect();
        Board::replay(board.origin().clone(), &moves)
            .is_ok_and(|replayed| replayed.position() == board.position())
    }

    fn description() -> &'static str {
        "Replaying the history from the origin reproduces the position"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_after_moves() {
        let mut board = Board::new();
        for code in ["bn", "dn", "ca"] {
            board.push_code(code).unwrap();
        }
        assert!(HistoryReplaysInvariant::holds(&board));
    }
}

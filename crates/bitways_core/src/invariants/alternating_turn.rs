//! Turn and move counter follow the history length.

use super::Invariant;
use crate::board::Board;

/// Invariant: every history entry flipped the turn and advanced the move
/// number exactly once.
pub struct AlternatingTurnInvariant;

impl Invariant<Board> for AlternatingTurnInvariant {
    fn holds(board: &Board) -> bool {
        let plies = board.history().len();
        let expected_turn = if plies % 2 == 0 {
            board.origin().turn()
        } else {
            board.origin().turn().opponent()
        };
        let expected_number = u64::from(board.origin().move_number()) + plies as u64;

        board.turn() == expected_turn && u64::from(board.move_number()) == expected_number
    }

    fn description() -> &'static str {
        "Turn and move number advance once per history entry"
    }
}

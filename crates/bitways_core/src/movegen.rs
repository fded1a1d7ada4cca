//! Move generation.
//!
//! Candidates are enumerated per way in lock order and kept when the
//! executor accepts them, so a generated move is always legal to push.

use crate::action::{Move, Operator, ShiftAmount};
use crate::board::Board;
use crate::coord::Way;
use crate::error::MoveError;
use crate::execute;
use crate::position::Snapshot;
use std::collections::HashMap;
use tracing::{error, instrument, warn};

/// Operators tried for every way, in generation order.
fn playable_operators() -> impl Iterator<Item = Operator> {
    ShiftAmount::all()
        .map(Operator::Shift)
        .chain([Operator::Not, Operator::NotLow, Operator::NotHigh])
        .chain(Operator::PLAYABLE_BINARY)
}

/// Operators available only as editing moves. `Edit` is left out since it
/// needs explicit stones.
const EDIT_OPERATORS: [Operator; 3] = [Operator::Cut, Operator::Zero, Operator::One];

/// Every playable move accepted by the executor on `position`.
#[instrument(skip(position), fields(position = %position))]
pub fn playable_moves(position: &Snapshot) -> Vec<Move> {
    Way::ALL
        .into_iter()
        .flat_map(|way| playable_operators().map(move |op| Move::new(way, op)))
        .filter(|mv| execute::plan(position, mv).is_ok())
        .collect()
}

/// Whether any playable move exists, stopping at the first one found.
pub fn has_playable_move(position: &Snapshot) -> bool {
    Way::ALL.into_iter().any(|way| {
        playable_operators().any(|op| execute::plan(position, &Move::new(way, op)).is_ok())
    })
}

/// Editing moves (`Cut`, `Zero`, `One`) accepted on `position`.
#[instrument(skip(position), fields(position = %position))]
pub fn edit_moves(position: &Snapshot) -> Vec<Move> {
    Way::ALL
        .into_iter()
        .flat_map(|way| EDIT_OPERATORS.map(|op| Move::new(way, op).as_edit()))
        .filter(|mv| execute::plan(position, mv).is_ok())
        .collect()
}

/// Marks moves whose resulting position repeats an earlier move's.
///
/// Positions are compared by grid, side to move and locks. Editing moves
/// are never simulated or marked. The board is restored after every
/// simulation.
#[instrument(skip_all, fields(count = moves.len()))]
pub fn mark_duplicates(board: &mut Board, moves: &mut [Move]) {
    let before = board.position().clone();
    let mut seen: HashMap<String, String> = HashMap::new();

    for mv in moves.iter_mut() {
        if mv.operator().is_editing() {
            continue;
        }
        let signature = match Simulation::start(board, mv.clone()) {
            Ok(simulation) => simulation.board().position().signature(),
            Err(err) => {
                warn!(%err, code = %mv, "Generated move failed to simulate");
                continue;
            }
        };
        match seen.get(&signature) {
            Some(first) => mv.set_duplicate_of(first.clone()),
            None => {
                seen.insert(signature, mv.code());
            }
        }
    }

    if *board.position() != before {
        error!(
            before = %before,
            after = %board.position(),
            "Duplicate marking changed the board"
        );
    }
    debug_assert_eq!(*board.position(), before);
}

/// A move pushed for inspection and undone when dropped.
pub struct Simulation<'a> {
    board: &'a mut Board,
}

impl<'a> Simulation<'a> {
    /// Pushes `mv` onto the board.
    ///
    /// # Errors
    ///
    /// Returns the push error; nothing needs undoing in that case.
    pub fn start(board: &'a mut Board, mv: Move) -> Result<Self, MoveError> {
        board.push(mv)?;
        Ok(Self { board })
    }

    /// The board with the simulated move applied.
    pub fn board(&self) -> &Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.board.undo() {
            error!(%err, "Simulation failed to revert");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(moves: &[Move]) -> Vec<String> {
        moves.iter().map(Move::code).collect()
    }

    #[test]
    fn test_startpos_moves() {
        let position = Snapshot::start();
        assert_eq!(codes(&playable_moves(&position)), vec!["2n", "4n", "bn", "dn"]);
        assert!(has_playable_move(&position));
    }

    #[test]
    fn test_empty_grid_has_no_moves() {
        let position = Snapshot::empty();
        assert!(playable_moves(&position).is_empty());
        assert!(!has_playable_move(&position));
        assert!(edit_moves(&position).is_empty());
    }

    #[test]
    fn test_startpos_edit_moves() {
        let position = Snapshot::start();
        assert_eq!(codes(&edit_moves(&position)), vec!["&3c", "&cc"]);
    }

    #[test]
    fn test_simulation_reverts_on_drop() {
        let mut board = Board::new();
        let before = board.clone();
        {
            let simulation = Simulation::start(&mut board, Move::parse("4n").unwrap()).unwrap();
            assert_eq!(simulation.board().history().len(), 1);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_duplicates_are_marked() {
        // Every rotation of a uniform run yields the same grid.
        let mut board: Board = "7/7/7/7/7/xxxx3 b - 1".parse().unwrap();
        let before = board.clone();
        let moves = board.legal_moves();
        let find = |code: &str| moves.iter().find(|mv| mv.code() == code).unwrap();
        assert_eq!(find("as1").duplicate_of(), None);
        assert_eq!(find("as2").duplicate_of(), Some("as1"));
        assert_eq!(find("as3").duplicate_of(), Some("as1"));
        assert_eq!(board, before);

        let distinct = codes(&board.distinct_moves());
        assert!(distinct.contains(&"as1".to_string()));
        assert!(!distinct.contains(&"as2".to_string()));
        assert_eq!(board, before);
    }
}

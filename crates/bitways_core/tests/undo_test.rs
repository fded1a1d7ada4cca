//! Tests for exact undo.

use bitways_core::{Board, Move, MoveError};

/// Plays a deterministic but varied line of playable moves.
fn play_line(board: &mut Board, plies: usize) -> Vec<Board> {
    let mut snapshots = Vec::new();
    for ply in 0..plies {
        let moves = board.playable_moves();
        if moves.is_empty() {
            break;
        }
        snapshots.push(board.clone());
        let mv = moves[(ply * 7) % moves.len()].clone();
        board.push(mv).unwrap();
    }
    snapshots
}

#[test]
fn test_every_playable_move_undoes_exactly() {
    let mut board = Board::new();
    play_line(&mut board, 12);
    for mv in board.playable_moves() {
        let before = board.clone();
        board.push(mv.clone()).unwrap();
        assert_eq!(board.undo(), Ok(mv.clone()));
        assert_eq!(board, before, "undo of {mv}");
    }
}

#[test]
fn test_long_line_unwinds_to_start() {
    let mut board = Board::new();
    let snapshots = play_line(&mut board, 40);
    assert!(!snapshots.is_empty());
    for expected in snapshots.iter().rev() {
        board.undo().unwrap();
        assert_eq!(&board, expected);
        assert_eq!(board.check_invariants(), Ok(()));
    }
    assert_eq!(board, Board::new());
    assert_eq!(board.undo(), Err(MoveError::NothingToUndo));
}

#[test]
fn test_undo_restores_lock_flag() {
    let mut board = Board::new();
    for code in ["4n", "2n", "3a"] {
        board.push_code(code).unwrap();
    }
    let file = bitways_core::Way::from_symbol('3').unwrap();
    assert!(board.position().is_locked(file));

    // A force-unlocked move clears the lock; its undo puts it back.
    board.push_code("3nL#").unwrap();
    assert!(!board.position().is_locked(file));
    board.undo().unwrap();
    assert!(board.position().is_locked(file));

    board.undo().unwrap();
    assert!(!board.position().is_locked(file));
}

#[test]
fn test_editing_binary_moves_undo() {
    let mut board: Board = "7/7/7/7/7/xo5 w - 4".parse().unwrap();
    let before = board.clone();
    board.push_code("&3ze").unwrap();
    board.push_code("&3c").unwrap_or_else(|err| panic!("cut failed: {err}"));
    // The cut cannot be reverted and stays on the history.
    assert!(matches!(board.undo(), Err(MoveError::NoInverseAvailable(_))));
    assert_eq!(board.history().len(), 2);

    let mut board = before.clone();
    board.push(Move::parse("&3on").unwrap()).unwrap();
    board.undo().unwrap();
    assert_eq!(board, before);
}

//! Tests for move codes and position strings.

use bitways_core::{Board, Move, Operator, ParseError, ShiftAmount, Snapshot, Way};

fn sample_boards() -> Vec<Board> {
    let mut boards = vec![Board::new()];
    let mut board = Board::new();
    for code in ["4n", "2n", "3a", "bn", "5n"] {
        board.push_code(code).unwrap();
        boards.push(board.clone());
    }
    boards
}

#[test]
fn test_generated_moves_round_trip() {
    for board in sample_boards() {
        for mv in board.playable_moves().into_iter().chain(board.edit_moves()) {
            let code = mv.to_string();
            assert_eq!(Move::parse(&code), Ok(mv), "code {code}");
        }
    }
}

#[test]
fn test_every_stem_parses() {
    let way = Way::from_symbol('d').unwrap();
    let operators = [
        Operator::Cut,
        Operator::Edit,
        Operator::Shift(ShiftAmount::new(4).unwrap()),
        Operator::Not,
        Operator::NotLow,
        Operator::NotHigh,
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::Nand,
        Operator::Nor,
        Operator::Xnor,
        Operator::Zero,
        Operator::One,
    ];
    for op in operators {
        let mv = Move::new(way, op);
        let parsed: Move = mv.code().parse().unwrap();
        assert_eq!(parsed.operator(), op);
        assert_eq!(parsed.way(), way);
    }
}

#[test]
fn test_positions_round_trip() {
    for board in sample_boards() {
        let text = board.position().to_string();
        let parsed: Snapshot = text.parse().unwrap();
        assert_eq!(&parsed, board.position());
        assert_eq!(parsed.to_string(), text);
    }
}

#[test]
fn test_boards_round_trip_with_history() {
    for board in sample_boards() {
        let parsed: Board = board.to_string().parse().unwrap();
        assert_eq!(parsed, board);
    }
}

#[test]
fn test_startpos_serialisation() {
    let board = Board::new();
    assert_eq!(board.position().to_string(), "startpos b - 1");
    let parsed: Snapshot = "startpos b - 1".parse().unwrap();
    assert_eq!(parsed, Snapshot::start());
}

#[test]
fn test_malformed_input_is_rejected() {
    for code in ["", "&", "9n", "4", "4q", "4n$", "4n#x", "4s7", "4e$012"] {
        assert!(
            matches!(Move::parse(code), Err(ParseError::MalformedMove(_))),
            "code {code:?}"
        );
    }
    for text in [
        "",
        "startpos b -",
        "startpos x - 1",
        "startpos b - 0",
        "startpos b z 1",
        "8/7/7/7/7/7 b - 1",
        "7/7/7/7/7 b - 1",
    ] {
        assert!(
            matches!(text.parse::<Snapshot>(), Err(ParseError::MalformedPosition(_))),
            "position {text:?}"
        );
    }
}

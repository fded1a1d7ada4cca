//! Error types for the rule engine.

use crate::coord::Way;

/// Misuse of the coordinate model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum CoordError {
    /// A file or rank is off the grid.
    #[display("Coordinate out of range: file {}, rank {}", file, rank)]
    OutOfRange {
        /// Requested file.
        file: u8,
        /// Requested rank.
        rank: u8,
    },

    /// The character does not name a way.
    #[display("Unknown way symbol {:?}", _0)]
    UnknownWaySymbol(char),
}

impl std::error::Error for CoordError {}

/// Rejected text input. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseError {
    /// The move code does not match the move grammar.
    #[display("Malformed move: {}", _0)]
    MalformedMove(String),

    /// The position string could not be decoded.
    #[display("Malformed position: {}", _0)]
    MalformedPosition(String),
}

impl std::error::Error for ParseError {}

/// A move that cannot be executed on the current board.
///
/// Every precondition is checked before the first cell is written, so the
/// board is unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Binary operators may not write to a locked way.
    #[display("Way {} is locked", _0)]
    WayLocked(Way),

    /// A unary operator found no occupied neighbour to read from.
    #[display("Way {} has no valid source way", _0)]
    NoValidSource(Way),

    /// A binary operator found no pair of occupied input ways.
    #[display("Way {} has no valid input pair", _0)]
    NoValidInputPair(Way),

    /// Explicit stones do not fit the way or its occupied run.
    #[display("Way {} expects {} stones, got {}", way, expected, found)]
    LengthMismatch {
        /// Target way.
        way: Way,
        /// Length of the way (the run length is also accepted when occupied).
        expected: usize,
        /// Length of the supplied stones.
        found: usize,
    },

    /// The operator needs stones on the way.
    #[display("Way {} is empty", _0)]
    EmptyWay(Way),

    /// The shift amount is not a proper rotation of the run.
    #[display("Cannot shift way {} by {} (run length {})", way, amount, run)]
    InvalidShift {
        /// Target way.
        way: Way,
        /// Requested shift.
        amount: u8,
        /// Length of the occupied run.
        run: usize,
    },

    /// Board-editing operators have no inverse.
    #[display("No inverse available for {}", _0)]
    NoInverseAvailable(String),

    /// The move number cannot advance any further.
    #[display("Move number {} is the last one", _0)]
    MoveNumberExhausted(u32),

    /// Undo was requested with an empty history.
    #[display("No move to undo")]
    NothingToUndo,
}

impl std::error::Error for MoveError {}

/// Any failure of the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum Error {
    /// Coordinate error.
    #[display("{}", _0)]
    Coord(CoordError),

    /// Text input error.
    #[display("{}", _0)]
    Parse(ParseError),

    /// Move execution error.
    #[display("{}", _0)]
    Move(MoveError),
}

impl std::error::Error for Error {}

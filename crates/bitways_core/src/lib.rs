//! Rule engine for bitways, a two-player game of bitwise operators on a
//! 7×6 grid.
//!
//! Stones are bits: Black is 1, White is 0. A move applies an operator
//! (shift, negation or a two-input gate) to one file or rank, reading from
//! its neighbours. Each colour races to lay out three clear targets.
//!
//! # Architecture
//!
//! - [`coord`], [`types`]: squares, ways, stones and colours
//! - [`action`]: operators and the move-code grammar
//! - [`position`]: a single snapshot and its text form
//! - [`execute`]: validation and effect of a move on a snapshot
//! - [`board`]: snapshot plus history, push and exact undo
//! - [`movegen`]: legal and editing move lists, duplicate marking
//! - [`rules`]: clear targets, win progress and game status
//!
//! ```
//! use bitways_core::Board;
//!
//! let mut board = Board::new();
//! board.push_code("4n").unwrap();
//! assert_eq!(board.to_string(), "startpos b - 1 moves 4n");
//! board.undo().unwrap();
//! assert_eq!(board, Board::new());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod action;
pub mod board;
pub mod coord;
pub mod error;
pub mod execute;
pub mod inverse;
pub mod invariants;
pub mod movegen;
pub mod position;
pub mod rules;
pub mod types;

pub use action::{Arity, Move, Operator, ShiftAmount};
pub use board::{Board, HistoryEntry};
pub use coord::{Axis, Square, Way};
pub use error::{CoordError, Error, MoveError, ParseError};
pub use invariants::{Invariant, InvariantSet, InvariantViolation};
pub use movegen::Simulation;
pub use position::Snapshot;
pub use rules::{GameStatus, Target, WinProgress};
pub use types::{Color, Stone};

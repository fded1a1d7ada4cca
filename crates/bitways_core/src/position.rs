//! A single position and its text form.
//!
//! ```text
//! <grid> <turn> <locks> <move-number>
//! ```
//!
//! The grid lists ranks from `f` down to `a`, separated by `/`, each rank
//! left to right by file. Black is `x`, White is `o`, and a run of empty
//! cells is its decimal count. The canonical starting layout is written as
//! the token `startpos`. Locks are the locked way symbols in order
//! `1234567abcdef`, or `-` when none is locked.

use crate::coord::{FILES, RANKS, SQUARES, Square, WAYS, Way};
use crate::error::ParseError;
use crate::types::{Color, Stone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Token standing for the canonical starting grid.
pub const STARTPOS: &str = "startpos";

/// Square of the single White stone in the starting position.
const START_SQUARE: Square = Square::at(2, 2);

/// Cells, way locks, side to move and move number of one position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    cells: Vec<Stone>,
    locks: [bool; WAYS],
    turn: Color,
    move_number: u32,
}

impl Snapshot {
    /// An empty grid, Black to move, nothing locked, move 1.
    pub fn empty() -> Self {
        Self {
            cells: vec![Stone::Empty; SQUARES],
            locks: [false; WAYS],
            turn: Color::Black,
            move_number: 1,
        }
    }

    /// The starting position: one White stone, Black to move.
    pub fn start() -> Self {
        let mut snapshot = Self::empty();
        snapshot.cells[start_square().index()] = Stone::White;
        snapshot
    }

    /// Stone on a square.
    pub fn get(&self, sq: Square) -> Stone {
        self.cells[sq.index()]
    }

    /// Places a stone on a square.
    pub fn set(&mut self, sq: Square, stone: Stone) {
        self.cells[sq.index()] = stone;
    }

    /// All cells in square order.
    pub fn cells(&self) -> &[Stone] {
        &self.cells
    }

    /// Stones along a way, in way order.
    pub fn line(&self, way: Way) -> Vec<Stone> {
        way.squares().map(|sq| self.get(sq)).collect()
    }

    /// Overwrites a way. `stones` must be as long as the way.
    pub(crate) fn set_line(&mut self, way: Way, stones: &[Stone]) {
        debug_assert_eq!(stones.len(), way.len());
        for (sq, stone) in way.squares().zip(stones) {
            self.set(sq, *stone);
        }
    }

    /// Whether any stone lies on the way.
    pub fn is_occupied(&self, way: Way) -> bool {
        way.squares().any(|sq| self.get(sq).is_occupied())
    }

    /// Whether the way is locked against binary operators.
    pub fn is_locked(&self, way: Way) -> bool {
        self.locks[way.ordinal()]
    }

    /// Sets a way's lock flag.
    pub fn set_locked(&mut self, way: Way, locked: bool) {
        self.locks[way.ordinal()] = locked;
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Sets the side to move.
    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    /// Number of the next move.
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Sets the number of the next move.
    pub fn set_move_number(&mut self, move_number: u32) {
        self.move_number = move_number;
    }

    pub(crate) fn advance(&mut self) {
        self.turn = self.turn.opponent();
        self.move_number += 1;
    }

    pub(crate) fn retreat(&mut self) {
        self.turn = self.turn.opponent();
        self.move_number = self.move_number.saturating_sub(1);
    }

    /// Whether the grid is the canonical starting layout.
    pub fn is_start_grid(&self) -> bool {
        self.cells == Self::start().cells
    }

    /// Grid field of the notation.
    pub fn grid(&self) -> String {
        if self.is_start_grid() {
            return STARTPOS.to_string();
        }
        (0..RANKS)
            .rev()
            .map(|rank| {
                let mut row = String::new();
                let mut empties = 0;
                for file in 0..FILES {
                    match self.get(Square::at(file, rank)).grid_char() {
                        Some(ch) => {
                            if empties > 0 {
                                row.push_str(&empties.to_string());
                                empties = 0;
                            }
                            row.push(ch);
                        }
                        None => empties += 1,
                    }
                }
                if empties > 0 {
                    row.push_str(&empties.to_string());
                }
                row
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Locks field of the notation.
    pub fn locks(&self) -> String {
        let locked: String = Way::ALL
            .iter()
            .filter(|way| self.is_locked(**way))
            .map(|way| way.symbol())
            .collect();
        if locked.is_empty() { "-".to_string() } else { locked }
    }

    /// The notation without the move number.
    ///
    /// Two positions with equal signatures differ at most in move number.
    pub fn signature(&self) -> String {
        format!("{} {} {}", self.grid(), self.turn.to_char(), self.locks())
    }

    /// Plain-text diagram, rank `f` at the top.
    pub fn diagram(&self) -> String {
        let mut out = String::new();
        for rank in (0..RANKS).rev() {
            out.push((b'a' + rank) as char);
            out.push(' ');
            out.push(if self.is_locked(Way::ALL[FILES as usize + rank as usize]) {
                '*'
            } else {
                ' '
            });
            for file in 0..FILES {
                out.push(' ');
                out.push(self.get(Square::at(file, rank)).grid_char().unwrap_or('.'));
            }
            out.push('\n');
        }
        out.push_str("    ");
        for way in &Way::ALL[..FILES as usize] {
            out.push(' ');
            out.push(if self.is_locked(*way) { '*' } else { ' ' });
        }
        out.push_str("\n    ");
        for way in &Way::ALL[..FILES as usize] {
            out.push(' ');
            out.push(way.symbol());
        }
        out.push('\n');
        out
    }

    fn parse_grid(&mut self, field: &str) -> Result<(), ParseError> {
        let malformed = |why: &str| ParseError::MalformedPosition(format!("{why} in grid {field:?}"));

        if field == STARTPOS {
            self.cells = Self::start().cells;
            return Ok(());
        }

        let rows: Vec<&str> = field.split('/').collect();
        if rows.len() != RANKS as usize {
            return Err(malformed("wrong number of ranks"));
        }

        for (row, text) in rows.iter().enumerate() {
            let rank = RANKS - 1 - row as u8;
            let mut file: u8 = 0;
            let mut chars = text.chars().peekable();
            while let Some(ch) = chars.next() {
                if let Some(digit) = ch.to_digit(10) {
                    let mut count = digit;
                    while let Some(next) = chars.peek().and_then(|c| c.to_digit(10)) {
                        count = count.saturating_mul(10).saturating_add(next);
                        chars.next();
                    }
                    if count == 0 || file as u32 + count > FILES as u32 {
                        return Err(malformed("bad empty run"));
                    }
                    for _ in 0..count {
                        self.set(Square::at(file, rank), Stone::Empty);
                        file += 1;
                    }
                } else {
                    let stone = Stone::from_grid_char(ch).ok_or_else(|| malformed("unknown stone"))?;
                    let sq = Square::new(file, rank).map_err(|_| malformed("rank overflow"))?;
                    self.set(sq, stone);
                    file += 1;
                }
            }
            if file != FILES {
                return Err(malformed("short rank"));
            }
        }
        Ok(())
    }

    fn parse_locks(&mut self, field: &str) -> Result<(), ParseError> {
        self.locks = [false; WAYS];
        if field == "-" {
            return Ok(());
        }
        let mut last = None;
        for ch in field.chars() {
            let way = Way::from_symbol(ch).map_err(|e| {
                ParseError::MalformedPosition(format!("{e} in locks {field:?}"))
            })?;
            if last.is_some_and(|prev| prev >= way.ordinal()) {
                return Err(ParseError::MalformedPosition(format!(
                    "locks {field:?} out of order"
                )));
            }
            last = Some(way.ordinal());
            self.set_locked(way, true);
        }
        Ok(())
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::start()
    }
}

/// Square of the single stone in the starting position.
pub fn start_square() -> Square {
    START_SQUARE
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.signature(), self.move_number)
    }
}

impl FromStr for Snapshot {
    type Err = ParseError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(' ').collect();
        let [grid, turn, locks, number] = fields.as_slice() else {
            return Err(ParseError::MalformedPosition(format!(
                "expected 4 fields, got {}",
                fields.len()
            )));
        };

        let mut snapshot = Snapshot::empty();
        snapshot.parse_grid(grid)?;

        let mut turn_chars = turn.chars();
        snapshot.turn = match (turn_chars.next().and_then(Color::from_char), turn_chars.next()) {
            (Some(color), None) => color,
            _ => {
                return Err(ParseError::MalformedPosition(format!(
                    "bad side to move {turn:?}"
                )));
            }
        };

        snapshot.parse_locks(locks)?;

        snapshot.move_number = match number.parse::<u32>() {
            Ok(n) if n >= 1 && number.chars().all(|c| c.is_ascii_digit()) => n,
            _ => {
                return Err(ParseError::MalformedPosition(format!(
                    "bad move number {number:?}"
                )));
            }
        };

        Ok(snapshot)
    }
}

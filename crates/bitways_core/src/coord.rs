//! Coordinate model: squares, axes and ways.
//!
//! The grid has 7 files and 6 ranks. A square is addressed by
//! `file * 6 + rank`. A way is one full line of the grid: a file
//! (symbols `1`..`7`, 6 cells each) or a rank (symbols `a`..`f`,
//! 7 cells each).

use crate::error::CoordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Number of files on the grid.
pub const FILES: u8 = 7;
/// Number of ranks on the grid.
pub const RANKS: u8 = 6;
/// Number of squares on the grid.
pub const SQUARES: usize = (FILES as usize) * (RANKS as usize);
/// Number of ways (7 files followed by 6 ranks).
pub const WAYS: usize = (FILES as usize) + (RANKS as usize);

/// A square on the grid, in `[0, 42)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::OutOfRange`] if either coordinate is off the grid.
    #[instrument]
    pub fn new(file: u8, rank: u8) -> Result<Self, CoordError> {
        if file >= FILES || rank >= RANKS {
            return Err(CoordError::OutOfRange { file, rank });
        }
        Ok(Self::at(file, rank))
    }

    /// Square at in-range coordinates.
    pub(crate) const fn at(file: u8, rank: u8) -> Self {
        debug_assert!(file < FILES && rank < RANKS);
        Self(file * RANKS + rank)
    }

    /// Creates a square from its index.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SQUARES).then_some(Self(index as u8))
    }

    /// Index of the square in `[0, 42)`.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// File of the square, `0..7`.
    pub fn file(self) -> u8 {
        self.0 / RANKS
    }

    /// Rank of the square, `0..6`.
    pub fn rank(self) -> u8 {
        self.0 % RANKS
    }

    /// Iterates over all squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARES as u8).map(Square)
    }

    /// Square displaced by `(df, dr)`, if it stays on the grid.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..FILES as i8).contains(&file) && (0..RANKS as i8).contains(&rank) {
            Some(Self::at(file as u8, rank as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'1' + self.file()) as char, (b'a' + self.rank()) as char)
    }
}

/// Orientation of a way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Axis {
    /// A column of the grid, fixed file, 6 cells.
    File,
    /// A row of the grid, fixed rank, 7 cells.
    Rank,
}

impl Axis {
    /// Number of ways along this axis.
    pub fn count(self) -> u8 {
        match self {
            Axis::File => FILES,
            Axis::Rank => RANKS,
        }
    }

    /// Number of cells on one way of this axis (the opposite axis length).
    pub fn line_len(self) -> usize {
        match self {
            Axis::File => RANKS as usize,
            Axis::Rank => FILES as usize,
        }
    }
}

/// One full file or rank of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Way {
    axis: Axis,
    index: u8,
}

impl Way {
    /// All 13 ways in lock order: files `1..7`, then ranks `a..f`.
    pub const ALL: [Way; WAYS] = [
        Way::file(0),
        Way::file(1),
        Way::file(2),
        Way::file(3),
        Way::file(4),
        Way::file(5),
        Way::file(6),
        Way::rank(0),
        Way::rank(1),
        Way::rank(2),
        Way::rank(3),
        Way::rank(4),
        Way::rank(5),
    ];

    const fn file(index: u8) -> Self {
        Self { axis: Axis::File, index }
    }

    const fn rank(index: u8) -> Self {
        Self { axis: Axis::Rank, index }
    }

    /// Creates a way from an axis and an index along it.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::OutOfRange`] if `index` is past the axis.
    pub fn new(axis: Axis, index: u8) -> Result<Self, CoordError> {
        if index >= axis.count() {
            return Err(match axis {
                Axis::File => CoordError::OutOfRange { file: index, rank: 0 },
                Axis::Rank => CoordError::OutOfRange { file: 0, rank: index },
            });
        }
        Ok(Self { axis, index })
    }

    /// Resolves a way symbol (`1`..`7` or `a`..`f`).
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::UnknownWaySymbol`] for any other character.
    pub fn from_symbol(ch: char) -> Result<Self, CoordError> {
        match ch {
            '1'..='7' => Ok(Self::file(ch as u8 - b'1')),
            'a'..='f' => Ok(Self::rank(ch as u8 - b'a')),
            _ => Err(CoordError::UnknownWaySymbol(ch)),
        }
    }

    /// The way's symbol.
    pub fn symbol(self) -> char {
        match self.axis {
            Axis::File => (b'1' + self.index) as char,
            Axis::Rank => (b'a' + self.index) as char,
        }
    }

    /// Axis of the way.
    pub fn axis(self) -> Axis {
        self.axis
    }

    /// Index along the axis.
    pub fn index(self) -> u8 {
        self.index
    }

    /// Position of the way in lock order, `0..13`.
    pub fn ordinal(self) -> usize {
        match self.axis {
            Axis::File => self.index as usize,
            Axis::Rank => FILES as usize + self.index as usize,
        }
    }

    /// Number of cells on the way.
    pub fn len(self) -> usize {
        self.axis.line_len()
    }

    /// Square at position `pos` along the way.
    pub fn square(self, pos: usize) -> Option<Square> {
        if pos >= self.len() {
            return None;
        }
        let pos = pos as u8;
        Some(match self.axis {
            Axis::File => Square::at(self.index, pos),
            Axis::Rank => Square::at(pos, self.index),
        })
    }

    /// Squares of the way in order of increasing position.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        (0..self.len()).filter_map(move |pos| self.square(pos))
    }

    /// The parallel way `n` steps toward index 0, if any.
    pub fn low(self, n: u8) -> Option<Way> {
        self.index.checked_sub(n).map(|index| Self { axis: self.axis, index })
    }

    /// The parallel way `n` steps away from index 0, if any.
    pub fn high(self, n: u8) -> Option<Way> {
        let index = self.index.checked_add(n)?;
        (index < self.axis.count()).then_some(Self { axis: self.axis, index })
    }
}

impl fmt::Display for Way {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_from_file_and_rank() {
        let sq = Square::new(2, 2).unwrap();
        assert_eq!(sq.index(), 14);
        assert_eq!(sq.file(), 2);
        assert_eq!(sq.rank(), 2);
        assert_eq!(sq.to_string(), "3c");
    }

    #[test]
    fn test_square_out_of_range() {
        assert_eq!(
            Square::new(7, 0),
            Err(CoordError::OutOfRange { file: 7, rank: 0 })
        );
        assert!(Square::new(0, 6).is_err());
    }

    #[test]
    fn test_way_symbols() {
        let symbols: String = Way::ALL.iter().map(|w| w.symbol()).collect();
        assert_eq!(symbols, "1234567abcdef");
        for way in Way::ALL {
            assert_eq!(Way::from_symbol(way.symbol()), Ok(way));
        }
        assert_eq!(Way::from_symbol('g'), Err(CoordError::UnknownWaySymbol('g')));
        assert_eq!(Way::from_symbol('0'), Err(CoordError::UnknownWaySymbol('0')));
    }

    #[test]
    fn test_way_lengths_and_squares() {
        let file = Way::from_symbol('3').unwrap();
        assert_eq!(file.len(), 6);
        let squares: Vec<usize> = file.squares().map(Square::index).collect();
        assert_eq!(squares, vec![12, 13, 14, 15, 16, 17]);

        let rank = Way::from_symbol('c').unwrap();
        assert_eq!(rank.len(), 7);
        let squares: Vec<usize> = rank.squares().map(Square::index).collect();
        assert_eq!(squares, vec![2, 8, 14, 20, 26, 32, 38]);
    }

    #[test]
    fn test_way_neighbours_stop_at_edge() {
        let first = Way::from_symbol('1').unwrap();
        assert_eq!(first.low(1), None);
        assert_eq!(first.high(1), Way::from_symbol('2').ok());
        assert_eq!(first.high(6), Way::from_symbol('7').ok());
        assert_eq!(first.high(7), None);

        let top = Way::from_symbol('f').unwrap();
        assert_eq!(top.high(1), None);
        assert_eq!(top.low(2), Way::from_symbol('d').ok());
    }

    #[test]
    fn test_offset_stays_on_grid() {
        let corner = Square::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(1, 1), Square::new(1, 1).ok());
        let far = Square::new(6, 5).unwrap();
        assert_eq!(far.offset(1, 0), None);
    }
}

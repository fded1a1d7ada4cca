//! Stones and colours.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Color {
    /// Black, first to move from the starting position.
    Black,
    /// White.
    White,
}

impl Color {
    /// Returns the opposing colour.
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// The stone of this colour.
    pub fn stone(self) -> Stone {
        match self {
            Color::Black => Stone::Black,
            Color::White => Stone::White,
        }
    }

    /// Side-to-move field of the position notation.
    pub fn to_char(self) -> char {
        match self {
            Color::Black => 'b',
            Color::White => 'w',
        }
    }

    /// Parses the side-to-move field.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'b' => Some(Color::Black),
            'w' => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Content of one cell.
///
/// Black reads as `1` and White as `0` when an operator evaluates a cell.
/// An empty cell takes part in no evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    /// No stone.
    #[default]
    Empty,
    /// A black stone (bit 1).
    Black,
    /// A white stone (bit 0).
    White,
}

impl Stone {
    /// Whether a stone is present.
    pub fn is_occupied(self) -> bool {
        self != Stone::Empty
    }

    /// Colour of the stone, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Stone::Empty => None,
            Stone::Black => Some(Color::Black),
            Stone::White => Some(Color::White),
        }
    }

    /// Bit value of the stone, if any.
    pub fn bit(self) -> Option<bool> {
        match self {
            Stone::Empty => None,
            Stone::Black => Some(true),
            Stone::White => Some(false),
        }
    }

    /// Stone for a bit value.
    pub fn from_bit(bit: bool) -> Self {
        if bit { Stone::Black } else { Stone::White }
    }

    /// The opposite stone; empty stays empty.
    pub fn inverted(self) -> Self {
        match self {
            Stone::Empty => Stone::Empty,
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Character used in explicit stone payloads (`1`, `0`, `.`).
    pub fn payload_char(self) -> char {
        match self {
            Stone::Empty => '.',
            Stone::Black => '1',
            Stone::White => '0',
        }
    }

    /// Parses a payload character.
    pub fn from_payload_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Stone::Empty),
            '1' => Some(Stone::Black),
            '0' => Some(Stone::White),
            _ => None,
        }
    }

    /// Character used in the grid field of the position notation.
    pub fn grid_char(self) -> Option<char> {
        match self {
            Stone::Empty => None,
            Stone::Black => Some('x'),
            Stone::White => Some('o'),
        }
    }

    /// Parses a grid character.
    pub fn from_grid_char(ch: char) -> Option<Self> {
        match ch {
            'x' => Some(Stone::Black),
            'o' => Some(Stone::White),
            _ => None,
        }
    }
}

/// Formats stones as a payload string.
pub fn stones_to_payload(stones: &[Stone]) -> String {
    stones.iter().map(|s| s.payload_char()).collect()
}

/// Parses a payload string; `None` on any character outside `.01`.
pub fn payload_to_stones(payload: &str) -> Option<Vec<Stone>> {
    payload.chars().map(Stone::from_payload_char).collect()
}

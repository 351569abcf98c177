//! Board squares and the conversions between coordinates and square names.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Vector;

/// Errors raised by malformed coordinates, square names or piece letters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid square: ({col}, {row}) is off the board")]
    InvalidSquare { col: i8, row: i8 },

    #[error("invalid coordinate: ({col}, {row}) is off the board")]
    InvalidCoordinate { col: i8, row: i8 },

    #[error("invalid square notation: {0:?}")]
    InvalidNotation(String),

    #[error("invalid file: '{0}'")]
    InvalidFile(char),

    #[error("invalid rank: '{0}'")]
    InvalidRank(char),

    #[error("invalid piece type: '{0}'")]
    InvalidPieceType(char),
}

/// A square on the 8x8 board.
///
/// Squares are indexed in little-endian rank-file order:
/// - a1 = 0, b1 = 1, ..., h1 = 7
/// - a2 = 8, ..., h8 = 63
///
/// `col` is the file (0 = a) and `row` the rank (0 = rank 1).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Builds a square from a column and row, failing if either lies outside `0..8`.
    pub fn from_coords(col: i8, row: i8) -> Result<Self, NotationError> {
        Self::checked(col, row).ok_or(NotationError::InvalidSquare { col, row })
    }

    /// Builds a square from a column and row, or `None` if it is off the board.
    #[inline]
    pub const fn checked(col: i8, row: i8) -> Option<Self> {
        if col >= 0 && col < 8 && row >= 0 && row < 8 {
            Some(Square((row as u8) * 8 + col as u8))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a two-character square name such as `"e4"`.
    pub fn from_name(name: &str) -> Result<Self, NotationError> {
        let mut chars = name.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(NotationError::InvalidNotation(name.to_string())),
        };
        let col = file_index(file).ok_or(NotationError::InvalidFile(file))?;
        let row = rank_index(rank).ok_or(NotationError::InvalidRank(rank))?;
        Ok(Square(row * 8 + col))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// File index, 0 for the a-file.
    #[inline]
    pub const fn col(self) -> i8 {
        (self.0 % 8) as i8
    }

    /// Rank index, 0 for rank 1.
    #[inline]
    pub const fn row(self) -> i8 {
        (self.0 / 8) as i8
    }

    /// File letter (`a`-`h`).
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.0 % 8) as char
    }

    /// Rank digit (`1`-`8`).
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + self.0 / 8) as char
    }

    /// Returns the algebraic name of this square.
    pub fn name(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Steps by `vector`, or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, vector: Vector) -> Option<Self> {
        Self::checked(self.col() + vector.dc, self.row() + vector.dr)
    }

    pub const A1: Square = Square(0);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

/// Converts a column and row into a square name, e.g. `(4, 3)` to `"e4"`.
pub fn square_name(col: i8, row: i8) -> Result<String, NotationError> {
    Square::from_coords(col, row).map(Square::name)
}

/// Converts a file letter into a column index.
pub fn file_index(c: char) -> Option<u8> {
    match c {
        'a'..='h' => Some(c as u8 - b'a'),
        _ => None,
    }
}

/// Converts a rank digit into a row index.
pub fn rank_index(c: char) -> Option<u8> {
    match c {
        '1'..='8' => Some(c as u8 - b'1'),
        _ => None,
    }
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.name())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

//! Move representation.

use std::fmt;
use std::str::FromStr;

use crate::{CastleSide, NotationError, Square};

/// A move request: a piece relocation or one of the two castling moves.
///
/// Promotion choice and captures are resolved by the position when the move
/// is applied, so they are not part of the move itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Move the piece on `from` to `to`.
    Piece { from: Square, to: Square },
    /// Castle on the given side with the side to move.
    Castle(CastleSide),
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move::Piece { from, to }
    }

    /// Origin square, if this is a piece move.
    pub const fn from(self) -> Option<Square> {
        match self {
            Move::Piece { from, .. } => Some(from),
            Move::Castle(_) => None,
        }
    }

    /// Destination square, if this is a piece move.
    pub const fn to(self) -> Option<Square> {
        match self {
            Move::Piece { to, .. } => Some(to),
            Move::Castle(_) => None,
        }
    }

    /// Parses coordinate notation (`e2e4`) or a castling token.
    pub fn parse(s: &str) -> Result<Self, NotationError> {
        if let Some(side) = CastleSide::from_token(s) {
            return Ok(Move::Castle(side));
        }
        if s.len() != 4 || !s.is_ascii() {
            return Err(NotationError::InvalidNotation(s.to_string()));
        }
        let from = Square::from_name(&s[0..2])?;
        let to = Square::from_name(&s[2..4])?;
        Ok(Move::Piece { from, to })
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Piece { from, to } => write!(f, "{}{}", from, to),
            Move::Castle(side) => write!(f, "{}", side),
        }
    }
}

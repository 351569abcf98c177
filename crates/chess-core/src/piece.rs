//! Piece kind representation.

use crate::{Color, NotationError};

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

impl PieceKind {
    /// All piece kinds in FEN letter order (`KQRBNP`).
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// Uppercase letter for this kind (`K`, `Q`, `R`, `B`, `N`, `P`).
    pub const fn letter(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }

    /// FEN character: uppercase for White, lowercase for Black.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = self.letter();
        match color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parses a piece letter case-insensitively, ignoring the owner.
    pub fn from_letter(c: char) -> Result<Self, NotationError> {
        match c.to_ascii_uppercase() {
            'K' => Ok(PieceKind::King),
            'Q' => Ok(PieceKind::Queen),
            'R' => Ok(PieceKind::Rook),
            'B' => Ok(PieceKind::Bishop),
            'N' => Ok(PieceKind::Knight),
            'P' => Ok(PieceKind::Pawn),
            _ => Err(NotationError::InvalidPieceType(c)),
        }
    }

    /// Parses a FEN character into a kind and owner (uppercase is White).
    pub fn from_fen_char(c: char) -> Result<(PieceKind, Color), NotationError> {
        let kind = Self::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok((kind, color))
    }

    /// Returns true for the kinds a pawn may promote to.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Pawn => "Pawn",
        };
        write!(f, "{}", name)
    }
}

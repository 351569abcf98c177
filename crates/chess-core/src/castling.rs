//! Castling sides and castling rights.

use std::fmt;

use crate::{Color, FenError};

/// The two castling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Short castling, towards the h-file (`O-O`).
    King,
    /// Long castling, towards the a-file (`O-O-O`).
    Queen,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// The move token for this side.
    pub const fn token(self) -> &'static str {
        match self {
            CastleSide::King => "O-O",
            CastleSide::Queen => "O-O-O",
        }
    }

    /// Parses `O-O` / `O-O-O` (zeros accepted as well).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "O-O" | "0-0" => Some(CastleSide::King),
            "O-O-O" | "0-0-0" => Some(CastleSide::Queen),
            _ => None,
        }
    }

    /// File the king lands on.
    pub const fn king_target_col(self) -> i8 {
        match self {
            CastleSide::King => 6,
            CastleSide::Queen => 2,
        }
    }

    /// File the rook lands on.
    pub const fn rook_target_col(self) -> i8 {
        match self {
            CastleSide::King => 5,
            CastleSide::Queen => 3,
        }
    }

    /// File of the rook before castling, in the standard setup.
    pub const fn rook_home_col(self) -> i8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    const fn flag(self, color: Color) -> u8 {
        match (color, self) {
            (Color::White, CastleSide::King) => CastlingRights::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queen) => CastlingRights::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::King) => CastlingRights::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queen) => CastlingRights::BLACK_QUEENSIDE,
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The set of unrevoked (player, side) castling rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);
    const WHITE_KINGSIDE: u8 = 0b0001;
    const WHITE_QUEENSIDE: u8 = 0b0010;
    const BLACK_KINGSIDE: u8 = 0b0100;
    const BLACK_QUEENSIDE: u8 = 0b1000;

    /// FEN letters in their canonical order.
    const ORDER: [(char, Color, CastleSide); 4] = [
        ('K', Color::White, CastleSide::King),
        ('Q', Color::White, CastleSide::Queen),
        ('k', Color::Black, CastleSide::King),
        ('q', Color::Black, CastleSide::Queen),
    ];

    /// Returns true if `color` still holds the right to castle on `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & side.flag(color) != 0
    }

    #[inline]
    pub fn grant(&mut self, color: Color, side: CastleSide) {
        self.0 |= side.flag(color);
    }

    /// Removes one right.
    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0 &= !side.flag(color);
    }

    /// Removes both rights of a color.
    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::King);
        self.revoke(color, CastleSide::Queen);
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parses the FEN castling field: a subset of `KQkq` or a lone `-`.
    ///
    /// Rejects unknown letters, duplicates and `-` mixed with letters.
    pub fn from_fen_field(field: &str) -> Result<Self, FenError> {
        if field == "-" {
            return Ok(Self::NONE);
        }
        if field.is_empty() || field.len() > 4 {
            return Err(FenError::InvalidCastlingRights(field.to_string()));
        }

        let mut rights = Self::NONE;
        for c in field.chars() {
            let (_, color, side) = Self::ORDER
                .iter()
                .copied()
                .find(|(letter, _, _)| *letter == c)
                .ok_or_else(|| {
                    FenError::InvalidCastlingRights(format!("invalid character '{}' in {}", c, field))
                })?;
            if rights.has(color, side) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate '{}' in {}",
                    c, field
                )));
            }
            rights.grant(color, side);
        }
        Ok(rights)
    }

    /// Renders the FEN castling field in `KQkq` order, or `-` when empty.
    pub fn to_fen_field(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        Self::ORDER
            .iter()
            .filter(|(_, color, side)| self.has(*color, *side))
            .map(|(letter, _, _)| *letter)
            .collect()
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen_field())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_render() {
        for field in ["KQkq", "Kq", "k", "-", "Qk"] {
            let rights = CastlingRights::from_fen_field(field).unwrap();
            assert_eq!(rights.to_fen_field(), field);
        }
    }

    #[test]
    fn render_uses_canonical_order() {
        let rights = CastlingRights::from_fen_field("qK").unwrap();
        assert_eq!(rights.to_fen_field(), "Kq");
    }

    #[test]
    fn rejects_bad_fields() {
        for field in ["X", "KK", "K-", "-K", "", "KQkqK"] {
            assert!(
                matches!(
                    CastlingRights::from_fen_field(field),
                    Err(FenError::InvalidCastlingRights(_))
                ),
                "{field:?} should be rejected"
            );
        }
    }

    #[test]
    fn revoke_one_and_all() {
        let mut rights = CastlingRights::ALL;
        rights.revoke(Color::White, CastleSide::King);
        assert!(!rights.has(Color::White, CastleSide::King));
        assert!(rights.has(Color::White, CastleSide::Queen));

        rights.revoke_all(Color::Black);
        assert_eq!(rights.to_fen_field(), "Q");
    }

    #[test]
    fn castle_tokens() {
        assert_eq!(CastleSide::from_token("O-O"), Some(CastleSide::King));
        assert_eq!(CastleSide::from_token("0-0-0"), Some(CastleSide::Queen));
        assert_eq!(CastleSide::from_token("O-O-O-O"), None);
        assert_eq!(CastleSide::Queen.to_string(), "O-O-O");
    }
}

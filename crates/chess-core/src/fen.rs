//! FEN (Forsyth-Edwards Notation) field parsing and serialization.
//!
//! [`FenRecord`] splits a FEN string into its six fields and validates the
//! ones that have a fixed vocabulary. The piece placement is kept as raw text:
//! turning it into pieces is the engine's job, and the engine recovers from
//! bad characters instead of rejecting the whole string.

use std::fmt;

use thiserror::Error;
use tracing::warn;

use crate::{CastlingRights, Color, Square};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),
}

/// The six fields of a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    /// Piece placement, rank 8 first (e.g. `"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"`).
    pub placement: String,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    /// Half-moves since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Starts at 1 and increments after Black's move.
    pub fullmove_number: u32,
}

impl FenRecord {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// The Horde starting position FEN.
    pub const HORDE_STARTPOS: &'static str =
        "rnbqkbnr/pppppppp/8/1PP2PP1/PPPPPPPP/PPPPPPPP/PPPPPPPP/PPPPPPPP w kq - 0 1";

    /// Parses a FEN string.
    ///
    /// All six fields are required. A malformed clock reads as 0.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placement = fields[0];
        let rank_count = placement.split('/').count();
        if rank_count != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                rank_count
            )));
        }

        let mut side = fields[1].chars();
        let side_to_move = match (side.next(), side.next()) {
            (Some(c), None) => Color::from_fen_char(c),
            _ => None,
        }
        .ok_or_else(|| FenError::InvalidSideToMove(fields[1].to_string()))?;

        let castling = CastlingRights::from_fen_field(fields[2])?;
        let en_passant = Self::parse_en_passant(fields[3])?;
        let halfmove_clock = Self::parse_clock(fields[4], "halfmove clock");
        let fullmove_number = Self::parse_clock(fields[5], "fullmove number");

        Ok(FenRecord {
            placement: placement.to_string(),
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
        if field == "-" {
            return Ok(None);
        }
        let square = Square::from_name(field)
            .map_err(|_| FenError::InvalidEnPassantSquare(field.to_string()))?;
        if square.row() != 2 && square.row() != 5 {
            return Err(FenError::InvalidEnPassantSquare(field.to_string()));
        }
        Ok(Some(square))
    }

    fn parse_clock(text: &str, name: &str) -> u32 {
        text.parse().unwrap_or_else(|_| {
            warn!(field = name, value = text, "malformed FEN clock, using 0");
            0
        })
    }

    /// Returns the first four fields, which identify a position for repetition.
    pub fn signature(&self) -> String {
        format!(
            "{} {} {} {}",
            self.placement,
            self.side_to_move.fen_char(),
            self.castling,
            self.en_passant.map_or_else(|| "-".to_string(), Square::name)
        )
    }
}

impl fmt::Display for FenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.signature(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for FenRecord {
    fn default() -> Self {
        FenRecord {
            placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".to_string(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

//! Chess position representation.
//!
//! A [`Position`] is the set of live pieces plus the four FEN state fields.
//! It applies single moves but does not know whose turn it "should" be or
//! whether a game is over; that bookkeeping belongs to [`Game`](crate::Game).

use chess_core::{
    CastleSide, CastlingRights, Color, FenError, FenRecord, Move, NotationError, PieceKind, Square,
};
use thiserror::Error;
use tracing::warn;

use crate::rules::{RuleSet, Variant};
use crate::Piece;

/// Errors raised while building or mutating a position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("no piece on {0}")]
    PieceNotFound(Square),

    #[error("{kind} on {from} cannot move to {to}")]
    IllegalPieceMove {
        kind: PieceKind,
        from: Square,
        to: Square,
    },

    #[error("{color} cannot castle {side}")]
    IllegalCastling { color: Color, side: CastleSide },

    #[error("{0} has no king on the board")]
    KingNotFound(Color),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Fen(#[from] FenError),
}

/// What happened while applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// At least one piece was removed from the board.
    pub captured: bool,
    /// The moving pawn was replaced by this piece.
    pub promoted: Option<PieceKind>,
}

/// A chess position.
///
/// Positions bound to a [`Variant`] apply that variant's capture and
/// castling rules; standalone positions (built with [`Position::from_fen`])
/// use standard rules. Cloning keeps the binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pieces: Vec<Piece>,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    variant: Option<Variant>,
}

impl Position {
    /// Creates an empty standalone position with White to move.
    pub fn empty() -> Self {
        Position {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            variant: None,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenRecord::STARTPOS).expect("STARTPOS is valid")
    }

    /// Parses a standalone position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let record = FenRecord::parse(fen)?;
        let mut position = Self::empty();
        position.build_from_placement(&record.placement);
        position.side_to_move = record.side_to_move;
        position.castling = record.castling;
        position.en_passant = record.en_passant;
        position.halfmove_clock = record.halfmove_clock;
        position.fullmove_number = record.fullmove_number;
        Ok(position)
    }

    /// Parses a position bound to `variant`.
    pub fn from_fen_with_variant(fen: &str, variant: Variant) -> Result<Self, FenError> {
        let mut position = Self::from_fen(fen)?;
        position.variant = Some(variant);
        Ok(position)
    }

    #[inline]
    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }

    /// The rules this position plays by.
    pub fn effective_rules(&self) -> &'static dyn RuleSet {
        self.variant.unwrap_or_default().rules()
    }

    /// Replaces all pieces with those described by a FEN placement field.
    ///
    /// Unknown characters are logged and skipped; they still occupy a column.
    pub fn build_from_placement(&mut self, placement: &str) {
        self.pieces.clear();
        for (rank_index, rank) in placement.split('/').enumerate() {
            let row = 7 - rank_index as i8;
            let mut col: i8 = 0;
            for c in rank.chars() {
                if let Some(empty) = c.to_digit(10) {
                    col += empty as i8;
                    continue;
                }
                if let Err(err) = self.create_piece(c, col, row) {
                    warn!(symbol = %c, col, row, error = %err, "skipping FEN placement character");
                }
                col += 1;
            }
        }
    }

    /// Replaces castling rights from a FEN castling field.
    pub fn set_castling_rights(&mut self, field: &str) -> Result<(), FenError> {
        self.castling = CastlingRights::from_fen_field(field)?;
        Ok(())
    }

    /// Places a piece given by its FEN symbol, replacing any occupant.
    pub fn create_piece(&mut self, symbol: char, col: i8, row: i8) -> Result<(), NotationError> {
        let square = Square::checked(col, row).ok_or(NotationError::InvalidCoordinate { col, row })?;
        let (kind, color) = PieceKind::from_fen_char(symbol)?;
        self.pieces.retain(|p| p.square != square);
        self.pieces.push(Piece::new(kind, color, square));
        Ok(())
    }

    /// Renders the FEN piece placement field.
    pub fn placement(&self) -> String {
        let mut board = [[None::<char>; 8]; 8];
        for piece in &self.pieces {
            board[piece.square.row() as usize][piece.square.col() as usize] = Some(piece.fen_char());
        }

        let mut ranks = Vec::with_capacity(8);
        for row in board.iter().rev() {
            let mut rank = String::new();
            let mut empty = 0;
            for cell in row {
                match cell {
                    Some(c) => {
                        if empty > 0 {
                            rank.push_str(&empty.to_string());
                            empty = 0;
                        }
                        rank.push(*c);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                rank.push_str(&empty.to_string());
            }
            ranks.push(rank);
        }
        ranks.join("/")
    }

    fn record(&self) -> FenRecord {
        FenRecord {
            placement: self.placement(),
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Converts the position to a full six-field FEN string.
    pub fn to_fen(&self) -> String {
        self.record().to_string()
    }

    /// The first four FEN fields, used as the repetition key.
    pub fn signature(&self) -> String {
        self.record().signature()
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    /// Color of the piece on `square`, if any.
    #[inline]
    pub fn occupant(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|p| p.color)
    }

    /// Returns true if any piece of `by` attacks `square`.
    pub fn is_attacked_by(&self, square: Square, by: Color) -> bool {
        self.pieces_of(by)
            .any(|p| p.attacked_squares(self).contains(&square))
    }

    /// Removes the piece on `square`.
    ///
    /// Losing a king, or a rook from its corner, revokes the matching
    /// castling rights.
    pub fn destroy_piece(&mut self, square: Square) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.square == square)?;
        let piece = self.pieces.swap_remove(index);
        match piece.kind {
            PieceKind::King => self.castling.revoke_all(piece.color),
            PieceKind::Rook => {
                for side in CastleSide::BOTH {
                    if square.row() == piece.color.home_row() as i8
                        && square.col() == side.rook_home_col()
                    {
                        self.castling.revoke(piece.color, side);
                    }
                }
            }
            _ => {}
        }
        Some(piece)
    }

    /// Pseudo-legal destinations of the piece on `from`.
    pub fn candidate_squares(&self, from: Square) -> Result<Vec<Square>, PositionError> {
        let piece = self.piece_at(from).ok_or(PositionError::PieceNotFound(from))?;
        Ok(piece.candidate_squares(self))
    }

    /// Legal moves of the piece on `from`, castling included for kings.
    ///
    /// Each candidate is tried on a clone; it is kept when the clone's rules
    /// accept the resulting board.
    pub fn legal_moves(&self, from: Square) -> Result<Vec<Move>, PositionError> {
        let piece = *self.piece_at(from).ok_or(PositionError::PieceNotFound(from))?;
        let mut moves: Vec<Move> = piece
            .candidate_squares(self)
            .into_iter()
            .filter(|to| self.is_legal_probe(from, *to))
            .map(|to| Move::new(from, to))
            .collect();

        if piece.kind == PieceKind::King {
            let rules = self.effective_rules();
            for side in CastleSide::BOTH {
                let mut probe = self.clone();
                if rules.castle(&mut probe, piece.color, side).is_ok() {
                    moves.push(Move::Castle(side));
                }
            }
        }
        Ok(moves)
    }

    /// Returns true if moving `from` to `to` yields a board the rules accept.
    pub fn is_legal_probe(&self, from: Square, to: Square) -> bool {
        let Some(mover) = self.occupant(from) else {
            return false;
        };
        let mut probe = self.clone();
        if probe.move_piece(from, to, None).is_err() {
            return false;
        }
        probe.side_to_move = mover.opposite();
        !self.effective_rules().is_illegal_board_state(&probe)
    }

    /// Moves the piece on `from` to `to` if `to` is one of its candidate squares.
    ///
    /// Handles captures (through the rules), en passant, promotion, and the
    /// halfmove clock reset for pawn moves. Does not check king safety or turn.
    pub fn move_piece(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<char>,
    ) -> Result<MoveOutcome, PositionError> {
        let piece = *self.piece_at(from).ok_or(PositionError::PieceNotFound(from))?;
        if !piece.candidate_squares(self).contains(&to) {
            return Err(PositionError::IllegalPieceMove {
                kind: piece.kind,
                from,
                to,
            });
        }
        Ok(self.relocate(piece, to, promotion))
    }

    /// Moves the piece on `from` to `to` without consulting its geometry.
    pub fn command_move_piece(&mut self, from: Square, to: Square) -> Result<MoveOutcome, PositionError> {
        let piece = *self.piece_at(from).ok_or(PositionError::PieceNotFound(from))?;
        Ok(self.relocate(piece, to, None))
    }

    fn relocate(&mut self, piece: Piece, to: Square, promotion: Option<char>) -> MoveOutcome {
        let from = piece.square;
        let previous_en_passant = self.en_passant.take();
        let mut outcome = MoveOutcome::default();

        if self.piece_at(to).is_some() {
            self.capture(from, to);
            outcome.captured = true;
        } else if piece.kind == PieceKind::Pawn
            && previous_en_passant == Some(to)
            && to.col() != from.col()
        {
            // The victim sits beside the attacker, one rank behind the target.
            if let Some(victim) = Square::checked(to.col(), from.row()) {
                if self.piece_at(victim).is_some() {
                    self.capture(from, victim);
                    outcome.captured = true;
                }
            }
        }

        // The attacker may have been destroyed by its own capture.
        let Some(moving) = self.pieces.iter_mut().find(|p| p.square == from) else {
            return outcome;
        };
        moving.square = to;
        moving.has_moved = true;

        match piece.kind {
            PieceKind::Pawn => {
                self.halfmove_clock = 0;
                if (to.row() - from.row()).abs() == 2 {
                    self.en_passant = Square::checked(to.col(), from.row() + piece.color.pawn_direction());
                }
                if to.row() == piece.color.promotion_row() as i8 {
                    outcome.promoted = self.request_promotion(to, promotion);
                }
            }
            PieceKind::King if !piece.has_moved => self.castling.revoke_all(piece.color),
            PieceKind::Rook if !piece.has_moved => {
                let rules = self.effective_rules();
                for side in CastleSide::BOTH {
                    if rules.initial_rook_square(piece.color, side) == Some(from) {
                        self.castling.revoke(piece.color, side);
                    }
                }
            }
            _ => {}
        }
        outcome
    }

    /// Captures the piece on `victim` using the active rules.
    pub fn capture(&mut self, attacker: Square, victim: Square) {
        let rules = self.effective_rules();
        rules.capture(self, attacker, victim);
        self.halfmove_clock = 0;
    }

    /// Replaces the pawn on `square` with the chosen piece (a queen by default).
    ///
    /// An unusable choice is logged and leaves the pawn in place.
    pub fn request_promotion(&mut self, square: Square, choice: Option<char>) -> Option<PieceKind> {
        let symbol = choice.unwrap_or('q');
        let kind = match PieceKind::from_letter(symbol) {
            Ok(kind) if kind.is_promotion_target() => kind,
            _ => {
                warn!(%square, symbol = %symbol, "invalid promotion choice, pawn not promoted");
                return None;
            }
        };
        let pawn = self.destroy_piece(square)?;
        self.pieces.push(Piece {
            kind,
            color: pawn.color,
            square,
            has_moved: true,
        });
        Some(kind)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    #[test]
    fn startpos_fen_roundtrip() {
        assert_eq!(Position::startpos().to_fen(), FenRecord::STARTPOS);
        assert_eq!(Position::startpos().pieces().len(), 32);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
    }

    #[test]
    fn lenient_placement_skips_bad_characters() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/3XK3 w - - 0 1").unwrap();
        assert!(position.piece_at(sq("d1")).is_none());
        assert_eq!(position.piece_at(sq("e1")).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(position.placement(), "4k3/8/8/8/8/8/8/4K3");
    }

    #[test]
    fn create_piece_rejects_bad_input() {
        let mut position = Position::empty();
        assert_eq!(
            position.create_piece('Q', 8, 0),
            Err(NotationError::InvalidCoordinate { col: 8, row: 0 })
        );
        assert_eq!(
            position.create_piece('x', 0, 0),
            Err(NotationError::InvalidPieceType('x'))
        );
        position.create_piece('Q', 0, 0).unwrap();
        position.create_piece('n', 0, 0).unwrap();
        assert_eq!(position.pieces().len(), 1);
        assert_eq!(position.piece_at(Square::A1).map(|p| p.fen_char()), Some('n'));
    }

    #[test]
    fn set_castling_rights_validates() {
        let mut position = Position::empty();
        position.set_castling_rights("Kq").unwrap();
        assert_eq!(position.castling.to_fen_field(), "Kq");
        assert!(position.set_castling_rights("Kx").is_err());
    }

    #[test]
    fn move_piece_rejects_geometry() {
        let mut position = Position::startpos();
        assert_eq!(
            position.move_piece(sq("e2"), sq("e5"), None),
            Err(PositionError::IllegalPieceMove {
                kind: PieceKind::Pawn,
                from: sq("e2"),
                to: sq("e5"),
            })
        );
        assert_eq!(
            position.move_piece(sq("e4"), sq("e5"), None),
            Err(PositionError::PieceNotFound(sq("e4")))
        );
    }

    #[test]
    fn double_push_sets_en_passant() {
        let mut position = Position::startpos();
        position.halfmove_clock = 7;
        position.move_piece(sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(position.en_passant, Some(sq("e3")));
        assert_eq!(position.halfmove_clock, 0);

        position.move_piece(sq("g8"), sq("f6"), None).unwrap();
        assert_eq!(position.en_passant, None);
    }

    #[test]
    fn en_passant_removes_bypassed_pawn() {
        let mut position = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let outcome = position.move_piece(sq("e5"), sq("d6"), None).unwrap();
        assert!(outcome.captured);
        assert!(position.piece_at(sq("d5")).is_none());
        assert_eq!(position.placement(), "4k3/8/3P4/8/8/8/8/4K3");
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mut position = Position::from_fen("8/P7/8/8/8/8/8/4K1k1 w - - 0 1").unwrap();
        let outcome = position.move_piece(sq("a7"), sq("a8"), None).unwrap();
        assert_eq!(outcome.promoted, Some(PieceKind::Queen));
        let queen = position.piece_at(Square::A8).copied().unwrap();
        assert_eq!(queen.fen_char(), 'Q');
        assert!(queen.has_moved);
    }

    #[test]
    fn promotion_choice_and_invalid_choice() {
        let mut position = Position::from_fen("8/P7/8/8/8/8/8/4K1k1 w - - 0 1").unwrap();
        position.move_piece(sq("a7"), sq("a8"), Some('n')).unwrap();
        assert_eq!(position.piece_at(Square::A8).map(|p| p.fen_char()), Some('N'));

        let mut position = Position::from_fen("8/P7/8/8/8/8/8/4K1k1 w - - 0 1").unwrap();
        let outcome = position.move_piece(sq("a7"), sq("a8"), Some('x')).unwrap();
        assert_eq!(outcome.promoted, None);
        assert_eq!(position.piece_at(Square::A8).map(|p| p.fen_char()), Some('P'));
    }

    #[test]
    fn king_and_rook_moves_revoke_rights() {
        let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        position.move_piece(Square::H1, sq("h5"), None).unwrap();
        assert_eq!(position.castling.to_fen_field(), "Qkq");
        position.move_piece(Square::E8, sq("d8"), None).unwrap();
        assert_eq!(position.castling.to_fen_field(), "Q");
    }

    #[test]
    fn destroying_corner_rook_revokes_right() {
        let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        position.destroy_piece(Square::A8);
        assert_eq!(position.castling.to_fen_field(), "KQk");
        position.destroy_piece(Square::E1);
        assert_eq!(position.castling.to_fen_field(), "k");
    }

    #[test]
    fn legal_moves_exclude_pinned_piece() {
        let position = Position::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert!(position.legal_moves(sq("e2")).unwrap().is_empty());
        assert_eq!(position.legal_moves(sq("e1")).unwrap().len(), 4);
    }

    #[test]
    fn legal_moves_include_castling() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = position.legal_moves(Square::E1).unwrap();
        assert!(moves.contains(&Move::Castle(CastleSide::King)));
        assert!(moves.contains(&Move::Castle(CastleSide::Queen)));
    }

    #[test]
    fn attacks_use_pawn_diagonals() {
        let position = Position::from_fen("4k3/8/8/8/8/8/4p3/4K3 w - - 0 1").unwrap();
        assert!(position.is_attacked_by(sq("d1"), Color::Black));
        assert!(position.is_attacked_by(sq("f1"), Color::Black));
        assert!(!position.is_attacked_by(sq("e1"), Color::Black));
    }

    #[test]
    fn clones_keep_variant() {
        let position =
            Position::from_fen_with_variant(FenRecord::STARTPOS, Variant::Atomic).unwrap();
        assert_eq!(position.clone().variant(), Some(Variant::Atomic));
        assert_eq!(Position::startpos().variant(), None);
    }
}

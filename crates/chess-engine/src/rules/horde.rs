//! Horde: a king-less wall of White pawns against a normal Black army.

use chess_core::{CastleSide, Color, Square};

use super::standard;
use super::{EndReason, RuleSet, Variant, Verdict};
use crate::{movegen, MoveOutcome, Piece, Position, PositionError, RepetitionTable};

/// Horde chess.
///
/// White has no king: it is never in check and never castles. Black wins by
/// removing every White piece; White wins by mating Black as usual.
#[derive(Debug, Clone, Copy, Default)]
pub struct HordeChess;

impl RuleSet for HordeChess {
    fn variant(&self) -> Variant {
        Variant::Horde
    }

    fn capture(&self, position: &mut Position, attacker: Square, victim: Square) {
        standard::capture(position, attacker, victim);
    }

    fn is_in_check(&self, player: Color, position: &Position) -> bool {
        match player {
            Color::White => false,
            Color::Black => standard::is_in_check(self, player, position),
        }
    }

    fn can_castle(&self, position: &Position, player: Color, side: CastleSide) -> bool {
        match player {
            Color::White => false,
            Color::Black => standard::can_castle(self, position, player, side),
        }
    }

    fn castle(
        &self,
        position: &mut Position,
        player: Color,
        side: CastleSide,
    ) -> Result<MoveOutcome, PositionError> {
        standard::castle(self, position, player, side)
    }

    fn is_illegal_board_state(&self, position: &Position) -> bool {
        standard::leaves_mover_in_check(self, position)
    }

    fn assess_board_state(&self, position: &Position, visits: &RepetitionTable) -> Option<Verdict> {
        if let Some(verdict) = standard::draw_by_rule(position, visits) {
            return Some(verdict);
        }
        if position.pieces_of(Color::White).next().is_none() {
            return Some(Verdict::win(Color::Black, EndReason::HordeEliminated));
        }
        if movegen::has_legal_move(position) {
            return None;
        }
        // White is never in check, so a stuck White side is always a draw.
        Some(standard::no_move_verdict(self, position))
    }

    fn get_king(&self, position: &Position, player: Color) -> Result<Square, PositionError> {
        standard::get_king(position, player)
    }

    fn get_castling_rook<'a>(
        &self,
        position: &'a Position,
        player: Color,
        side: CastleSide,
    ) -> Option<&'a Piece> {
        match player {
            Color::White => None,
            Color::Black => standard::get_castling_rook(self, position, player, side),
        }
    }

    fn initial_rook_square(&self, player: Color, side: CastleSide) -> Option<Square> {
        match player {
            Color::White => None,
            Color::Black => standard::initial_rook_square(player, side),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::FenRecord;

    fn horde(fen: &str) -> Position {
        Position::from_fen_with_variant(fen, Variant::Horde).unwrap()
    }

    #[test]
    fn white_is_never_in_check() {
        let p = horde("4k3/8/8/8/8/8/8/q3K3 w - - 0 1");
        assert!(!HordeChess.is_in_check(Color::White, &p));
        assert!(!HordeChess.is_illegal_board_state(&p));
    }

    #[test]
    fn white_never_castles() {
        let p = horde("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        for side in CastleSide::BOTH {
            assert!(!HordeChess.can_castle(&p, Color::White, side));
            assert!(HordeChess.can_castle(&p, Color::Black, side));
            assert!(HordeChess.get_castling_rook(&p, Color::White, side).is_none());
            assert!(HordeChess.initial_rook_square(Color::White, side).is_none());
        }
    }

    #[test]
    fn start_position_is_playable() {
        let p = horde(FenRecord::HORDE_STARTPOS);
        assert_eq!(p.pieces_of(Color::White).count(), 36);
        assert_eq!(
            HordeChess.assess_board_state(&p, &RepetitionTable::default()),
            None
        );
    }

    #[test]
    fn eliminated_horde_loses() {
        let p = horde("4k3/8/8/8/8/8/8/8 w - - 0 1");
        assert_eq!(
            HordeChess.assess_board_state(&p, &RepetitionTable::default()),
            Some(Verdict::win(Color::Black, EndReason::HordeEliminated))
        );
    }

    #[test]
    fn stuck_horde_is_a_draw() {
        let p = horde("6k1/8/8/p7/P7/8/8/8 w - - 0 2");
        assert_eq!(
            HordeChess.assess_board_state(&p, &RepetitionTable::default()),
            Some(Verdict::draw(EndReason::Stalemate))
        );
    }
}

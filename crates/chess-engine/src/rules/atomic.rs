//! Atomic chess: every capture explodes.

use chess_core::{CastleSide, Color, PieceKind, Square, Vector};

use super::standard::{self, find_king};
use super::{EndReason, RuleSet, Variant, Verdict};
use crate::{MoveOutcome, Piece, Position, PositionError, RepetitionTable};

/// Atomic chess.
///
/// A capture removes the captured piece, the capturing piece, and every
/// non-pawn piece on the eight squares around the capture square. Adjacent
/// kings cannot be exploded by a capture, so neither side is in check while
/// the kings touch.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicChess;

impl RuleSet for AtomicChess {
    fn variant(&self) -> Variant {
        Variant::Atomic
    }

    fn capture(&self, position: &mut Position, attacker: Square, victim: Square) {
        position.destroy_piece(victim);
        position.destroy_piece(attacker);
        for direction in Vector::ALL_DIRECTIONS {
            let Some(square) = victim.offset(direction) else {
                continue;
            };
            if position
                .piece_at(square)
                .is_some_and(|p| p.kind != PieceKind::Pawn)
            {
                position.destroy_piece(square);
            }
        }
    }

    /// Kings never capture, so only the other pieces give check, and touching
    /// kings cancel it.
    fn is_in_check(&self, player: Color, position: &Position) -> bool {
        let Some(king) = find_king(self, position, player) else {
            return false;
        };
        let other = find_king(self, position, player.opposite());
        if other.is_some_and(|other| kings_adjacent(king, other)) {
            return false;
        }
        position
            .pieces_of(player.opposite())
            .filter(|p| p.kind != PieceKind::King)
            .any(|p| p.candidate_squares(position).contains(&king))
    }

    fn can_castle(&self, position: &Position, player: Color, side: CastleSide) -> bool {
        standard::can_castle_through(self, position, player, side, |s| {
            position
                .pieces_of(player.opposite())
                .filter(|p| p.kind != PieceKind::King)
                .any(|p| p.attacked_squares(position).contains(&s))
        })
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
        let mover = position.side_to_move.opposite();
        let mover_king = find_king(self, position, mover);
        let other_king = find_king(self, position, position.side_to_move);

        if let (Some(a), Some(b)) = (mover_king, other_king) {
            if kings_adjacent(a, b) {
                return false;
            }
        }
        if mover_king.is_none() {
            return true;
        }
        if other_king.is_none() {
            return false;
        }
        standard::leaves_mover_in_check(self, position)
    }

    fn assess_board_state(&self, position: &Position, visits: &RepetitionTable) -> Option<Verdict> {
        if let Some(verdict) = standard::draw_by_rule(position, visits) {
            return Some(verdict);
        }
        let side = position.side_to_move;
        if find_king(self, position, side).is_none() {
            return Some(Verdict::win(side.opposite(), EndReason::KingExploded));
        }
        standard::assess_board_state(self, position, visits)
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
        standard::get_castling_rook(self, position, player, side)
    }

    fn initial_rook_square(&self, player: Color, side: CastleSide) -> Option<Square> {
        standard::initial_rook_square(player, side)
    }
}

fn kings_adjacent(a: Square, b: Square) -> bool {
    (a.col() - b.col()).abs() <= 1 && (a.row() - b.row()).abs() <= 1
}

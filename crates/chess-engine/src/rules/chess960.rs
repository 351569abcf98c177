//! Chess960 (Fischer random).

use chess_core::{CastleSide, Color, Square};

use super::standard;
use super::{RuleSet, Variant, Verdict};
use crate::{MoveOutcome, Piece, Position, PositionError, RepetitionTable};

// TODO: castle from shuffled back ranks once rook origins come from the starting FEN.
/// Chess960.
///
/// Plays exactly like standard chess over a caller-supplied start position.
/// Castling still expects the king on the e-file and the rooks in the corners.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chess960;

impl RuleSet for Chess960 {
    fn variant(&self) -> Variant {
        Variant::Chess960
    }

    fn capture(&self, position: &mut Position, attacker: Square, victim: Square) {
        standard::capture(position, attacker, victim);
    }

    fn is_in_check(&self, player: Color, position: &Position) -> bool {
        standard::is_in_check(self, player, position)
    }

    fn can_castle(&self, position: &Position, player: Color, side: CastleSide) -> bool {
        standard::can_castle(self, position, player, side)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::StandardChess;

    #[test]
    fn behaves_like_standard() {
        let p = Position::from_fen_with_variant(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            Variant::Chess960,
        )
        .unwrap();
        for side in CastleSide::BOTH {
            assert_eq!(
                Chess960.can_castle(&p, Color::White, side),
                StandardChess.can_castle(&p, Color::White, side)
            );
        }
        assert_eq!(
            Chess960.get_king(&p, Color::Black),
            StandardChess.get_king(&p, Color::Black)
        );
    }
}

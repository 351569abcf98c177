//! Standard chess rules, and the shared behaviour other variants build on.

use chess_core::{intermediate_squares, CastleSide, Color, PieceKind, Square, Vector};
use tracing::trace;

use super::{EndReason, RuleSet, Variant, Verdict};
use crate::{movegen, MoveOutcome, Piece, Position, PositionError, RepetitionTable};

/// Standard chess rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn variant(&self) -> Variant {
        Variant::Standard
    }

    fn capture(&self, position: &mut Position, attacker: Square, victim: Square) {
        capture(position, attacker, victim);
    }

    fn is_in_check(&self, player: Color, position: &Position) -> bool {
        is_in_check(self, player, position)
    }

    fn can_castle(&self, position: &Position, player: Color, side: CastleSide) -> bool {
        can_castle(self, position, player, side)
    }

    fn castle(
        &self,
        position: &mut Position,
        player: Color,
        side: CastleSide,
    ) -> Result<MoveOutcome, PositionError> {
        castle(self, position, player, side)
    }

    fn is_illegal_board_state(&self, position: &Position) -> bool {
        leaves_mover_in_check(self, position)
    }

    fn assess_board_state(&self, position: &Position, visits: &RepetitionTable) -> Option<Verdict> {
        assess_board_state(self, position, visits)
    }

    fn get_king(&self, position: &Position, player: Color) -> Result<Square, PositionError> {
        get_king(position, player)
    }

    fn get_castling_rook<'a>(
        &self,
        position: &'a Position,
        player: Color,
        side: CastleSide,
    ) -> Option<&'a Piece> {
        get_castling_rook(self, position, player, side)
    }

    fn initial_rook_square(&self, player: Color, side: CastleSide) -> Option<Square> {
        initial_rook_square(player, side)
    }
}

/// Removes the captured piece only.
pub fn capture(position: &mut Position, _attacker: Square, victim: Square) {
    position.destroy_piece(victim);
}

/// A player is in check when any opposing piece can move onto one of its kings.
/// A player without a king is never in check.
pub fn is_in_check(_rules: &dyn RuleSet, player: Color, position: &Position) -> bool {
    let kings: Vec<Square> = position
        .pieces_of(player)
        .filter(|p| p.kind == PieceKind::King)
        .map(|p| p.square)
        .collect();
    if kings.is_empty() {
        return false;
    }
    position
        .pieces_of(player.opposite())
        .any(|p| p.candidate_squares(position).iter().any(|s| kings.contains(s)))
}

/// Castling requires the right, an unmoved king on its home square, an unmoved
/// castling rook, no check, and every square strictly between king and rook
/// empty and unattacked.
pub fn can_castle(rules: &dyn RuleSet, position: &Position, player: Color, side: CastleSide) -> bool {
    can_castle_through(rules, position, player, side, |s| {
        position.is_attacked_by(s, player.opposite())
    })
}

/// [`can_castle`] with the attack test on the king's path supplied by the caller.
pub fn can_castle_through<F>(
    rules: &dyn RuleSet,
    position: &Position,
    player: Color,
    side: CastleSide,
    attacked: F,
) -> bool
where
    F: Fn(Square) -> bool,
{
    if !position.castling.has(player, side) {
        return false;
    }
    let Some(king_home) = Square::checked(4, player.home_row() as i8) else {
        return false;
    };
    let king_ready = position
        .piece_at(king_home)
        .is_some_and(|k| k.kind == PieceKind::King && k.color == player && !k.has_moved);
    if !king_ready {
        return false;
    }
    let Some(rook) = rules.get_castling_rook(position, player, side) else {
        return false;
    };
    if rook.has_moved || rules.is_in_check(player, position) {
        return false;
    }

    let step = match side {
        CastleSide::King => Vector::new(1, 0),
        CastleSide::Queen => Vector::new(-1, 0),
    };
    intermediate_squares(king_home, step, rook.square)
        .into_iter()
        .all(|s| position.piece_at(s).is_none() && !attacked(s))
}

/// Moves king and rook to their castled squares and revokes both rights.
pub fn castle(
    rules: &dyn RuleSet,
    position: &mut Position,
    player: Color,
    side: CastleSide,
) -> Result<MoveOutcome, PositionError> {
    let rook_from = match rules.get_castling_rook(position, player, side) {
        Some(rook) if rules.can_castle(position, player, side) => rook.square,
        _ => return Err(PositionError::IllegalCastling { color: player, side }),
    };
    let row = player.home_row() as i8;
    let king_from = Square::from_coords(4, row)?;
    let king_to = Square::from_coords(side.king_target_col(), row)?;
    let rook_to = Square::from_coords(side.rook_target_col(), row)?;

    let outcome = position.command_move_piece(king_from, king_to)?;
    position.command_move_piece(rook_from, rook_to)?;
    position.castling.revoke_all(player);
    Ok(outcome)
}

/// The position is illegal when the player who just moved is in check.
pub fn leaves_mover_in_check(rules: &dyn RuleSet, position: &Position) -> bool {
    rules.is_in_check(position.side_to_move.opposite(), position)
}

/// Draws that do not depend on the pieces: the fifty-move rule and threefold
/// repetition.
pub fn draw_by_rule(position: &Position, visits: &RepetitionTable) -> Option<Verdict> {
    if position.halfmove_clock >= 100 {
        return Some(Verdict::draw(EndReason::FiftyMoveRule));
    }
    if visits.has_threefold_repetition() {
        return Some(Verdict::draw(EndReason::ThreefoldRepetition));
    }
    None
}

/// Outcome when the side to move has no legal move: mate if in check,
/// otherwise stalemate.
pub fn no_move_verdict(rules: &dyn RuleSet, position: &Position) -> Verdict {
    let side = position.side_to_move;
    if rules.is_in_check(side, position) {
        Verdict::win(side.opposite(), EndReason::Checkmate)
    } else {
        Verdict::draw(EndReason::Stalemate)
    }
}

pub fn assess_board_state(
    rules: &dyn RuleSet,
    position: &Position,
    visits: &RepetitionTable,
) -> Option<Verdict> {
    draw_by_rule(position, visits).or_else(|| {
        if movegen::has_legal_move(position) {
            None
        } else {
            Some(no_move_verdict(rules, position))
        }
    })
}

pub fn get_king(position: &Position, player: Color) -> Result<Square, PositionError> {
    position
        .pieces_of(player)
        .find(|p| p.kind == PieceKind::King)
        .map(|p| p.square)
        .ok_or(PositionError::KingNotFound(player))
}

/// Like [`RuleSet::get_king`], but a missing king is a normal answer.
pub fn find_king(rules: &dyn RuleSet, position: &Position, player: Color) -> Option<Square> {
    match rules.get_king(position, player) {
        Ok(square) => Some(square),
        Err(err) => {
            trace!(%err, "king lookup");
            None
        }
    }
}

pub fn get_castling_rook<'a>(
    rules: &dyn RuleSet,
    position: &'a Position,
    player: Color,
    side: CastleSide,
) -> Option<&'a Piece> {
    rules
        .initial_rook_square(player, side)
        .and_then(|square| position.piece_at(square))
        .filter(|p| p.kind == PieceKind::Rook && p.color == player)
}

/// Rooks start in the corners of the home rank.
pub fn initial_rook_square(player: Color, side: CastleSide) -> Option<Square> {
    Square::checked(side.rook_home_col(), player.home_row() as i8)
}

//! Move enumeration for the side to move.
//!
//! Legality is decided per move by simulating it on a clone and asking the
//! position's rules whether the result is acceptable.

pub mod perft;

pub use perft::{perft, perft_divide};

use chess_core::{Color, Move};

use crate::{MoveOutcome, Position, PositionError};

/// All legal moves of the side to move, castling included.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::new();
    for piece in position.pieces_of(position.side_to_move) {
        let Ok(piece_moves) = position.legal_moves(piece.square) else {
            continue;
        };
        for m in piece_moves {
            if !moves.contains(&m) {
                moves.push(m);
            }
        }
    }
    moves
}

/// Returns true if the side to move has at least one legal move.
///
/// Castling is not tried: whenever castling is legal, so is the king's step
/// towards the rook.
pub fn has_legal_move(position: &Position) -> bool {
    position.pieces_of(position.side_to_move).any(|piece| {
        piece
            .candidate_squares(position)
            .into_iter()
            .any(|to| position.is_legal_probe(piece.square, to))
    })
}

/// Plays `m` for the side to move on a copy of `position`.
///
/// Advances the clocks and flips the side to move, but does not check
/// whether the result is legal for the mover.
pub fn apply_move(
    position: &Position,
    m: Move,
    promotion: Option<char>,
) -> Result<(Position, MoveOutcome), PositionError> {
    let mut next = position.clone();
    let mover = next.side_to_move;
    next.halfmove_clock += 1;
    let outcome = match m {
        Move::Piece { from, to } => next.move_piece(from, to, promotion)?,
        Move::Castle(side) => {
            let rules = next.effective_rules();
            rules.castle(&mut next, mover, side)?
        }
    };
    if mover == Color::Black {
        next.fullmove_number += 1;
    }
    next.side_to_move = mover.opposite();
    Ok((next, outcome))
}

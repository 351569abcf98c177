//! Pieces on the board and their move geometry.

use chess_core::{ray_walk, Color, PieceKind, Square, Vector};

use crate::Position;

/// A live piece: its kind, owner and square.
///
/// `has_moved` gates castling for kings and rooks. Pieces created from FEN
/// start unmoved; promoted pieces are created as already moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }

    /// Pseudo-legal destinations.
    ///
    /// These follow the piece's geometry and never land on an allied piece,
    /// but may leave the owner's king attacked. Castling is not included.
    pub fn candidate_squares(&self, position: &Position) -> Vec<Square> {
        match self.kind {
            PieceKind::King => self.step_squares(position, &Vector::ALL_DIRECTIONS),
            PieceKind::Knight => self.step_squares(position, &Vector::KNIGHT_JUMPS),
            PieceKind::Queen => self.slide_squares(position, &Vector::ALL_DIRECTIONS),
            PieceKind::Rook => self.slide_squares(position, &Vector::ORTHOGONAL),
            PieceKind::Bishop => self.slide_squares(position, &Vector::DIAGONAL),
            PieceKind::Pawn => self.pawn_squares(position),
        }
    }

    /// Squares this piece attacks.
    ///
    /// Same as [`candidate_squares`](Self::candidate_squares) except for pawns,
    /// which attack both forward diagonals whether or not anything stands there
    /// and never attack with a push.
    pub fn attacked_squares(&self, position: &Position) -> Vec<Square> {
        match self.kind {
            PieceKind::Pawn => self.pawn_diagonals().collect(),
            _ => self.candidate_squares(position),
        }
    }

    fn step_squares(&self, position: &Position, vectors: &[Vector]) -> Vec<Square> {
        vectors
            .iter()
            .filter_map(|v| self.square.offset(*v))
            .filter(|s| position.occupant(*s) != Some(self.color))
            .collect()
    }

    fn slide_squares(&self, position: &Position, directions: &[Vector]) -> Vec<Square> {
        let mut squares = Vec::new();
        for direction in directions {
            ray_walk(
                self.square,
                *direction,
                |s| position.occupant(s),
                self.color,
                &mut squares,
            );
        }
        squares
    }

    fn pawn_diagonals(&self) -> impl Iterator<Item = Square> + '_ {
        let dir = self.color.pawn_direction();
        [-1, 1]
            .into_iter()
            .filter_map(move |dc| self.square.offset(Vector::new(dc, dir)))
    }

    fn pawn_squares(&self, position: &Position) -> Vec<Square> {
        let dir = self.color.pawn_direction();
        let mut squares = Vec::with_capacity(4);

        if let Some(single) = self.square.offset(Vector::new(0, dir)) {
            if position.piece_at(single).is_none() {
                squares.push(single);
                if self.square.row() == self.color.pawn_start_row() as i8 {
                    if let Some(double) = self.square.offset(Vector::new(0, 2 * dir)) {
                        if position.piece_at(double).is_none() {
                            squares.push(double);
                        }
                    }
                }
            }
        }

        // The en passant target is only capturable by the side that did not create it.
        let en_passant = position
            .en_passant
            .filter(|ep| ep.row() == self.color.opposite().pawn_start_row() as i8 - dir);
        for diagonal in self.pawn_diagonals() {
            let enemy = position.occupant(diagonal) == Some(self.color.opposite());
            if enemy || en_passant == Some(diagonal) {
                squares.push(diagonal);
            }
        }

        squares
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    fn candidates(fen: &str, from: &str) -> Vec<String> {
        let position = Position::from_fen(fen).unwrap();
        let piece = position.piece_at(sq(from)).copied().unwrap();
        let mut names: Vec<String> = piece
            .candidate_squares(&position)
            .into_iter()
            .map(Square::name)
            .collect();
        names.sort();
        names
    }

    #[test]
    fn knight_from_start() {
        assert_eq!(
            candidates(chess_core::FenRecord::STARTPOS, "g1"),
            vec!["f3", "h3"]
        );
    }

    #[test]
    fn king_excludes_allied_squares() {
        assert_eq!(
            candidates("4k3/8/8/8/8/8/3PP3/3QK3 w - - 0 1", "e1"),
            vec!["f1", "f2"]
        );
    }

    #[test]
    fn rook_stops_at_pieces() {
        assert_eq!(
            candidates("4k3/8/8/8/p7/8/8/R1N1K3 w - - 0 1", "a1"),
            vec!["a2", "a3", "a4", "b1"]
        );
    }

    #[test]
    fn bishop_and_queen_rays() {
        assert_eq!(candidates("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1", "c1").len(), 7);
        assert_eq!(candidates("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1", "d4").len(), 27);
    }

    #[test]
    fn pawn_pushes_and_captures() {
        assert_eq!(
            candidates("4k3/8/8/8/8/3p4/4P3/4K3 w - - 0 1", "e2"),
            vec!["d3", "e3", "e4"]
        );
        // Blocked single push also blocks the double push.
        assert_eq!(
            candidates("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2"),
            Vec::<String>::new()
        );
        assert_eq!(
            candidates("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1", "e7"),
            vec!["e5", "e6"]
        );
    }

    #[test]
    fn pawn_en_passant_target() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2";
        assert_eq!(candidates(fen, "e5"), vec!["d6", "e6"]);
    }

    #[test]
    fn pawn_attacks_empty_diagonals() {
        let position = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let pawn = position.piece_at(sq("e2")).copied().unwrap();
        let mut attacked = pawn.attacked_squares(&position);
        attacked.sort();
        assert_eq!(attacked, vec![sq("d3"), sq("f3")]);
    }
}

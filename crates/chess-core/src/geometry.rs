//! Board vectors and the ray helpers shared by sliding pieces and castling.

use crate::{Color, Square};

/// A step on the board, in columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub dc: i8,
    pub dr: i8,
}

impl Vector {
    #[inline]
    pub const fn new(dc: i8, dr: i8) -> Self {
        Vector { dc, dr }
    }

    /// Rook directions.
    pub const ORTHOGONAL: [Vector; 4] = [
        Vector::new(0, 1),
        Vector::new(1, 0),
        Vector::new(0, -1),
        Vector::new(-1, 0),
    ];

    /// Bishop directions.
    pub const DIAGONAL: [Vector; 4] = [
        Vector::new(1, 1),
        Vector::new(1, -1),
        Vector::new(-1, -1),
        Vector::new(-1, 1),
    ];

    /// Queen and king directions.
    pub const ALL_DIRECTIONS: [Vector; 8] = [
        Vector::new(0, 1),
        Vector::new(1, 1),
        Vector::new(1, 0),
        Vector::new(1, -1),
        Vector::new(0, -1),
        Vector::new(-1, -1),
        Vector::new(-1, 0),
        Vector::new(-1, 1),
    ];

    /// Knight jumps.
    pub const KNIGHT_JUMPS: [Vector; 8] = [
        Vector::new(1, 2),
        Vector::new(2, 1),
        Vector::new(2, -1),
        Vector::new(1, -2),
        Vector::new(-1, -2),
        Vector::new(-2, -1),
        Vector::new(-2, 1),
        Vector::new(-1, 2),
    ];
}

impl std::ops::Add<Vector> for Square {
    type Output = Option<Square>;

    fn add(self, rhs: Vector) -> Option<Square> {
        self.offset(rhs)
    }
}

/// Walks from `origin` (excluded) along `vector`, pushing every reachable square.
///
/// `occupant` reports the owner of the piece on a square, if any. The walk stops
/// at the board edge or at the first occupied square; that square is pushed only
/// when it holds a piece not owned by `owner`.
pub fn ray_walk<F>(origin: Square, vector: Vector, occupant: F, owner: Color, into: &mut Vec<Square>)
where
    F: Fn(Square) -> Option<Color>,
{
    let mut current = origin;
    while let Some(next) = current.offset(vector) {
        match occupant(next) {
            None => into.push(next),
            Some(color) => {
                if color != owner {
                    into.push(next);
                }
                return;
            }
        }
        current = next;
    }
}

/// Squares strictly between `from` and `to` when stepping along `vector`.
///
/// Gives up after eight steps, which covers any straight line on the board.
pub fn intermediate_squares(from: Square, vector: Vector, to: Square) -> Vec<Square> {
    let mut squares = Vec::new();
    let mut current = from;
    for _ in 0..8 {
        match current.offset(vector) {
            Some(next) if next == to => break,
            Some(next) => {
                squares.push(next);
                current = next;
            }
            None => break,
        }
    }
    squares
}

//! Standard Algebraic Notation (SAN) parsing and generation.
//!
//! SAN is the standard way to record chess moves in human-readable form.
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1"

use chess_core::{file_index, rank_index, CastleSide, Color, Move, NotationError, PieceKind, Square, Vector};
use thiserror::Error;

use crate::rules::{GameState, RuleSet};
use crate::{movegen, Piece, Position, RepetitionTable};

/// Error type for SAN parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanError {
    #[error("empty SAN string")]
    Empty,

    #[error("invalid SAN format: {0}")]
    InvalidFormat(String),

    #[error("no legal move matches: {0}")]
    NoMatchingMove(String),

    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// A SAN token resolved against a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedSan {
    pub mv: Move,
    /// Promotion letter as written, if any.
    pub promotion: Option<char>,
}

/// Converts a move to SAN notation given the current position.
///
/// The position must be the state BEFORE the move is made, and the move
/// must be legal in it. The check (`+`) or mate (`#`) suffix is included.
pub fn move_to_san(position: &Position, m: Move, promotion: Option<char>) -> String {
    let Ok((after, outcome)) = movegen::apply_move(position, m, promotion) else {
        return m.to_string();
    };

    let mut san = match m {
        Move::Castle(side) => side.token().to_string(),
        Move::Piece { from, to } => {
            let Some(piece) = position.piece_at(from) else {
                return m.to_string();
            };
            let mut san = String::new();
            if piece.kind == PieceKind::Pawn {
                if outcome.captured {
                    san.push(from.file_char());
                    san.push('x');
                }
            } else {
                san.push(piece.kind.letter());
                san.push_str(&disambiguation(position, piece, to));
                if outcome.captured {
                    san.push('x');
                }
            }
            san.push_str(&to.name());
            if let Some(kind) = outcome.promoted {
                san.push('=');
                san.push(kind.letter());
            }
            san
        }
    };

    san.push_str(check_suffix(position.effective_rules(), &after));
    san
}

/// Origin file and/or rank needed to tell `piece` apart from same-kind
/// pieces that could also legally reach `to`.
fn disambiguation(position: &Position, piece: &Piece, to: Square) -> String {
    let rivals: Vec<Square> = position
        .pieces_of(piece.color)
        .filter(|p| p.kind == piece.kind && p.square != piece.square)
        .filter(|p| p.candidate_squares(position).contains(&to))
        .filter(|p| position.is_legal_probe(p.square, to))
        .map(|p| p.square)
        .collect();

    let from = piece.square;
    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|s| s.col() != from.col()) {
        from.file_char().to_string()
    } else if rivals.iter().all(|s| s.row() != from.row()) {
        from.rank_char().to_string()
    } else {
        from.name()
    }
}

fn check_suffix(rules: &dyn RuleSet, after: &Position) -> &'static str {
    match rules.assess_board_state(after, &RepetitionTable::new()) {
        Some(verdict) if verdict.state != GameState::Draw => "#",
        _ if rules.is_in_check(after.side_to_move, after) => "+",
        _ => "",
    }
}

/// Parses a SAN token for the side to move.
///
/// Annotation suffixes (`+`, `#`, `!`, `?`) are ignored. Origin hints are
/// only consulted when more than one piece can legally reach the destination.
pub fn san_to_move(position: &Position, san: &str) -> Result<ParsedSan, SanError> {
    let token = san
        .trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));
    if token.is_empty() {
        return Err(SanError::Empty);
    }
    if let Some(side) = CastleSide::from_token(token) {
        return Ok(ParsedSan {
            mv: Move::Castle(side),
            promotion: None,
        });
    }

    let (body, promotion) = split_promotion(token)?;
    let mut chars: Vec<char> = body
        .chars()
        .filter(|c| !matches!(*c, 'x' | ':' | '-'))
        .collect();
    let kind = match chars.first() {
        Some(c) if c.is_ascii_uppercase() => {
            let kind = PieceKind::from_letter(*c)?;
            chars.remove(0);
            kind
        }
        _ => PieceKind::Pawn,
    };
    if !(2..=4).contains(&chars.len()) {
        return Err(SanError::InvalidFormat(san.to_string()));
    }

    let split = chars.len() - 2;
    let destination = Square::from_name(&chars[split..].iter().collect::<String>())?;
    let hint = OriginHint::parse(&chars[..split])
        .ok_or_else(|| SanError::InvalidFormat(san.to_string()))?;

    let color = position.side_to_move;
    let origins = origin_squares(kind, color, destination);
    let mut candidates: Vec<Square> = position
        .pieces_of(color)
        .filter(|p| p.kind == kind && origins.contains(&p.square))
        .map(|p| p.square)
        .filter(|from| position.is_legal_probe(*from, destination))
        .collect();
    if candidates.len() > 1 {
        candidates.retain(|s| hint.matches(*s));
    }

    match candidates.as_slice() {
        [] => Err(SanError::NoMatchingMove(san.to_string())),
        [from] => Ok(ParsedSan {
            mv: Move::new(*from, destination),
            promotion,
        }),
        _ => Err(SanError::AmbiguousMove(san.to_string())),
    }
}

/// Splits `e8=Q` or `e8Q` into the move body and the promotion letter.
fn split_promotion(token: &str) -> Result<(&str, Option<char>), SanError> {
    if let Some((body, piece)) = token.split_once('=') {
        let mut letters = piece.chars();
        return match (letters.next(), letters.next()) {
            (Some(c), None) if is_promotion_letter(c) => Ok((body, Some(c))),
            _ => Err(SanError::InvalidFormat(token.to_string())),
        };
    }

    let mut tail = token.chars().rev();
    if let (Some(last), Some(prev)) = (tail.next(), tail.next()) {
        if prev.is_ascii_digit() && matches!(last, 'Q' | 'R' | 'B' | 'N') {
            return Ok((&token[..token.len() - 1], Some(last)));
        }
    }
    Ok((token, None))
}

fn is_promotion_letter(c: char) -> bool {
    PieceKind::from_letter(c).is_ok_and(PieceKind::is_promotion_target)
}

/// Squares a `kind` piece of `color` could have come from to reach `destination`.
///
/// Non-pawns use their own geometry from the destination on an empty board.
/// Pawns are traced backwards: one or two steps straight, or one diagonal.
fn origin_squares(kind: PieceKind, color: Color, destination: Square) -> Vec<Square> {
    if kind == PieceKind::Pawn {
        let back = -color.pawn_direction();
        return [
            Vector::new(0, back),
            Vector::new(0, 2 * back),
            Vector::new(-1, back),
            Vector::new(1, back),
        ]
        .into_iter()
        .filter_map(|v| destination.offset(v))
        .collect();
    }
    Piece::new(kind, color, destination).candidate_squares(&Position::empty())
}

#[derive(Debug, Default)]
struct OriginHint {
    col: Option<i8>,
    row: Option<i8>,
}

impl OriginHint {
    fn parse(chars: &[char]) -> Option<Self> {
        let mut hint = OriginHint::default();
        for &c in chars {
            if let Some(col) = file_index(c) {
                if hint.col.is_some() || hint.row.is_some() {
                    return None;
                }
                hint.col = Some(col as i8);
            } else if let Some(row) = rank_index(c) {
                if hint.row.is_some() {
                    return None;
                }
                hint.row = Some(row as i8);
            } else {
                return None;
            }
        }
        Some(hint)
    }

    fn matches(&self, square: Square) -> bool {
        self.col.map_or(true, |c| c == square.col()) && self.row.map_or(true, |r| r == square.row())
    }
}

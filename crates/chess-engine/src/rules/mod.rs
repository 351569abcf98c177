//! Rule set abstraction for chess variants.
//!
//! Positions and games delegate every variant-specific decision to a
//! [`RuleSet`]: what a capture removes, when a player is in check, whether a
//! board is illegal for the player who just moved, and when the game ends.
//! Variants share the standard behaviour through the free functions in
//! [`standard`] and override only what differs.

mod atomic;
mod chess960;
mod horde;
pub mod standard;

pub use atomic::AtomicChess;
pub use chess960::Chess960;
pub use horde::HordeChess;
pub use standard::StandardChess;

use std::fmt;
use std::str::FromStr;

use chess_core::{CastleSide, Color, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MoveOutcome, Piece, Position, PositionError, RepetitionTable};

/// The supported chess variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Standard,
    Atomic,
    Horde,
    Chess960,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Standard,
        Variant::Atomic,
        Variant::Horde,
        Variant::Chess960,
    ];

    /// The rule set implementing this variant.
    pub fn rules(self) -> &'static dyn RuleSet {
        match self {
            Variant::Standard => &StandardChess,
            Variant::Atomic => &AtomicChess,
            Variant::Horde => &HordeChess,
            Variant::Chess960 => &Chess960,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Atomic => "atomic",
            Variant::Horde => "horde",
            Variant::Chess960 => "chess960",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    InProgress,
    VictoryWhite,
    VictoryBlack,
    Draw,
    Aborted,
}

impl GameState {
    pub const fn victory(winner: Color) -> Self {
        match winner {
            Color::White => GameState::VictoryWhite,
            Color::Black => GameState::VictoryBlack,
        }
    }

    /// PGN result token.
    pub const fn result_token(self) -> &'static str {
        match self {
            GameState::VictoryWhite => "1-0",
            GameState::VictoryBlack => "0-1",
            GameState::Draw => "1/2-1/2",
            GameState::InProgress | GameState::Aborted => "*",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameState::InProgress => "in progress",
            GameState::VictoryWhite => "white wins",
            GameState::VictoryBlack => "black wins",
            GameState::Draw => "draw",
            GameState::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    Checkmate,
    Stalemate,
    /// 100 half-moves without a capture or pawn move.
    FiftyMoveRule,
    ThreefoldRepetition,
    /// Atomic: the side to move lost its king in an explosion.
    KingExploded,
    /// Horde: White has no pieces left.
    HordeEliminated,
    Aborted,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EndReason::Checkmate => "checkmate",
            EndReason::Stalemate => "stalemate",
            EndReason::FiftyMoveRule => "fifty-move rule",
            EndReason::ThreefoldRepetition => "threefold repetition",
            EndReason::KingExploded => "king exploded",
            EndReason::HordeEliminated => "horde eliminated",
            EndReason::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

/// A terminal assessment: the final state and the reason for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub state: GameState,
    pub reason: EndReason,
}

impl Verdict {
    pub const fn win(winner: Color, reason: EndReason) -> Self {
        Verdict {
            state: GameState::victory(winner),
            reason,
        }
    }

    pub const fn draw(reason: EndReason) -> Self {
        Verdict {
            state: GameState::Draw,
            reason,
        }
    }
}

/// Variant-specific rules.
///
/// Implementations are stateless unit structs. Every method is required;
/// variants that follow standard chess for a given decision call the
/// matching function in [`standard`], passing themselves so nested decisions
/// still dispatch to the variant.
pub trait RuleSet: Send + Sync {
    fn variant(&self) -> Variant;

    /// Removes whatever a capture of `victim` by `attacker` removes.
    fn capture(&self, position: &mut Position, attacker: Square, victim: Square);

    /// Returns true if `player`'s king is attacked.
    fn is_in_check(&self, player: Color, position: &Position) -> bool;

    /// Returns true if `player` may castle on `side` right now.
    fn can_castle(&self, position: &Position, player: Color, side: CastleSide) -> bool;

    /// Performs castling, or fails with [`PositionError::IllegalCastling`].
    fn castle(
        &self,
        position: &mut Position,
        player: Color,
        side: CastleSide,
    ) -> Result<MoveOutcome, PositionError>;

    /// Returns true if the board is illegal for the player who just moved
    /// (the opponent of `position.side_to_move`).
    fn is_illegal_board_state(&self, position: &Position) -> bool;

    /// Decides whether the game has ended for the side to move.
    fn assess_board_state(&self, position: &Position, visits: &RepetitionTable) -> Option<Verdict>;

    /// Square of `player`'s king.
    fn get_king(&self, position: &Position, player: Color) -> Result<Square, PositionError>;

    /// The rook `player` would castle with on `side`, if it is still there.
    fn get_castling_rook<'a>(
        &self,
        position: &'a Position,
        player: Color,
        side: CastleSide,
    ) -> Option<&'a Piece>;

    /// Where `player`'s castling rook on `side` starts.
    fn initial_rook_square(&self, player: Color, side: CastleSide) -> Option<Square>;
}

//! Chess variant rules engine.
//!
//! This crate provides:
//! - [`Position`] - live pieces plus side to move, castling rights, en passant
//!   target and clocks, with FEN input and output
//! - [`Game`] - move validation, history, repetition tracking and end-of-game
//!   detection
//! - [`RuleSet`] - the variant seam, implemented by [`StandardChess`],
//!   [`AtomicChess`], [`HordeChess`] and [`Chess960`]
//! - SAN and PGN reading and writing
//! - [`GameConfig`] - per-variant start positions loaded from TOML
//!
//! # Architecture
//!
//! Pieces generate pseudo-legal destinations from their own geometry. A move
//! is legal when the active rule set accepts the board that results from
//! playing it on a clone of the position. Captures, check, castling and game
//! end are all delegated to the rule set, which is how Atomic explosions and
//! the king-less Horde fit the same move generator.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, GameState, Variant};
//!
//! let mut game = Game::new(Variant::Standard);
//! game.make_pgn_move("e4").unwrap();
//! game.make_explicit_move("e7", "e5", None).unwrap();
//! assert_eq!(game.state(), GameState::InProgress);
//! println!("Position after 1.e4 e5: {}", game.to_fen());
//! ```

pub mod config;
mod game;
pub mod movegen;
pub mod pgn;
mod piece;
mod position;
mod repetition;
pub mod rules;
pub mod san;

pub use config::{ConfigError, GameConfig, StartPositions};
pub use game::{Game, GameError, GameMove};
pub use movegen::{legal_moves, perft};
pub use pgn::{parse_pgn, PgnError, PgnGame, PgnMove};
pub use piece::Piece;
pub use position::{MoveOutcome, Position, PositionError};
pub use repetition::RepetitionTable;
pub use rules::{
    AtomicChess, Chess960, EndReason, GameState, HordeChess, RuleSet, StandardChess, Variant,
    Verdict,
};
pub use san::{move_to_san, san_to_move, ParsedSan, SanError};

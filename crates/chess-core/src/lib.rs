//! Core types for chess variants.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] and [`Vector`] for board coordinates, with the ray helpers
//!   [`ray_walk`] and [`intermediate_squares`]
//! - [`CastleSide`] and [`CastlingRights`]
//! - [`Move`] for move requests
//! - [`FenRecord`] for FEN field parsing and serialization

mod castling;
mod color;
mod fen;
mod geometry;
mod mov;
mod piece;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use color::Color;
pub use fen::{FenError, FenRecord};
pub use geometry::{intermediate_squares, ray_walk, Vector};
pub use mov::Move;
pub use piece::PieceKind;
pub use square::{file_index, rank_index, square_name, NotationError, Square};

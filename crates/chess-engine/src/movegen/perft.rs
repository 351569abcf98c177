//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth, which
//! can be compared against published values. Promotions are only expanded to
//! queens, so positions with promotions inside the horizon count fewer nodes
//! than the published tables.

use super::{apply_move, legal_moves};
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .filter_map(|m| apply_move(position, m, None).ok())
        .map(|(next, _)| perft(&next, depth - 1))
        .sum()
}

/// Perft with divide - node count below each root move, sorted by move text.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = legal_moves(position)
        .into_iter()
        .filter_map(|m| {
            let (next, _) = apply_move(position, m, None).ok()?;
            let nodes = if depth > 1 { perft(&next, depth - 1) } else { 1 };
            Some((m.to_string(), nodes))
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

//! Position repetition bookkeeping.

use std::collections::HashMap;

/// Counts how often each position signature has occurred.
///
/// Signatures are the first four FEN fields. The table is cleared after every
/// capture, since no earlier position can recur once material is gone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionTable {
    visits: HashMap<String, u32>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one visit and returns the new count for `signature`.
    pub fn record(&mut self, signature: String) -> u32 {
        let count = self.visits.entry(signature).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, signature: &str) -> u32 {
        self.visits.get(signature).copied().unwrap_or(0)
    }

    /// Returns true if any position has been reached three or more times.
    pub fn has_threefold_repetition(&self) -> bool {
        self.visits.values().any(|&n| n >= 3)
    }

    pub fn clear(&mut self) {
        self.visits.clear();
    }

    /// Number of distinct positions recorded.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

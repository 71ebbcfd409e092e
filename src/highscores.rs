//! High score leaderboard
//!
//! Lives for the lifetime of the process only; tracks the top 3 distinct scores.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_TOP_SCORES;

/// High score leaderboard, sorted descending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    entries: Vec<u32>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_TOP_SCORES + 1),
        }
    }

    /// Record a score. Exact duplicates are ignored; the list stays sorted
    /// descending and capped. Returns the rank achieved (1-indexed).
    pub fn add_score(&mut self, score: u32) -> Option<usize> {
        if self.entries.contains(&score) {
            return None;
        }

        // Find insertion point (sorted descending)
        let pos = self
            .entries
            .iter()
            .position(|&e| score > e)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, score);
        self.entries.truncate(MAX_TOP_SCORES);

        (pos < MAX_TOP_SCORES).then_some(pos + 1)
    }

    /// Scores, best first
    pub fn scores(&self) -> &[u32] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render lines as shown on the end-of-game screen
    pub fn display_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, score)| format!("{}. {} Points", i + 1, score))
            .collect()
    }
}

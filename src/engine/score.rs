//! Aggregate score.
//!
//! ```text
//! score = round(clamp(100 - red*R - yellow*Y + green_bonus * min(green, cap), 0, 100))
//! ```
//!
//! Unknown ingredients never move the score.

use serde::{Deserialize, Serialize};

use super::classify::StatusCounts;

/// Weights for [`ScoreWeights::score`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Penalty per red ingredient.
    pub red: f64,
    /// Penalty per yellow ingredient.
    pub yellow: f64,
    /// Bonus per green ingredient.
    pub green_bonus: f64,
    /// Green ingredients beyond this count earn no bonus.
    pub green_cap: usize,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { red: 25.0, yellow: 8.0, green_bonus: 2.0, green_cap: 10 }
    }
}

impl ScoreWeights {
    /// Penalties only, no green bonus.
    pub const fn penalty_only() -> Self {
        Self { red: 15.0, yellow: 5.0, green_bonus: 0.0, green_cap: 0 }
    }

    pub fn score(&self, counts: &StatusCounts) -> u8 {
        let raw = 100.0 - counts.red as f64 * self.red - counts.yellow as f64 * self.yellow
            + self.green_bonus * counts.green.min(self.green_cap) as f64;
        raw.clamp(0.0, 100.0).round() as u8
    }
}

/// Score `counts` with the default weights.
pub fn score(counts: &StatusCounts) -> u8 {
    ScoreWeights::default().score(counts)
}

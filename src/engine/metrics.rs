//! Engine run metrics.
//!
//! Collected only by the verbose entry points
//! ([`analyze_verbose_with`](crate::analyze_verbose_with) and
//! [`Engine::analyze_verbose`](crate::Engine::analyze_verbose)); the plain
//! path never reads the clock.

use std::time::Duration;

use serde::Serialize;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Time spent building the dictionary index. Zero when a prebuilt
    /// [`Engine`](crate::Engine) was used.
    pub index_build: Duration,
    /// Time spent cleaning, splitting and normalizing the label.
    pub tokenize: Duration,
    /// Time spent resolving, judging and bucketing tokens.
    pub classify: Duration,
    /// Time spent computing the score.
    pub score: Duration,
}

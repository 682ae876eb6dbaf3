//! Classification engine.
//!
//! The engine is split into small, pure submodules under `src/engine/`. Data
//! tables (common aliases, botanical tails, policy keys) live in `src/rules/`
//! so that the algorithms here stay free of curated content.
//!
//! ## How the parts work together
//!
//! ```text
//! Dictionary ── DictionaryIndex::build          (index.rs)
//!                 - normalized name/alias -> entry
//!                 - keys sorted by length (fuzzy scan order)
//!                               │
//! raw text ── fragments_with ───┼──────────────  (tokenize.rs, normalize.rs)
//!               - strip (...), labels, "may contain"
//!               - split on ; and ,
//!               - normalize + botanical canonicalization
//!               - keep the typed text beside each token
//!                               │
//!                               v
//!                Classifier::classify_fragments  (classify.rs)
//!                       - Resolver::resolve      (resolve.rs)
//!                       - Policy::judge          (rules/policy.rs)
//!                       - dedup by identity      (dedup.rs)
//!                               │
//!                               v
//!                     ScoreWeights::score        (score.rs)
//!                               │
//!                               v
//!                        AnalysisResult
//! ```
//!
//! Every stage is deterministic: the same text and dictionary always produce
//! the same buckets in the same order. Nothing here blocks or fails; an
//! unmatched token is an ordinary `unknown` outcome.
//!
//! ## Responsibilities by module
//!
//! - `normalize.rs`: canonical and chemical string folding.
//! - `tokenize.rs`: raw list to ordered tokens and their typed fragments.
//! - `index.rs`: lookup structure built once per dictionary snapshot.
//! - `resolve.rs`: token to entry (exact, alias table, fuzzy).
//! - `dedup.rs`: seen-token and seen-identity bookkeeping.
//! - `classify.rs`: buckets, counts and per-token traces.
//! - `score.rs`: weighted-penalty score.
//! - `metrics.rs`: optional timing data for verbose runs.
//!
//! ## Debugging
//!
//! Per-token resolution is logged at `trace` level under the
//! `ingredientiq::engine::resolve` target.

#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/index.rs"]
mod index;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/score.rs"]
mod score;
#[path = "engine/tokenize.rs"]
mod tokenize;

pub use classify::{Buckets, Classification, Classifier, StatusCounts, TokenTrace};
pub use index::DictionaryIndex;
pub use metrics::RunMetrics;
pub use normalize::{normalize, normalize_chemical};
pub use resolve::{CommonAliases, MatchKind, Resolution, Resolver};
pub use score::{ScoreWeights, score};
pub use tokenize::{Fragment, SplitRule, fragments_with, tokenize, tokenize_with};

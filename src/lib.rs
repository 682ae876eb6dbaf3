//! Cosmetic ingredient list classification.
//!
//! `ingredientiq` takes a free-text ingredient list (copied from a label, typed
//! by hand, or produced by OCR), splits it into INCI-style tokens, resolves each
//! token against an immutable reference [`Dictionary`] and sorts the result into
//! four safety buckets with an aggregate 0–100 score.
//!
//! ```
//! use ingredientiq::{Dictionary, DictionaryEntry, Status, analyze};
//!
//! let dictionary = Dictionary::new(
//!     "demo.v1",
//!     vec![
//!         DictionaryEntry::new("aqua", Status::Green).with_aliases(["water"]),
//!         DictionaryEntry::new("phenoxyethanol", Status::Yellow),
//!     ],
//! );
//!
//! let out = analyze("Water (Aqua), Phenoxyethanol", &dictionary);
//! assert_eq!(out.counts.green, 1);
//! assert_eq!(out.counts.yellow, 1);
//! assert_eq!(out.score, 94);
//! ```
//!
//! The engine performs no I/O and keeps no state between calls. Loading
//! dictionaries from disk and publishing new snapshots lives in [`provider`].

#[macro_use]
mod macros;
mod api;
mod engine;
pub mod provider;
mod rules;

pub use api::{AnalysisDetails, AnalysisResult, AnalysisVerbose, Engine, Options, analyze, analyze_verbose_with, analyze_with};
pub use engine::{
    Buckets, Classification, Classifier, CommonAliases, DictionaryIndex, Fragment, MatchKind, Resolution, Resolver,
    RunMetrics, ScoreWeights, SplitRule, StatusCounts, TokenTrace, fragments_with, normalize, normalize_chemical, score,
    tokenize, tokenize_with,
};
pub use rules::botanical::{canonicalize_plant_phrase, canonicalize_tails};
pub use rules::policy::Policy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- Dictionary model -------------------------------------------------------

/// Safety bucket an ingredient is sorted into.
///
/// Upstream data uses two vocabularies for the same buckets; `safe`,
/// `caution` and `avoid` are accepted as synonyms when deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[serde(alias = "safe")]
    Green,
    #[serde(alias = "caution")]
    Yellow,
    #[serde(alias = "avoid")]
    Red,
    #[default]
    Unknown,
}

impl Status {
    /// All statuses in bucket order.
    pub const ALL: [Status; 4] = [Status::Green, Status::Yellow, Status::Red, Status::Unknown];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Green => "green",
            Status::Yellow => "yellow",
            Status::Red => "red",
            Status::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status label is neither a color nor one of its synonyms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" | "safe" => Ok(Status::Green),
            "yellow" | "caution" => Ok(Status::Yellow),
            "red" | "avoid" => Ok(Status::Red),
            "unknown" => Ok(Status::Unknown),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// One reference ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Canonical INCI name, lower-cased.
    pub inci: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub status: Status,
    /// Rationale shown next to the classification. May be empty.
    #[serde(default)]
    pub why: String,
    /// Free-form labels such as `fragrance-allergen`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl DictionaryEntry {
    pub fn new(inci: impl Into<String>, status: Status) -> Self {
        Self { inci: inci.into(), aliases: Vec::new(), status, why: String::new(), tags: Vec::new() }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn with_why(mut self, why: impl Into<String>) -> Self {
        self.why = why.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

/// An immutable dictionary snapshot.
///
/// A new snapshot always replaces the previous one wholesale; the `version`
/// is echoed back on every [`AnalysisResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    pub version: String,
    #[serde(default)]
    pub entries: Vec<DictionaryEntry>,
}

impl Dictionary {
    pub fn new(version: impl Into<String>, entries: Vec<DictionaryEntry>) -> Self {
        Self { version: version.into(), entries }
    }
}

// --- Per-request output -----------------------------------------------------

/// Where a judgement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// A dictionary entry matched.
    Dictionary,
    /// A policy rule decided the status.
    Rule,
    /// Nothing matched; the token is reported as unknown.
    Fallback,
}

/// Classification of a single ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgement {
    /// The ingredient as typed on the label.
    pub name: String,
    /// Canonical identity: the matched entry's normalized INCI name, or the
    /// token itself when nothing matched.
    pub normalized: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    pub source: Source,
}

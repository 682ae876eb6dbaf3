use crate::engine::{
    Buckets, Classifier, CommonAliases, DictionaryIndex, Resolver, RunMetrics, ScoreWeights, SplitRule, StatusCounts,
    TokenTrace, fragments_with,
};
use crate::rules::policy::Policy;
use crate::{Dictionary, DictionaryEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// Options that affect tokenization, resolution and scoring.
///
/// Every field has a default, so a partial TOML table is a valid config:
///
/// ```
/// use ingredientiq::{Options, SplitRule};
///
/// let options = Options::from_toml_str(r#"
///     split = "semicolon_preferred"
///
///     [weights]
///     red = 15.0
///
///     [alias_overrides]
///     "coconut oil" = "cocos nucifera oil"
/// "#).unwrap();
///
/// assert_eq!(options.split, SplitRule::SemicolonPreferred);
/// assert_eq!(options.weights.yellow, 8.0);
/// assert!(options.policy.undisclosed_mixtures);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub split: SplitRule,
    pub weights: ScoreWeights,
    pub policy: Policy,
    /// Extra `alias -> canonical name` keys merged into the dictionary index.
    /// An override whose canonical name is not in the dictionary is ignored.
    pub alias_overrides: BTreeMap<String, String>,
    /// Extra `common name -> canonical name` pairs layered over the built-in
    /// common-name table.
    pub extra_common_aliases: BTreeMap<String, String>,
}

impl Options {
    /// Parse options from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

/// Result of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Aggregate score in `0..=100`.
    pub score: u8,
    pub counts: StatusCounts,
    pub buckets: Buckets,
    /// Canonical identities of the kept ingredients, in label order.
    pub normalized_tokens: Vec<String>,
    /// Version of the dictionary snapshot used.
    pub dictionary_version: String,
}

/// Additional details returned by [`analyze_verbose_with`] and
/// [`Engine::analyze_verbose`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    pub metrics: RunMetrics,
    /// Tokens as produced by the tokenizer, repeats included.
    pub tokens: Vec<String>,
    /// One entry per token in `tokens`.
    pub traces: Vec<TokenTrace>,
    /// Number of keys in the dictionary index.
    pub dictionary_keys: usize,
}

impl AnalysisDetails {
    pub fn raw_tokens(&self) -> usize {
        self.tokens.len()
    }

    pub fn duplicates(&self) -> usize {
        self.traces.iter().filter(|t| t.duplicate).count()
    }
}

/// Result from [`analyze_verbose_with`] and [`Engine::analyze_verbose`].
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisVerbose {
    pub result: AnalysisResult,
    pub details: AnalysisDetails,
}

/// A dictionary snapshot indexed once and reused across analyses.
///
/// `Engine` is immutable; share it behind an `Arc` (or a
/// [`SnapshotHandle`](crate::provider::SnapshotHandle)) and call
/// [`Engine::analyze`] from as many threads as needed.
#[derive(Debug, Clone)]
pub struct Engine {
    index: DictionaryIndex,
    aliases: CommonAliases,
    options: Options,
}

impl Engine {
    pub fn new(dictionary: &Dictionary, options: Options) -> Self {
        let index = DictionaryIndex::build_with_overrides(dictionary, &options.alias_overrides);
        let aliases = CommonAliases::default().with_extra(&options.extra_common_aliases);
        Self { index, aliases, options }
    }

    pub fn version(&self) -> &str {
        self.index.version()
    }

    pub fn index(&self) -> &DictionaryIndex {
        &self.index
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Classify and score `raw`.
    pub fn analyze(&self, raw: &str) -> AnalysisResult {
        let fragments = fragments_with(raw, self.options.split);
        let classification = self.classifier().classify_fragments(&fragments);
        self.finish(classification.buckets, classification.counts, classification.normalized_tokens)
    }

    /// Like [`Engine::analyze`], also returning timings and per-token traces.
    pub fn analyze_verbose(&self, raw: &str) -> AnalysisVerbose {
        let start = Instant::now();
        let mut metrics = RunMetrics::default();

        let t = Instant::now();
        let fragments = fragments_with(raw, self.options.split);
        metrics.tokenize = t.elapsed();

        let t = Instant::now();
        let (classification, traces) = self.classifier().classify_fragments_traced(&fragments);
        metrics.classify = t.elapsed();

        let t = Instant::now();
        let result = self.finish(classification.buckets, classification.counts, classification.normalized_tokens);
        metrics.score = t.elapsed();
        metrics.total = start.elapsed();

        let tokens = fragments.into_iter().map(|fragment| fragment.token).collect();
        AnalysisVerbose {
            result,
            details: AnalysisDetails { metrics, tokens, traces, dictionary_keys: self.index.len() },
        }
    }

    /// Dictionary entries whose name or alias contains `query`.
    /// See [`DictionaryIndex::search`].
    pub fn search(&self, query: &str, limit: usize) -> Vec<&DictionaryEntry> {
        self.index.search(query, limit)
    }

    fn classifier(&self) -> Classifier<'_> {
        Classifier::new(Resolver::new(&self.index, &self.aliases), &self.options.policy)
    }

    fn finish(&self, buckets: Buckets, counts: StatusCounts, normalized_tokens: Vec<String>) -> AnalysisResult {
        AnalysisResult {
            score: self.options.weights.score(&counts),
            counts,
            buckets,
            normalized_tokens,
            dictionary_version: self.index.version().to_string(),
        }
    }
}

/// Analyze `raw` against `dictionary` with default [`Options`].
///
/// Builds a fresh index on every call; use [`Engine`] to analyze many lists
/// against one snapshot.
///
/// # Example
/// ```
/// use ingredientiq::{Dictionary, DictionaryEntry, Status, analyze};
///
/// let dictionary = Dictionary::new("demo.v1", vec![DictionaryEntry::new("glycerin", Status::Green)]);
/// let out = analyze("Ingredients: Glycerin, Mystery Extract", &dictionary);
///
/// assert_eq!(out.normalized_tokens, ["glycerin", "mystery extract"]);
/// assert_eq!(out.counts.unknown, 1);
/// assert_eq!(out.score, 100);
/// ```
pub fn analyze(raw: &str, dictionary: &Dictionary) -> AnalysisResult {
    analyze_with(raw, dictionary, &Options::default())
}

/// Analyze `raw` against `dictionary` with the provided `options`.
pub fn analyze_with(raw: &str, dictionary: &Dictionary, options: &Options) -> AnalysisResult {
    Engine::new(dictionary, options.clone()).analyze(raw)
}

/// Analyze `raw` and return extra (compact) debug details.
///
/// This is useful for profiling and dictionary debugging. The default
/// [`analyze_with`] path does not read the clock or collect traces.
pub fn analyze_verbose_with(raw: &str, dictionary: &Dictionary, options: &Options) -> AnalysisVerbose {
    let start = Instant::now();
    let engine = Engine::new(dictionary, options.clone());
    let index_build = start.elapsed();

    let mut verbose = engine.analyze_verbose(raw);
    verbose.details.metrics.index_build = index_build;
    verbose.details.metrics.total = start.elapsed();
    verbose
}

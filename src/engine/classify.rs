//! Bucketing of resolved tokens.
//!
//! The classifier walks tokens in label order, resolves and judges each one,
//! and keeps the first judgement per canonical identity. Buckets therefore
//! list ingredients in the order they first appeared on the label.

use serde::Serialize;
use tracing::debug;

use super::dedup::DedupState;
use super::resolve::{MatchKind, Resolver};
use super::tokenize::Fragment;
use crate::rules::policy::Policy;
use crate::{Judgement, Status};

/// Number of judgements per bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Green => self.green,
            Status::Yellow => self.yellow,
            Status::Red => self.red,
            Status::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.green + self.yellow + self.red + self.unknown
    }
}

/// Judgements grouped by status, each bucket in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Buckets {
    pub green: Vec<Judgement>,
    pub yellow: Vec<Judgement>,
    pub red: Vec<Judgement>,
    pub unknown: Vec<Judgement>,
}

impl Buckets {
    pub fn get(&self, status: Status) -> &[Judgement] {
        match status {
            Status::Green => &self.green,
            Status::Yellow => &self.yellow,
            Status::Red => &self.red,
            Status::Unknown => &self.unknown,
        }
    }

    fn push(&mut self, judgement: Judgement) {
        let bucket = match judgement.status {
            Status::Green => &mut self.green,
            Status::Yellow => &mut self.yellow,
            Status::Red => &mut self.red,
            Status::Unknown => &mut self.unknown,
        };
        bucket.push(judgement);
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            green: self.green.len(),
            yellow: self.yellow.len(),
            red: self.red.len(),
            unknown: self.unknown.len(),
        }
    }

    /// All judgements, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &Judgement> {
        Status::ALL.into_iter().flat_map(|status| self.get(status).iter())
    }
}

/// Output of [`Classifier::classify`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Classification {
    pub buckets: Buckets,
    /// Equal to `buckets.counts()`.
    pub counts: StatusCounts,
    /// Canonical identities of the kept judgements, in first-seen order.
    pub normalized_tokens: Vec<String>,
}

/// What happened to one token during classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenTrace {
    pub token: String,
    /// `None` when the token was skipped as a repeat or did not resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<&'static str>,
    pub identity: String,
    pub status: Status,
    /// Dropped because the token or its identity was already seen.
    pub duplicate: bool,
}

/// Drives tokens through a [`Resolver`] and a [`Policy`].
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    resolver: Resolver<'a>,
    policy: &'a Policy,
}

impl<'a> Classifier<'a> {
    pub fn new(resolver: Resolver<'a>, policy: &'a Policy) -> Self {
        Self { resolver, policy }
    }

    /// Classify `tokens` in order, dropping repeats. Each judgement is named
    /// after its token.
    pub fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> Classification {
        self.run(tokens.iter().map(|t| (t.as_ref(), t.as_ref())), None)
    }

    /// Classify tokenizer output, naming each judgement after its typed text.
    pub fn classify_fragments(&self, fragments: &[Fragment]) -> Classification {
        self.run(fragments.iter().map(|f| (f.text.as_str(), f.token.as_str())), None)
    }

    /// Like [`Classifier::classify_fragments`], also returning one
    /// [`TokenTrace`] per fragment.
    pub fn classify_fragments_traced(&self, fragments: &[Fragment]) -> (Classification, Vec<TokenTrace>) {
        let mut traces = Vec::with_capacity(fragments.len());
        let items = fragments.iter().map(|f| (f.text.as_str(), f.token.as_str()));
        let classification = self.run(items, Some(&mut traces));
        (classification, traces)
    }

    /// `items` are `(name, token)` pairs; repeats are detected on the token.
    fn run<'t>(
        &self,
        items: impl Iterator<Item = (&'t str, &'t str)>,
        mut traces: Option<&mut Vec<TokenTrace>>,
    ) -> Classification {
        let mut state = DedupState::default();
        let mut buckets = Buckets::default();
        let mut normalized_tokens = Vec::new();
        let mut seen = 0usize;

        for (name, token) in items {
            seen += 1;

            if !state.first_sighting(token) {
                if let Some(traces) = traces.as_deref_mut() {
                    traces.push(TokenTrace {
                        token: token.to_string(),
                        matched: None,
                        identity: String::new(),
                        status: Status::Unknown,
                        duplicate: true,
                    });
                }
                continue;
            }

            let resolution = self.resolver.resolve(token);
            let matched: Option<MatchKind> = resolution.map(|r| r.matched);
            let judgement = self.policy.judge(name, token, resolution.as_ref());
            let fresh = state.claim_identity(&judgement.normalized);

            if let Some(traces) = traces.as_deref_mut() {
                traces.push(TokenTrace {
                    token: token.to_string(),
                    matched: matched.map(MatchKind::as_str),
                    identity: judgement.normalized.clone(),
                    status: judgement.status,
                    duplicate: !fresh,
                });
            }

            if fresh {
                normalized_tokens.push(judgement.normalized.clone());
                buckets.push(judgement);
            }
        }

        let counts = buckets.counts();
        debug!(
            tokens = seen,
            kept = normalized_tokens.len(),
            green = counts.green,
            yellow = counts.yellow,
            red = counts.red,
            unknown = counts.unknown,
            "classified"
        );

        Classification { buckets, counts, normalized_tokens }
    }
}

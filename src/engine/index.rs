//! Dictionary index.
//!
//! Built once per [`Dictionary`] snapshot and read-only afterwards, so a single
//! index can be shared across threads without locking.
//!
//! ## Layout
//!
//! ```text
//! entries:  [ aqua{water, eau}, glycerin{glycerol}, ... ]     (dictionary order)
//! lookup:   "aqua" -> 0, "water" -> 0, "eau" -> 0, "glycerin" -> 1, ...
//! by_length: ["glycerin", "glycerol", "water", "aqua", "eau"]  (longest first)
//! ```
//!
//! Each `by_length` slot also carries the key's dash-folded form, so fuzzy
//! matching compares "peg 100 stearate" against "peg-100 stearate".
//!
//! Key collisions resolve last-write-wins: when two entries claim the same
//! normalized alias, the one later in the dictionary owns it. The key keeps
//! its original position in `by_length` ties.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use super::normalize::{normalize, normalize_chemical};
use crate::{Dictionary, DictionaryEntry};

/// Upper bound for [`DictionaryIndex::search`] results.
pub const MAX_SEARCH_RESULTS: usize = 50;

/// One key as seen by the fuzzy scan.
#[derive(Debug, Clone)]
pub(crate) struct FuzzyKey {
    pub(crate) key: String,
    /// `normalize_chemical(key)`.
    pub(crate) folded: String,
    /// Character count of `key`.
    pub(crate) chars: usize,
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    /// `normalize(entry.inci)`; the canonical identity.
    canonical: String,
    entry: DictionaryEntry,
}

/// Lookup from every normalized canonical name and alias to its entry.
#[derive(Debug, Clone)]
pub struct DictionaryIndex {
    version: String,
    entries: Vec<IndexedEntry>,
    lookup: HashMap<String, usize>,
    /// Keys longest first.
    by_length: Vec<FuzzyKey>,
}

impl DictionaryIndex {
    /// Index `dictionary` without any alias overrides.
    pub fn build(dictionary: &Dictionary) -> Self {
        Self::build_with_overrides(dictionary, &BTreeMap::new())
    }

    /// Index `dictionary`, then layer `overrides` (alias -> canonical name) on
    /// top. An override is only applied when its canonical name is already in
    /// the index; it then points at that entry.
    pub fn build_with_overrides(dictionary: &Dictionary, overrides: &BTreeMap<String, String>) -> Self {
        let mut index = Self {
            version: dictionary.version.clone(),
            entries: Vec::with_capacity(dictionary.entries.len()),
            lookup: HashMap::new(),
            by_length: Vec::new(),
        };
        let mut insertion_order: Vec<String> = Vec::new();

        for entry in &dictionary.entries {
            let canonical = normalize(&entry.inci);
            if canonical.is_empty() {
                warn!(inci = %entry.inci, "dictionary entry has no usable canonical name; it will never match");
                continue;
            }

            let id = index.entries.len();
            index.entries.push(IndexedEntry { canonical: canonical.clone(), entry: entry.clone() });
            index.insert(canonical, id, &mut insertion_order);

            for alias in &entry.aliases {
                index.insert(normalize(alias), id, &mut insertion_order);
            }
        }

        for (alias, canonical) in overrides {
            match index.lookup.get(&normalize(canonical)).copied() {
                Some(id) => index.insert(normalize(alias), id, &mut insertion_order),
                None => debug!(%alias, %canonical, "alias override target not in dictionary; skipped"),
            }
        }

        let mut by_length: Vec<FuzzyKey> = insertion_order
            .into_iter()
            .map(|key| FuzzyKey { chars: key.chars().count(), folded: normalize_chemical(&key), key })
            .collect();
        by_length.sort_by(|a, b| b.chars.cmp(&a.chars));
        index.by_length = by_length;

        debug!(
            version = %index.version,
            entries = index.entries.len(),
            keys = index.lookup.len(),
            "built dictionary index"
        );

        index
    }

    fn insert(&mut self, key: String, id: usize, insertion_order: &mut Vec<String>) {
        if key.is_empty() {
            return;
        }
        if self.lookup.insert(key.clone(), id).is_none() {
            insertion_order.push(key);
        }
    }

    /// Version string of the snapshot this index was built from.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of distinct keys (canonical names plus aliases).
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Reachable entries in dictionary order.
    pub fn entries(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.iter().map(|e| &e.entry)
    }

    /// Exact lookup of an already normalized key.
    pub fn get(&self, key: &str) -> Option<&DictionaryEntry> {
        self.get_with_canonical(key).map(|(entry, _)| entry)
    }

    /// Exact lookup returning the entry and its canonical identity.
    pub(crate) fn get_with_canonical(&self, key: &str) -> Option<(&DictionaryEntry, &str)> {
        let indexed = &self.entries[*self.lookup.get(key)?];
        Some((&indexed.entry, indexed.canonical.as_str()))
    }

    /// All keys, longest (in characters) first; ties keep insertion order.
    pub fn keys_by_length(&self) -> impl Iterator<Item = &str> {
        self.by_length.iter().map(|k| k.key.as_str())
    }

    /// Keys with their folded forms, longest first.
    pub(crate) fn fuzzy_keys(&self) -> &[FuzzyKey] {
        &self.by_length
    }

    /// Substring search over canonical names and aliases, in dictionary order.
    ///
    /// The query is lower-cased and whitespace-collapsed; an empty query finds
    /// nothing. `limit` is clamped to `1..=MAX_SEARCH_RESULTS`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&DictionaryEntry> {
        let needle = query.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ");
        if needle.is_empty() {
            return Vec::new();
        }

        self.entries()
            .filter(|entry| {
                entry.inci.to_lowercase().contains(&needle)
                    || entry.aliases.iter().any(|alias| alias.to_lowercase().contains(&needle))
            })
            .take(limit.clamp(1, MAX_SEARCH_RESULTS))
            .collect()
    }
}

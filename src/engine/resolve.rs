//! Token resolution.
//!
//! The resolver maps one token to at most one dictionary entry. Attempts run
//! in a fixed order and the first hit wins:
//!
//! ```text
//! token ──▶ normalize ──▶ exact lookup ──▶ hit (Exact)
//!                              │ miss
//!                              v
//!                        common alias? ──▶ exact lookup of its INCI ──▶ hit (CommonAlias)
//!                                              │ miss, len >= 4
//!                                              v
//!                          chemical fold ──▶ botanical collapse exact? ──▶ hit (Botanical)
//!                                              │ miss
//!                                              v
//!                          keys longest-first, two-way containment ──▶ hit (Fuzzy)
//!                                              │ miss
//!                                              v
//!                                            None
//! ```
//!
//! The dictionary's own keys always beat the built-in common-name table.
//! Longer keys are scanned first, so the most specific containing key wins
//! over short substrings. Both sides are dash-folded before containment. Keys shorter than [`MIN_FUZZY_LEN`] characters never
//! take part in containment matching.
//!
//! A miss is an ordinary outcome; nothing here fails.

use std::collections::HashMap;

use tracing::trace;

use super::index::DictionaryIndex;
use super::normalize::{normalize, normalize_chemical};
use crate::DictionaryEntry;
use crate::rules::aliases::COMMON_ALIASES;
use crate::rules::botanical::canonicalize_plant_phrase;

/// Minimum length (in characters) for fuzzy matching, on both sides.
pub const MIN_FUZZY_LEN: usize = 4;

/// How a token reached its entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// The normalized token is a key of the index.
    Exact,
    /// The token is a common name whose canonical INCI is a key.
    CommonAlias,
    /// Collapsing the token's binomial phrase produced a key.
    Botanical,
    /// A key contains the token or the token contains a key.
    Fuzzy,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::CommonAlias => "common-alias",
            MatchKind::Botanical => "botanical",
            MatchKind::Fuzzy => "fuzzy",
        }
    }
}

/// A resolved token.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub entry: &'a DictionaryEntry,
    /// The entry's normalized canonical name (its dedup identity).
    pub canonical: &'a str,
    pub matched: MatchKind,
}

/// Static common-name table, normalized once.
///
/// [`CommonAliases::default`] carries the built-in table; callers can layer
/// their own pairs on top with [`CommonAliases::with_extra`].
#[derive(Debug, Clone)]
pub struct CommonAliases {
    map: HashMap<String, String>,
}

impl Default for CommonAliases {
    fn default() -> Self {
        Self::empty().with_extra(COMMON_ALIASES.iter().copied())
    }
}

impl CommonAliases {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    /// Add (or replace) `common name -> canonical INCI` pairs.
    pub fn with_extra<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (alias, canonical) in pairs {
            let key = normalize(alias.as_ref());
            if !key.is_empty() {
                self.map.insert(key, normalize(canonical.as_ref()));
            }
        }
        self
    }

    /// Canonical name for an already normalized common name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Resolves tokens against one index and one alias table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a DictionaryIndex,
    aliases: &'a CommonAliases,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a DictionaryIndex, aliases: &'a CommonAliases) -> Self {
        Self { index, aliases }
    }

    /// Best-matching entry for `token`, or `None` if nothing matches.
    pub fn resolve(&self, token: &str) -> Option<Resolution<'a>> {
        let normalized = normalize(token);
        if let Some(hit) = self.exact(&normalized, MatchKind::Exact) {
            return Some(hit);
        }

        let key = match self.aliases.get(&normalized) {
            Some(canonical) => {
                if let Some(hit) = self.exact(canonical, MatchKind::CommonAlias) {
                    return Some(hit);
                }
                canonical.to_string()
            }
            None => normalized,
        };

        if key.chars().count() < MIN_FUZZY_LEN {
            return None;
        }

        let folded = normalize_chemical(&key);
        if folded.chars().count() < MIN_FUZZY_LEN {
            return None;
        }

        let collapsed = canonicalize_plant_phrase(&folded);
        if collapsed != folded {
            if let Some(hit) = self.exact(&collapsed, MatchKind::Botanical) {
                return Some(hit);
            }
        }

        self.fuzzy(&folded)
    }

    fn exact(&self, key: &str, matched: MatchKind) -> Option<Resolution<'a>> {
        let (entry, canonical) = self.index.get_with_canonical(key)?;
        trace!(key, canonical, kind = matched.as_str(), "resolved");
        Some(Resolution { entry, canonical, matched })
    }

    fn fuzzy(&self, folded: &str) -> Option<Resolution<'a>> {
        for candidate in self.index.fuzzy_keys() {
            if candidate.chars < MIN_FUZZY_LEN {
                break;
            }
            if folded.contains(candidate.folded.as_str()) || candidate.folded.contains(folded) {
                return self.exact(&candidate.key, MatchKind::Fuzzy);
            }
        }
        trace!(token = folded, "unresolved");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dictionary, Status};

    fn index() -> DictionaryIndex {
        DictionaryIndex::build(&Dictionary::new(
            "test.v1",
            vec![
                DictionaryEntry::new("aqua", Status::Green).with_aliases(["water"]),
                DictionaryEntry::new("oenothera biennis oil", Status::Green),
                DictionaryEntry::new("vitis vinifera seed oil", Status::Green),
                DictionaryEntry::new("sodium laureth sulfate", Status::Yellow).with_aliases(["sles"]),
                DictionaryEntry::new("cetearyl alcohol", Status::Green),
                DictionaryEntry::new("zea", Status::Green),
            ],
        ))
    }

    fn resolve(token: &str) -> Option<(String, MatchKind)> {
        let index = index();
        let aliases = CommonAliases::default();
        Resolver::new(&index, &aliases).resolve(token).map(|r| (r.canonical.to_string(), r.matched))
    }

    #[test]
    fn exact_lookup_by_name_and_alias() {
        assert_eq!(resolve("aqua"), Some(("aqua".into(), MatchKind::Exact)));
        assert_eq!(resolve("Water"), Some(("aqua".into(), MatchKind::Exact)));
        assert_eq!(resolve("SLES"), Some(("sodium laureth sulfate".into(), MatchKind::Exact)));
    }

    #[test]
    fn common_alias_substitutes_canonical_name() {
        assert_eq!(resolve("Evening Primrose Oil"), Some(("oenothera biennis oil".into(), MatchKind::CommonAlias)));
        assert_eq!(resolve("grapeseed oil"), Some(("vitis vinifera seed oil".into(), MatchKind::CommonAlias)));
    }

    #[test]
    fn dictionary_key_beats_common_alias_table() {
        let index = DictionaryIndex::build(&Dictionary::new(
            "test.v1",
            vec![
                DictionaryEntry::new("argan oil", Status::Green),
                DictionaryEntry::new("rosa canina fruit oil", Status::Green).with_aliases(["rosehip oil"]),
            ],
        ));
        let aliases = CommonAliases::default();
        let resolver = Resolver::new(&index, &aliases);

        let hit = resolver.resolve("Argan Oil").map(|r| (r.canonical, r.matched));
        assert_eq!(hit, Some(("argan oil", MatchKind::Exact)));
        let hit = resolver.resolve("Rosehip Oil").map(|r| (r.canonical, r.matched));
        assert_eq!(hit, Some(("rosa canina fruit oil", MatchKind::Exact)));
    }

    #[test]
    fn botanical_collapse_after_chemical_fold() {
        assert_eq!(resolve("vitis vinifera grape seed oil"), Some(("vitis vinifera seed oil".into(), MatchKind::Botanical)));
        assert_eq!(resolve("vitis-vinifera grape seed oil"), Some(("vitis vinifera seed oil".into(), MatchKind::Botanical)));
    }

    #[test]
    fn fuzzy_containment_both_ways() {
        assert_eq!(resolve("sodium laureth sulfate 70"), Some(("sodium laureth sulfate".into(), MatchKind::Fuzzy)));
        assert_eq!(resolve("Cetearyl-Alcohol"), Some(("cetearyl alcohol".into(), MatchKind::Fuzzy)));
        assert_eq!(resolve("laureth sulfate"), Some(("sodium laureth sulfate".into(), MatchKind::Fuzzy)));
    }

    #[test]
    fn dash_variants_reach_hyphenated_keys() {
        let index = DictionaryIndex::build(&Dictionary::new(
            "test.v1",
            vec![DictionaryEntry::new("PEG-100 Stearate", Status::Yellow)],
        ));
        let aliases = CommonAliases::empty();
        let resolver = Resolver::new(&index, &aliases);

        for token in ["peg\u{2010}100 stearate", "peg 100 stearate", "PEG\u{2013}100 Stearate SE"] {
            let hit = resolver.resolve(token).map(|r| (r.canonical, r.matched));
            assert_eq!(hit, Some(("peg-100 stearate", MatchKind::Fuzzy)), "token: {token:?}");
        }
    }

    #[test]
    fn short_tokens_and_short_keys_never_fuzzy_match() {
        assert_eq!(resolve("aq"), None);
        assert_eq!(resolve("zeaxanthin"), None);
        assert_eq!(resolve("----"), None);
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        assert_eq!(resolve("mystery extract x"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn extra_common_aliases_layer_over_builtin() {
        let index = index();
        let aliases = CommonAliases::default().with_extra([("Eau Pure", "aqua")]);
        let hit = Resolver::new(&index, &aliases).resolve("eau pure").map(|r| r.canonical);
        assert_eq!(hit, Some("aqua"));
        assert!(aliases.len() > COMMON_ALIASES.len() - 1);
    }
}

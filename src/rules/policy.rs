use serde::{Deserialize, Serialize};

use crate::engine::{MatchKind, Resolution, normalize};
use crate::{Judgement, Source, Status};

/// Label names that stand for an undisclosed blend of substances.
const UNDISCLOSED_MIXTURES: &[&str] = &["fragrance", "parfum", "aroma", "flavor"];

/// Entry tags that force an `avoid` classification.
const HARD_AVOID_TAGS: &[&str] = &["fragrance-allergen"];

const UNDISCLOSED_WHY: &str = "Undisclosed mixture; full disclosure required.";
const ALLERGEN_WHY: &str = "Fragrance allergen flagged by policy.";

/// Classification overrides applied on top of dictionary resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Judge "fragrance", "parfum", "aroma" and "flavor" as red.
    pub undisclosed_mixtures: bool,
    /// Judge entries tagged `fragrance-allergen` as red.
    pub elevate_fragrance_allergens: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self { undisclosed_mixtures: true, elevate_fragrance_allergens: true }
    }
}

impl Policy {
    /// Policy that trusts dictionary statuses unchanged.
    pub const fn dictionary_only() -> Self {
        Self { undisclosed_mixtures: false, elevate_fragrance_allergens: false }
    }

    /// Turn a token and its (possible) resolution into a [`Judgement`].
    /// `name` is the label text the token came from.
    ///
    /// An undisclosed mixture only borrows the identity of an entry it names
    /// directly; a containment hit such as "aroma" inside a plant extract
    /// keeps the token as identity.
    pub fn judge(&self, name: &str, token: &str, resolution: Option<&Resolution<'_>>) -> Judgement {
        let normalized = normalize(token);

        if self.undisclosed_mixtures && UNDISCLOSED_MIXTURES.contains(&normalized.as_str()) {
            let identity = resolution
                .filter(|r| matches!(r.matched, MatchKind::Exact | MatchKind::CommonAlias))
                .map(|r| r.canonical.to_string())
                .unwrap_or(normalized);
            return Judgement {
                name: name.to_string(),
                normalized: identity,
                status: Status::Red,
                why: Some(UNDISCLOSED_WHY.to_string()),
                source: Source::Rule,
            };
        }

        let Some(resolution) = resolution else {
            return Judgement {
                name: name.to_string(),
                normalized,
                status: Status::Unknown,
                why: None,
                source: Source::Fallback,
            };
        };

        let entry = resolution.entry;
        let why = Some(entry.why.trim()).filter(|w| !w.is_empty()).map(str::to_string);
        let elevated = self.elevate_fragrance_allergens
            && entry.tags.iter().any(|tag| HARD_AVOID_TAGS.contains(&tag.trim().to_ascii_lowercase().as_str()));

        let (status, why) = if elevated {
            (Status::Red, why.or_else(|| Some(ALLERGEN_WHY.to_string())))
        } else {
            (entry.status, why)
        };

        Judgement {
            name: name.to_string(),
            normalized: resolution.canonical.to_string(),
            status,
            why,
            source: Source::Dictionary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DictionaryEntry;

    fn resolution<'a>(entry: &'a DictionaryEntry, canonical: &'a str) -> Resolution<'a> {
        Resolution { entry, canonical, matched: MatchKind::Exact }
    }

    fn judge(policy: Policy, token: &str, resolution: Option<&Resolution<'_>>) -> Judgement {
        policy.judge(token, token, resolution)
    }

    #[test]
    fn undisclosed_mixture_is_red_by_rule() {
        let j = judge(Policy::default(), "parfum", None);
        assert_eq!(j.status, Status::Red);
        assert_eq!(j.source, Source::Rule);
        assert_eq!(j.normalized, "parfum");
        assert_eq!(j.why.as_deref(), Some(UNDISCLOSED_WHY));
    }

    #[test]
    fn undisclosed_mixture_keeps_dictionary_identity() {
        let entry = DictionaryEntry::new("fragrance", Status::Yellow).with_aliases(["parfum"]);
        let j = judge(Policy::default(), "parfum", Some(&resolution(&entry, "fragrance")));
        assert_eq!(j.status, Status::Red);
        assert_eq!(j.normalized, "fragrance");
    }

    #[test]
    fn undisclosed_mixture_ignores_containment_identity() {
        let entry = DictionaryEntry::new("vanilla planifolia fruit aroma extract", Status::Green);
        let hit = Resolution {
            entry: &entry,
            canonical: "vanilla planifolia fruit aroma extract",
            matched: MatchKind::Fuzzy,
        };

        let j = judge(Policy::default(), "aroma", Some(&hit));
        assert_eq!(j.status, Status::Red);
        assert_eq!(j.source, Source::Rule);
        assert_eq!(j.normalized, "aroma");
    }

    #[test]
    fn name_is_kept_as_typed() {
        let entry = DictionaryEntry::new("glycerin", Status::Green).with_aliases(["glycerine"]);
        let policy = Policy::default();

        let j = policy.judge("Glycérine", "glycerine", Some(&resolution(&entry, "glycerin")));
        assert_eq!((j.name.as_str(), j.normalized.as_str()), ("Glycérine", "glycerin"));

        let j = policy.judge("Parfum", "parfum", None);
        assert_eq!((j.name.as_str(), j.normalized.as_str()), ("Parfum", "parfum"));

        let j = policy.judge("Mystery Extract", "mystery extract", None);
        assert_eq!((j.name.as_str(), j.normalized.as_str()), ("Mystery Extract", "mystery extract"));
    }

    #[test]
    fn allergen_tag_elevates_to_red() {
        let entry = DictionaryEntry::new("limonene", Status::Yellow).with_tags(["fragrance-allergen"]);
        let j = judge(Policy::default(), "limonene", Some(&resolution(&entry, "limonene")));
        assert_eq!(j.status, Status::Red);
        assert_eq!(j.source, Source::Dictionary);
        assert_eq!(j.why.as_deref(), Some(ALLERGEN_WHY));

        let with_why = entry.clone().with_why("Oxidizes into sensitizers.");
        let j = judge(Policy::default(), "limonene", Some(&resolution(&with_why, "limonene")));
        assert_eq!(j.why.as_deref(), Some("Oxidizes into sensitizers."));
    }

    #[test]
    fn dictionary_only_policy_trusts_entries() {
        let entry = DictionaryEntry::new("limonene", Status::Yellow).with_tags(["fragrance-allergen"]);
        let policy = Policy::dictionary_only();

        assert_eq!(judge(policy, "limonene", Some(&resolution(&entry, "limonene"))).status, Status::Yellow);
        assert_eq!(judge(policy, "fragrance", None).status, Status::Unknown);
    }

    #[test]
    fn unresolved_token_falls_back_to_unknown() {
        let j = judge(Policy::default(), "mystery extract x", None);
        assert_eq!(j.status, Status::Unknown);
        assert_eq!(j.source, Source::Fallback);
        assert_eq!(j.normalized, "mystery extract x");
        assert_eq!(j.why, None);
    }
}

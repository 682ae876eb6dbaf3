//! Ingredient list tokenization.
//!
//! ```text
//! "Ingredients: Water (Aqua), Glycerin • Citrus Aurantium Bergamia Bergamot Fruit Oil. May contain: CI 77891"
//!   │ strip "(...)", "ingredients:" labels, "may contain ..." tail
//!   │ bullets -> commas
//!   │ split on ; and ,
//!   │ trim, drop empties, normalize
//!   │ botanical + tail canonicalization
//!   v
//! ["water", "glycerin", "citrus aurantium fruit oil"]
//! ```
//!
//! Duplicates are kept. Deduplication happens in the classifier, by resolved
//! identity rather than by raw string.

use serde::{Deserialize, Serialize};

use super::normalize::{collapse_whitespace, normalize};
use crate::rules::botanical::{canonicalize_plant_phrase, canonicalize_tails};

/// How a cleaned ingredient list is cut into fragments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitRule {
    /// Split on every run of `;` and `,`.
    #[default]
    Uniform,
    /// Split on `;` when the list contains one; otherwise split on commas that
    /// are not inside parentheses.
    SemicolonPreferred,
}

/// One label fragment and the token it folds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// The fragment as typed, trimmed and whitespace-collapsed.
    pub text: String,
    pub token: String,
}

/// Tokenize with the default [`SplitRule::Uniform`].
///
/// ```
/// use ingredientiq::tokenize;
///
/// let tokens = tokenize("Ingredients: Water (Aqua), Glycerin; Fragrance (Parfum). May contain: CI 77491");
/// assert_eq!(tokens, ["water", "glycerin", "fragrance"]);
/// ```
pub fn tokenize(raw: &str) -> Vec<String> {
    tokenize_with(raw, SplitRule::default())
}

/// Tokenize `raw` using an explicit split rule.
pub fn tokenize_with(raw: &str, rule: SplitRule) -> Vec<String> {
    fragments_with(raw, rule).into_iter().map(|fragment| fragment.token).collect()
}

/// Like [`tokenize_with`], keeping each token's typed text.
///
/// ```
/// use ingredientiq::{SplitRule, fragments_with};
///
/// let fragments = fragments_with("Glycérine,  Evening   Primrose Oil", SplitRule::Uniform);
/// assert_eq!(fragments[0].text, "Glycérine");
/// assert_eq!(fragments[0].token, "glycerine");
/// assert_eq!(fragments[1].text, "Evening Primrose Oil");
/// ```
pub fn fragments_with(raw: &str, rule: SplitRule) -> Vec<Fragment> {
    let cleaned = clean(raw);

    split(&cleaned, rule)
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| {
            let token = canonicalize_tails(&canonicalize_plant_phrase(&normalize(fragment)));
            Fragment { text: collapse_whitespace(fragment), token }
        })
        .filter(|fragment| fragment.token.chars().count() > 1)
        .collect()
}

/// Remove annotations and boilerplate that never name an ingredient.
fn clean(raw: &str) -> String {
    let text = regex!(r"\([^)]*\)").replace_all(raw, " ");
    let text = regex!(r"(?i)ingredients?:").replace_all(&text, " ");
    let text = regex!(r"(?is)may contain.*$").replace_all(&text, " ");
    text.replace(['\u{2022}', '\u{00B7}'], ",")
}

fn split(text: &str, rule: SplitRule) -> Vec<&str> {
    match rule {
        SplitRule::Uniform => regex!(r"[;,]+").split(text).collect(),
        SplitRule::SemicolonPreferred if text.contains(';') => text.split(';').collect(),
        SplitRule::SemicolonPreferred => split_top_level_commas(text),
    }
}

fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

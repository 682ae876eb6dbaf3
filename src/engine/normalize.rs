//! String folding.
//!
//! Two variants share one pipeline:
//!
//! - [`normalize`] produces the canonical form used for every index key and
//!   every token. Hyphens survive, as in "peg-100 stearate".
//! - [`normalize_chemical`] additionally turns hyphens and Unicode dashes into
//!   spaces. It is only used by the fuzzy fallback, never to build keys.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical folding: lower-case, strip diacritics, replace punctuation with
/// spaces, collapse whitespace.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// ```
/// use ingredientiq::normalize;
///
/// assert_eq!(normalize("  Crème  de Rosé (Extract)! "), "creme de rose extract");
/// assert_eq!(normalize("PEG-100 Stearate"), "peg-100 stearate");
/// ```
pub fn normalize(s: &str) -> String {
    let folded: String = s
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if is_word_char(c) || c.is_whitespace() || c == '-' { c } else { ' ' })
        .collect();

    collapse_whitespace(&folded)
}

/// Fuzzy-comparison folding: [`normalize`] plus dash removal.
pub fn normalize_chemical(s: &str) -> String {
    let dashless: String = s.chars().map(|c| if is_dash(c) { ' ' } else { c }).collect();
    collapse_whitespace(&dashless)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// ASCII hyphen plus U+2010 (hyphen) through U+2015 (horizontal bar).
fn is_dash(c: char) -> bool {
    matches!(c, '-' | '\u{2010}'..='\u{2015}')
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

use once_cell::sync::Lazy;

use crate::engine::normalize;

/// Descriptive tails that follow a Latin binomial in INCI plant names.
const PLANT_TAILS: &[&str] = &[
    "seed oil unsaponifiables",
    "unsaponifiables",
    "sterols",
    "seed oil",
    "fruit oil",
    "kernel oil",
    "oil",
    "leaf extract",
    "root extract",
    "flower extract",
    "bark extract",
    "stem extract",
    "flower/leaf/vine extract",
    "extract",
];

const UNSAPONIFIABLES: &str = "unsaponifiables";

/// Tails in token form (normalized and split into words), so that
/// "flower/leaf/vine extract" compares against "flower leaf vine extract".
static TAIL_WORDS: Lazy<Vec<(String, Vec<String>)>> = Lazy::new(|| {
    PLANT_TAILS
        .iter()
        .map(|tail| {
            let normalized = normalize(tail);
            let words = normalized.split(' ').map(str::to_string).collect();
            (normalized, words)
        })
        .collect()
});

/// Rewrite `<genus> <species> ... <tail>` to `<genus> <species> <tail>`.
///
/// The longest known tail wins. Words between the species and the tail are
/// dropped ("citrus aurantium bergamia bergamot fruit oil" becomes "citrus
/// aurantium fruit oil"). Tokens whose first two words are not plain ASCII
/// letters, or that carry no known tail after the binomial, pass through.
///
/// ```
/// use ingredientiq::canonicalize_plant_phrase;
///
/// assert_eq!(canonicalize_plant_phrase("vitis vinifera grape seed oil"), "vitis vinifera seed oil");
/// assert_eq!(canonicalize_plant_phrase("argan oil"), "argan oil");
/// ```
pub fn canonicalize_plant_phrase(token: &str) -> String {
    let words: Vec<&str> = token.split_whitespace().collect();
    let [genus, species, rest @ ..] = words.as_slice() else {
        return token.to_string();
    };
    if !is_latin_word(genus) || !is_latin_word(species) {
        return token.to_string();
    }

    match longest_tail(rest) {
        Some(tail) => format!("{genus} {species} {tail}"),
        None => token.to_string(),
    }
}

/// Move a trailing "unsaponifiables" behind the rest of a "seed oil" phrase.
///
/// Every occurrence is removed and a single one is re-appended, so word-order
/// drift such as "x unsaponifiables y seed oil unsaponifiables" collapses to
/// "x y seed oil unsaponifiables".
pub fn canonicalize_tails(token: &str) -> String {
    let words: Vec<&str> = token.split_whitespace().collect();
    let has_seed_oil = words.windows(2).any(|pair| pair[0] == "seed" && pair[1] == "oil");

    if has_seed_oil && words.last() == Some(&UNSAPONIFIABLES) {
        let mut kept: Vec<&str> = words.into_iter().filter(|w| *w != UNSAPONIFIABLES).collect();
        kept.push(UNSAPONIFIABLES);
        return kept.join(" ");
    }

    words.join(" ")
}

fn longest_tail(rest: &[&str]) -> Option<&'static str> {
    TAIL_WORDS
        .iter()
        .filter(|(_, words)| ends_with_words(rest, words))
        .max_by_key(|(tail, _)| tail.len())
        .map(|(tail, _)| tail.as_str())
}

fn ends_with_words(haystack: &[&str], needle: &[String]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    haystack[haystack.len() - needle.len()..].iter().zip(needle).all(|(a, b)| *a == b.as_str())
}

fn is_latin_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

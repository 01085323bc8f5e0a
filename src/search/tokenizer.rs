//! Text normalization and tokenization
//!
//! Both the full-text index and the free-text filter go through the same
//! folding: canonical decomposition with combining marks dropped, then
//! lower-casing. Tokens are maximal runs of alphanumeric characters; stop
//! words and single-character tokens are discarded.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Words too common to narrow a search
const STOP_WORDS: &[&str] = &[
    "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Whether a lower-cased word is a stop word
#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Strip diacritics and lower-case
///
/// # Examples
/// ```
/// # use compendium::search::tokenizer::fold;
/// assert_eq!(fold("Élan Vital"), "elan vital");
/// ```
#[must_use]
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Fold and drop everything that is not alphanumeric
///
/// Used for substring matching, so `"Fire-Ball"` and `"fireball"` compare
/// equal.
///
/// # Examples
/// ```
/// # use compendium::search::tokenizer::normalize;
/// assert_eq!(normalize("Ælf's Fire-Ball!"), "ælfsfireball");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    fold(text).chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Split text into searchable terms
///
/// # Examples
/// ```
/// # use compendium::search::tokenizer::tokenize;
/// assert_eq!(tokenize("The Fire of a Dragon's Breath"), vec!["fire", "dragon", "breath"]);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    fold(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() > 1 && !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Locale-aware string ordering
///
/// Compares diacritic-folded, lower-cased text first so that `"Éclair"` sorts
/// next to `"Eclair"`; the raw strings break remaining ties.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

//! Text normalization for OCR output.
//!
//! OCR text arrives as one long stream with hard line breaks, page
//! separators and running headers/footers. Normalization reduces it to a
//! single line of NFC text with scanner noise removed, optionally starting
//! after the enactment phrase.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::grammar::{BoundaryGrammar, NoiseRule};

/// Upper bound on clean-up passes; real noise rules settle in one or two.
const MAX_CLEAN_PASSES: usize = 8;

/// Leftovers at the start of a leaf body: the period or colon closing a
/// header token ("SEC. 3. This act") and dash runs OCR attaches to markers
/// ("(a) — The ...").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LEADING_LEFTOVERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[.:]\s*)?[-–—]*\s*").expect("valid regex"));

/// Normalize raw OCR text for segmentation.
///
/// Applies NFC, removes noise, collapses whitespace and, when the grammar
/// has an enactment phrase that occurs in the text, keeps only what
/// follows its first occurrence.
///
/// # Examples
/// ```
/// use statute_segmenter::grammar::create_numbered_points_grammar;
/// use statute_segmenter::normalize::normalize;
///
/// let grammar = create_numbered_points_grammar();
/// assert_eq!(normalize("  (1)\tAlpha\n\nbeta ", &grammar), "(1) Alpha beta");
/// ```
pub fn normalize(raw_text: &str, grammar: &BoundaryGrammar) -> String {
    let text: String = raw_text.nfc().collect();
    let text = clean_noise(&text, grammar.noise_rules());

    match grammar.enactment_phrase() {
        Some(phrase) => text_after_enactment(&text, phrase),
        None => text,
    }
}

/// Remove noise and collapse whitespace until the text is stable.
///
/// Rules are applied in order, each match replaced by a single space, then
/// every whitespace run becomes one space and the ends are trimmed.
pub fn clean_noise(text: &str, rules: &[NoiseRule]) -> String {
    let mut result = collapse_whitespace(text);

    for _ in 0..MAX_CLEAN_PASSES {
        let mut next = result.clone();
        for rule in rules {
            next = rule.apply(&next).into_owned();
        }
        let next = collapse_whitespace(&next);
        if next == result {
            break;
        }
        result = next;
    }

    result
}

/// Collapse every whitespace run to one space and trim.
///
/// # Examples
/// ```
/// use statute_segmenter::normalize::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace(" a \n\t b\u{c}c "), "a b c");
/// ```
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep only the text after the first occurrence of `phrase`.
///
/// Returns the text unchanged when the phrase does not occur.
#[must_use]
pub fn text_after_enactment(text: &str, phrase: &str) -> String {
    match text.find(phrase) {
        Some(idx) => text[idx + phrase.len()..].trim().to_string(),
        None => text.to_string(),
    }
}

/// Clean one leaf body cut out of normalized text.
///
/// Strips a leftover header period and leading dash runs, then reapplies
/// the noise rules: slicing at markers can expose footer fragments that
/// were glued to a neighbour.
pub fn clean_leaf_body(body: &str, rules: &[NoiseRule]) -> String {
    let body = LEADING_LEFTOVERS.replace(body.trim(), "");
    clean_noise(&body, rules)
}

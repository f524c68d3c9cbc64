//! Entry builder: turns leaf spans into structured records.

use regex::Regex;
use std::sync::LazyLock;

use crate::grammar::{BoundaryGrammar, ShortLeafPolicy};
use crate::normalize::clean_leaf_body;
use crate::types::{DocumentTitle, Segmentation, StructuredRecord};

/// Word tokens: alphanumeric runs, hyphens included.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w-]+\b").expect("valid regex"));

/// Count words in a text.
///
/// # Examples
/// ```
/// use statute_segmenter::builder::word_count;
///
/// assert_eq!(word_count("One two three."), 3);
/// assert_eq!(word_count("A well-known rule"), 3);
/// assert_eq!(word_count(" - "), 0);
/// ```
#[must_use]
pub fn word_count(text: &str) -> usize {
    WORD_PATTERN.find_iter(text).count()
}

/// Build a record for one leaf, or `None` when it is dropped.
///
/// The body is cleaned first; empty bodies and bodies below the grammar's
/// minimum word count are dropped. The record carries no entry number.
pub fn build(
    span_label: Option<&str>,
    span_type: &str,
    body_text: &str,
    doc_title: &DocumentTitle,
    grammar: &BoundaryGrammar,
) -> Option<StructuredRecord> {
    let text = clean_leaf_body(body_text, grammar.noise_rules());
    make_record(span_label, span_type, text, doc_title, grammar.min_words())
}

fn make_record(
    span_label: Option<&str>,
    span_type: &str,
    text: String,
    doc_title: &DocumentTitle,
    min_words: usize,
) -> Option<StructuredRecord> {
    if text.is_empty() {
        return None;
    }

    let count = word_count(&text);
    if count < min_words {
        return None;
    }

    Some(StructuredRecord {
        kb: doc_title.to_string(),
        article_number: span_label.map(str::to_string),
        kind: span_type.to_string(),
        text,
        word_count: count,
        entry_number: None,
    })
}

/// Records built from one segmentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutcome {
    pub records: Vec<StructuredRecord>,

    /// Leaves that produced no record.
    pub skipped: usize,
}

/// Builds the records for one document.
pub struct EntryBuilder<'a> {
    grammar: &'a BoundaryGrammar,
    title: &'a DocumentTitle,
}

impl<'a> EntryBuilder<'a> {
    /// Create a builder for a document.
    #[must_use]
    pub fn new(grammar: &'a BoundaryGrammar, title: &'a DocumentTitle) -> Self {
        Self { grammar, title }
    }

    /// Build records for every leaf span, in document order.
    ///
    /// Flat grammars number the emitted records 1..=N. With the
    /// merge-forward policy a short leaf's text is prepended to the next
    /// leaf of the same scope; a short leaf at the end of a scope is dropped.
    pub fn build_all(&self, text: &str, segmentation: &Segmentation) -> BuildOutcome {
        let mut outcome = BuildOutcome::default();
        let merge_forward = self.grammar.short_leaves() == ShortLeafPolicy::MergeForward;

        for scope in &segmentation.scopes {
            let span_type = scope.header.as_deref().unwrap_or(self.grammar.flat_type());
            let mut pending: Option<String> = None;

            for span in &scope.spans {
                let mut body = clean_leaf_body(span.body(text), self.grammar.noise_rules());
                if let Some(carried) = pending.take() {
                    body = format!("{carried} {body}").trim().to_string();
                }

                match make_record(
                    span.label.as_deref(),
                    span_type,
                    body.clone(),
                    self.title,
                    self.grammar.min_words(),
                ) {
                    Some(record) => outcome.records.push(record),
                    None => {
                        outcome.skipped += 1;
                        if merge_forward && !body.is_empty() {
                            pending = Some(body);
                        }
                    }
                }
            }

            if let Some(dropped) = pending {
                tracing::debug!(
                    scope = span_type,
                    words = word_count(&dropped),
                    "Dropped short fragment at end of scope"
                );
            }
        }

        if self.grammar.is_flat() {
            for (index, record) in outcome.records.iter_mut().enumerate() {
                record.entry_number = Some(index + 1);
            }
        }

        outcome
    }
}

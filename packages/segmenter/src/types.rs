//! Core data types for the segmenter.
//!
//! These types describe one document's segmentation: the spans carved out
//! of the normalized text and the records handed to the sink.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::validate_title;
use crate::error::Result;

/// Tag attached to every record from one source document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentTitle(String);

impl DocumentTitle {
    /// Create a validated document title.
    ///
    /// # Examples
    /// ```
    /// use statute_segmenter::types::DocumentTitle;
    ///
    /// let title = DocumentTitle::new("California_state_law").unwrap();
    /// assert_eq!(title.as_str(), "California_state_law");
    /// assert!(DocumentTitle::new("").is_err());
    /// ```
    pub fn new(title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self(title.trim().to_string()))
    }

    /// Borrow the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A leaf span over the normalized text.
///
/// `start` is where the marker token begins, `body_start` where it ends.
/// Within one scope the `end` of a span equals the `start` of the next.
/// Unlabeled spans (whole scope bodies, kept chapeau text) have
/// `start == body_start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan {
    /// Bare marker label, e.g. "a", "12", "iv".
    pub label: Option<String>,

    /// Byte offset of the marker token.
    pub start: usize,

    /// Byte offset where the body begins.
    pub body_start: usize,

    /// Byte offset one past the body.
    pub end: usize,
}

impl RawSpan {
    /// Create a labeled span.
    #[must_use]
    pub fn labeled(label: impl Into<String>, start: usize, body_start: usize, end: usize) -> Self {
        Self {
            label: Some(label.into()),
            start,
            body_start,
            end,
        }
    }

    /// Create an unlabeled span whose body covers the whole range.
    #[must_use]
    pub fn unlabeled(start: usize, end: usize) -> Self {
        Self {
            label: None,
            start,
            body_start: start,
            end,
        }
    }

    /// The raw body slice of this span.
    ///
    /// Returns an empty string when the offsets do not fit `text`.
    #[must_use]
    pub fn body<'t>(&self, text: &'t str) -> &'t str {
        text.get(self.body_start..self.end).unwrap_or_default()
    }
}

/// A header scope and the spans it owns.
///
/// Flat grammars produce a single scope without a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// Normalized header label, e.g. "SEC. 2" or "Article 7".
    pub header: Option<String>,

    /// Byte offset of the header token (or of the first marker for flat scopes).
    pub start: usize,

    /// Byte offset one past the scope.
    pub end: usize,

    /// Leaf spans in document order.
    pub spans: Vec<RawSpan>,
}

/// Result of segmenting one normalized text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub scopes: Vec<Scope>,
}

impl Segmentation {
    /// Total number of leaf spans across all scopes.
    #[must_use]
    pub fn span_count(&self) -> usize {
        self.scopes.iter().map(|s| s.spans.len()).sum()
    }

    /// Check whether no boundary was recognized at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// The sink-facing record for one provision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRecord {
    /// Document title.
    pub kb: String,

    /// Marker label; `null` when the leaf had no marker.
    pub article_number: Option<String>,

    /// Enclosing header label, or the grammar's flat type.
    #[serde(rename = "type")]
    pub kind: String,

    /// Cleaned body text.
    pub text: String,

    pub word_count: usize,

    /// 1-based position among emitted records, flat grammars only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_number: Option<usize>,
}

/// Records produced for one document, with the observations made on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedDocument {
    pub title: DocumentTitle,
    pub records: Vec<StructuredRecord>,

    /// Number of header scopes recognized.
    pub scopes: usize,

    /// Leaf spans dropped as empty or below the word threshold.
    pub skipped: usize,
}

/// Summary of one pipeline run, reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub title: String,
    pub grammar: String,
    pub pages: usize,
    pub scopes: usize,
    pub emitted: usize,
    pub skipped: usize,

    /// Where the sink put the records.
    pub destination: String,
}

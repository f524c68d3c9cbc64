//! Boundary matchers for headers and sub-item markers.

use regex::{Captures, Regex};

use super::types::HeaderLabel;
use crate::error::{Result, SegmenterError};

/// One recognized boundary token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryMatch {
    /// Byte offset where the token starts.
    pub start: usize,

    /// Byte offset one past the token.
    pub end: usize,

    /// Normalized label extracted from the token.
    pub label: String,
}

/// Trait for the two matcher roles of a grammar.
///
/// Implementations locate the next boundary at or after an offset without
/// letting the token extend past `limit`.
pub trait BoundaryMatcher {
    /// Find the next boundary starting at or after `offset` and ending at or
    /// before `limit`.
    fn find_at(&self, text: &str, offset: usize, limit: usize) -> Option<BoundaryMatch>;

    /// Find all boundaries in `text[start..end]`, in order.
    fn find_all_within(&self, text: &str, start: usize, end: usize) -> Vec<BoundaryMatch> {
        let mut matches = Vec::new();
        let mut offset = start;

        while offset <= end {
            let Some(found) = self.find_at(text, offset, end) else {
                break;
            };
            offset = found.end;
            matches.push(found);
        }

        matches
    }
}

/// Matcher for top-level boundaries ("SEC. 2", "Article 7").
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    pattern: Regex,
    label: HeaderLabel,
}

impl HeaderMatcher {
    /// Compile a header matcher.
    pub fn new(pattern: &str, label: HeaderLabel) -> Result<Self> {
        let pattern = compile("header_pattern", pattern)?;
        Ok(Self { pattern, label })
    }

    /// Wrap an already compiled pattern.
    #[must_use]
    pub fn from_regex(pattern: Regex, label: HeaderLabel) -> Self {
        Self { pattern, label }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Find every header in the text.
    pub fn find_all(&self, text: &str) -> Vec<BoundaryMatch> {
        self.find_all_within(text, 0, text.len())
    }

    /// Build the record label for one header match.
    fn label_for(&self, caps: &Captures<'_>, token: &str) -> String {
        let token = collapse_spaces(token);
        match &self.label {
            HeaderLabel::Verbatim => token,
            HeaderLabel::Uppercase => token.to_uppercase(),
            HeaderLabel::Template(template) => match caps.name("number") {
                Some(number) => template.replace("{number}", number.as_str()),
                None => token,
            },
        }
    }
}

impl BoundaryMatcher for HeaderMatcher {
    fn find_at(&self, text: &str, offset: usize, limit: usize) -> Option<BoundaryMatch> {
        let haystack = text.get(..limit)?;
        let caps = next_non_empty(&self.pattern, haystack, offset)?;
        let whole = caps.get(0)?;
        Some(BoundaryMatch {
            start: whole.start(),
            end: whole.end(),
            label: self.label_for(&caps, whole.as_str()),
        })
    }
}

/// Matcher for sub-item boundaries ("(a)", "(12)", "(iv)", "3.").
///
/// The label comes from the `marker` capture group when the pattern has
/// one, otherwise from the whole token; either way it is passed through
/// [`clean_marker`].
#[derive(Debug, Clone)]
pub struct MarkerMatcher {
    pattern: Regex,
}

impl MarkerMatcher {
    /// Compile a marker matcher.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = compile("marker_pattern", pattern)?;
        Ok(Self { pattern })
    }

    /// Wrap an already compiled pattern.
    #[must_use]
    pub fn from_regex(pattern: Regex) -> Self {
        Self { pattern }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl BoundaryMatcher for MarkerMatcher {
    fn find_at(&self, text: &str, offset: usize, limit: usize) -> Option<BoundaryMatch> {
        let haystack = text.get(..limit)?;
        let mut offset = offset;

        loop {
            let caps = next_non_empty(&self.pattern, haystack, offset)?;
            let whole = caps.get(0)?;
            let raw = caps.name("marker").map_or(whole.as_str(), |m| m.as_str());
            let label = clean_marker(raw);

            // A token like "()" carries no label and is not a boundary.
            if !label.is_empty() {
                return Some(BoundaryMatch {
                    start: whole.start(),
                    end: whole.end(),
                    label,
                });
            }
            offset = whole.end();
        }
    }
}

/// Strip parentheses, trailing punctuation and whitespace from a marker.
///
/// # Examples
/// ```
/// use statute_segmenter::grammar::clean_marker;
///
/// assert_eq!(clean_marker("(a) "), "a");
/// assert_eq!(clean_marker("( iv )"), "iv");
/// assert_eq!(clean_marker("27."), "27");
/// ```
#[must_use]
pub fn clean_marker(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '.' | ':' | ',' | ';' | '°'))
        .to_string()
}

fn compile(field: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| SegmenterError::InvalidPattern {
        field: field.to_string(),
        source,
    })
}

/// Next match at or after `offset`, skipping empty matches.
fn next_non_empty<'h>(pattern: &Regex, haystack: &'h str, offset: usize) -> Option<Captures<'h>> {
    let mut offset = offset;
    while offset <= haystack.len() {
        let caps = pattern.captures_at(haystack, offset)?;
        let whole = caps.get(0)?;
        if !whole.is_empty() {
            return Some(caps);
        }
        offset = next_char_boundary(haystack, whole.end());
    }
    None
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    text.get(index..)
        .and_then(|rest| rest.chars().next())
        .map_or(text.len() + 1, |c| index + c.len_utf8())
}

fn collapse_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

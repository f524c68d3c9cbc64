//! Types for boundary grammars.

use std::borrow::Cow;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::matcher::{HeaderMatcher, MarkerMatcher};
use crate::config::{DEFAULT_FLAT_TYPE, DEFAULT_MIN_WORDS};
use crate::error::{Result, SegmenterError};

/// What to do with text between a header and its first marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChapeauPolicy {
    /// Discard the introductory text.
    #[default]
    Drop,

    /// Emit it as an unlabeled leaf before the first marker leaf.
    Keep,
}

/// What to do with leaves below the minimum word count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShortLeafPolicy {
    /// Discard the leaf.
    #[default]
    Drop,

    /// Prepend the leaf's text to the next leaf in the same scope.
    MergeForward,
}

/// How a header match is turned into a record `type` label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLabel {
    /// The matched token with whitespace collapsed ("SEC. 2").
    Verbatim,

    /// The matched token, uppercased ("SECTION 3").
    Uppercase,

    /// A template where `{number}` is replaced by the `number` capture group.
    Template(String),
}

impl HeaderLabel {
    /// Parse a label policy from its configuration form.
    ///
    /// `verbatim` and `uppercase` select those policies; anything else is a
    /// template.
    ///
    /// # Examples
    /// ```
    /// use statute_segmenter::grammar::HeaderLabel;
    ///
    /// assert_eq!(HeaderLabel::parse("verbatim"), HeaderLabel::Verbatim);
    /// assert_eq!(
    ///     HeaderLabel::parse("Article {number}"),
    ///     HeaderLabel::Template("Article {number}".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "verbatim" => Self::Verbatim,
            "uppercase" => Self::Uppercase,
            template => Self::Template(template.to_string()),
        }
    }
}

/// A scanner-artifact pattern replaced by a single space.
#[derive(Debug, Clone)]
pub struct NoiseRule {
    pattern: Regex,
}

impl NoiseRule {
    /// Compile a noise rule from a pattern string.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| SegmenterError::InvalidPattern {
            field: "noise_rules".to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    /// Wrap an already compiled pattern.
    #[must_use]
    pub fn from_regex(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// The pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Replace every occurrence with a single space.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, " ")
    }
}

/// Declarative description of one document family's boundaries.
///
/// A grammar with a header matcher is nested (header scope, then marker
/// spans); without one it is flat (marker spans over the whole text).
/// Grammars are built once with the `with_*` methods and then only read.
#[derive(Debug, Clone)]
pub struct BoundaryGrammar {
    name: String,
    description: String,
    header: Option<HeaderMatcher>,
    marker: MarkerMatcher,
    enactment_phrase: Option<String>,
    noise_rules: Vec<NoiseRule>,
    min_words: usize,
    chapeau: ChapeauPolicy,
    short_leaves: ShortLeafPolicy,
    flat_type: String,
}

impl BoundaryGrammar {
    /// Create a flat grammar from its marker matcher.
    #[must_use]
    pub fn new(name: impl Into<String>, marker: MarkerMatcher) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            header: None,
            marker,
            enactment_phrase: None,
            noise_rules: Vec::new(),
            min_words: DEFAULT_MIN_WORDS,
            chapeau: ChapeauPolicy::default(),
            short_leaves: ShortLeafPolicy::default(),
            flat_type: DEFAULT_FLAT_TYPE.to_string(),
        }
    }

    /// Set a one-line description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Make the grammar nested under the given header matcher.
    #[must_use]
    pub fn with_header(mut self, header: HeaderMatcher) -> Self {
        self.header = Some(header);
        self
    }

    /// Set the enactment phrase; an empty phrase clears it.
    #[must_use]
    pub fn with_enactment_phrase(mut self, phrase: impl Into<String>) -> Self {
        let phrase = phrase.into();
        self.enactment_phrase = (!phrase.is_empty()).then_some(phrase);
        self
    }

    /// Append a noise rule.
    #[must_use]
    pub fn with_noise_rule(mut self, rule: NoiseRule) -> Self {
        self.noise_rules.push(rule);
        self
    }

    /// Set the minimum word count.
    #[must_use]
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    /// Set the chapeau policy.
    #[must_use]
    pub fn with_chapeau(mut self, chapeau: ChapeauPolicy) -> Self {
        self.chapeau = chapeau;
        self
    }

    /// Set the short-leaf policy.
    #[must_use]
    pub fn with_short_leaves(mut self, short_leaves: ShortLeafPolicy) -> Self {
        self.short_leaves = short_leaves;
        self
    }

    /// Set the record type used when there are no headers.
    #[must_use]
    pub fn with_flat_type(mut self, flat_type: impl Into<String>) -> Self {
        self.flat_type = flat_type.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn header(&self) -> Option<&HeaderMatcher> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn marker(&self) -> &MarkerMatcher {
        &self.marker
    }

    #[must_use]
    pub fn enactment_phrase(&self) -> Option<&str> {
        self.enactment_phrase.as_deref()
    }

    #[must_use]
    pub fn noise_rules(&self) -> &[NoiseRule] {
        &self.noise_rules
    }

    #[must_use]
    pub fn min_words(&self) -> usize {
        self.min_words
    }

    #[must_use]
    pub fn chapeau(&self) -> ChapeauPolicy {
        self.chapeau
    }

    #[must_use]
    pub fn short_leaves(&self) -> ShortLeafPolicy {
        self.short_leaves
    }

    #[must_use]
    pub fn flat_type(&self) -> &str {
        &self.flat_type
    }

    /// Check whether records from this grammar carry entry numbers.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.header.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> MarkerMatcher {
        MarkerMatcher::new(r"\(\d+\)").unwrap()
    }

    #[test]
    fn test_grammar_builder() {
        let grammar = BoundaryGrammar::new("custom", marker())
            .with_description("Custom grammar")
            .with_header(HeaderMatcher::new(r"(?i)\bSEC\.?\s*\d+", HeaderLabel::Verbatim).unwrap())
            .with_enactment_phrase("BE IT ENACTED")
            .with_noise_rule(NoiseRule::new(r"Page \d+").unwrap())
            .with_min_words(3)
            .with_chapeau(ChapeauPolicy::Keep)
            .with_short_leaves(ShortLeafPolicy::MergeForward)
            .with_flat_type("Point");

        assert_eq!(grammar.name(), "custom");
        assert_eq!(grammar.description(), "Custom grammar");
        assert!(!grammar.is_flat());
        assert_eq!(grammar.enactment_phrase(), Some("BE IT ENACTED"));
        assert_eq!(grammar.noise_rules().len(), 1);
        assert_eq!(grammar.min_words(), 3);
        assert_eq!(grammar.chapeau(), ChapeauPolicy::Keep);
        assert_eq!(grammar.short_leaves(), ShortLeafPolicy::MergeForward);
        assert_eq!(grammar.flat_type(), "Point");
    }

    #[test]
    fn test_grammar_defaults() {
        let grammar = BoundaryGrammar::new("flat", marker());
        assert!(grammar.is_flat());
        assert_eq!(grammar.min_words(), 2);
        assert_eq!(grammar.chapeau(), ChapeauPolicy::Drop);
        assert_eq!(grammar.short_leaves(), ShortLeafPolicy::Drop);
        assert_eq!(grammar.flat_type(), "Section");
        assert!(grammar.enactment_phrase().is_none());
    }

    #[test]
    fn test_empty_enactment_phrase_is_cleared() {
        let grammar = BoundaryGrammar::new("flat", marker()).with_enactment_phrase("");
        assert!(grammar.enactment_phrase().is_none());
    }

    #[test]
    fn test_noise_rule_apply() {
        let rule = NoiseRule::new(r"—\s*\d+\s*—\s*Ch\.\s*\d+").unwrap();
        assert_eq!(rule.apply("end. — 2 — Ch. 321 next"), "end.   next");
    }

    #[test]
    fn test_noise_rule_invalid_pattern() {
        let err = NoiseRule::new("(unclosed").unwrap_err();
        assert!(err.to_string().contains("noise_rules"));
    }

    #[test]
    fn test_header_label_parse() {
        assert_eq!(HeaderLabel::parse("uppercase"), HeaderLabel::Uppercase);
        assert_eq!(HeaderLabel::parse(" verbatim "), HeaderLabel::Verbatim);
        assert_eq!(
            HeaderLabel::parse("Art. {number}"),
            HeaderLabel::Template("Art. {number}".to_string())
        );
    }

    #[test]
    fn test_policies_deserialize_kebab_case() {
        let policy: ShortLeafPolicy = serde_yaml_ng::from_str("merge-forward").unwrap();
        assert_eq!(policy, ShortLeafPolicy::MergeForward);
        let chapeau: ChapeauPolicy = serde_yaml_ng::from_str("keep").unwrap();
        assert_eq!(chapeau, ChapeauPolicy::Keep);
    }
}

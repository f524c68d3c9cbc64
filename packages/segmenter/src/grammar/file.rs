//! YAML grammar files.
//!
//! A grammar file describes a document family as data:
//!
//! ```yaml
//! name: florida
//! header_pattern: '(?i)\bSection\s+(?P<number>\d+)\.'
//! header_label: 'Section {number}'
//! marker_pattern: '\(\s*(?:[a-z]|\d{1,2})\s*\)\s+'
//! enactment_phrase: 'Be It Enacted by the Legislature of the State of Florida:'
//! noise_rules:
//!   - 'CODING: Words stricken are deletions; words underlined are additions\.'
//! min_words: 2
//! chapeau: keep
//! short_leaves: merge-forward
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::matcher::{HeaderMatcher, MarkerMatcher};
use super::types::{BoundaryGrammar, ChapeauPolicy, HeaderLabel, NoiseRule, ShortLeafPolicy};
use crate::config::DEFAULT_MIN_WORDS;
use crate::error::Result;

fn default_min_words() -> usize {
    DEFAULT_MIN_WORDS
}

/// On-disk form of a [`BoundaryGrammar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarFile {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Omit for a flat grammar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_pattern: Option<String>,

    /// `verbatim` (default), `uppercase`, or a template using `{number}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_label: Option<String>,

    pub marker_pattern: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enactment_phrase: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub noise_rules: Vec<String>,

    #[serde(default = "default_min_words")]
    pub min_words: usize,

    #[serde(default)]
    pub chapeau: ChapeauPolicy,

    #[serde(default)]
    pub short_leaves: ShortLeafPolicy,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_type: Option<String>,
}

impl GrammarFile {
    /// Parse a grammar file from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Compile the patterns and build the grammar.
    pub fn into_grammar(self) -> Result<BoundaryGrammar> {
        let marker = MarkerMatcher::new(&self.marker_pattern)?;
        let mut grammar = BoundaryGrammar::new(self.name, marker)
            .with_min_words(self.min_words)
            .with_chapeau(self.chapeau)
            .with_short_leaves(self.short_leaves);

        if let Some(description) = self.description {
            grammar = grammar.with_description(description);
        }

        if let Some(pattern) = self.header_pattern {
            let label = self
                .header_label
                .as_deref()
                .map_or(HeaderLabel::Verbatim, HeaderLabel::parse);
            grammar = grammar.with_header(HeaderMatcher::new(&pattern, label)?);
        }

        if let Some(phrase) = self.enactment_phrase {
            grammar = grammar.with_enactment_phrase(phrase);
        }

        for rule in &self.noise_rules {
            grammar = grammar.with_noise_rule(NoiseRule::new(rule)?);
        }

        if let Some(flat_type) = self.flat_type {
            grammar = grammar.with_flat_type(flat_type);
        }

        Ok(grammar)
    }
}

/// Load and compile a grammar file.
pub fn load_grammar_file(path: &Path) -> Result<BoundaryGrammar> {
    let yaml = fs::read_to_string(path)?;
    let grammar = GrammarFile::from_yaml(&yaml)?.into_grammar()?;
    tracing::debug!(
        path = %path.display(),
        grammar = grammar.name(),
        "Loaded grammar file"
    );
    Ok(grammar)
}

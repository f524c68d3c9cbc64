//! Named grammar registry.

use std::collections::BTreeMap;

use super::presets::{
    create_california_grammar, create_eu_regulation_grammar, create_numbered_points_grammar,
    create_plain_sections_grammar,
};
use super::types::BoundaryGrammar;
use crate::error::{Result, SegmenterError};

/// Registry of grammars by name.
pub struct GrammarRegistry {
    grammars: BTreeMap<String, BoundaryGrammar>,
}

impl GrammarRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grammars: BTreeMap::new(),
        }
    }

    /// Create a registry holding every preset grammar.
    #[must_use]
    pub fn with_presets() -> Self {
        let mut registry = Self::new();
        registry.register(create_california_grammar());
        registry.register(create_eu_regulation_grammar());
        registry.register(create_numbered_points_grammar());
        registry.register(create_plain_sections_grammar());
        registry
    }

    /// Register a grammar under its own name, replacing any previous one.
    pub fn register(&mut self, grammar: BoundaryGrammar) {
        self.grammars.insert(grammar.name().to_string(), grammar);
    }

    /// Look up a grammar by name.
    pub fn get(&self, name: &str) -> Result<&BoundaryGrammar> {
        self.grammars
            .get(name)
            .ok_or_else(|| SegmenterError::UnknownGrammar {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.grammars.keys().map(String::as_str).collect()
    }

    /// Iterate over the registered grammars in name order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundaryGrammar> {
        self.grammars.values()
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::MarkerMatcher;

    #[test]
    fn test_registry_presets() {
        let registry = GrammarRegistry::with_presets();
        assert_eq!(
            registry.names(),
            vec!["california", "eu-regulation", "numbered-points", "plain-sections"]
        );
        assert!(registry.get("california").is_ok());
    }

    #[test]
    fn test_registry_unknown_grammar() {
        let registry = GrammarRegistry::with_presets();
        let err = registry.get("texas").unwrap_err();
        assert!(err.to_string().contains("texas"));
        assert!(err.to_string().contains("eu-regulation"));
    }

    #[test]
    fn test_registry_register_replaces() {
        let mut registry = GrammarRegistry::new();
        let marker = MarkerMatcher::new(r"\(\d+\)").unwrap();
        registry.register(BoundaryGrammar::new("custom", marker.clone()).with_min_words(1));
        registry.register(BoundaryGrammar::new("custom", marker).with_min_words(5));

        assert_eq!(registry.names(), vec!["custom"]);
        assert_eq!(registry.get("custom").unwrap().min_words(), 5);
        assert_eq!(registry.iter().count(), 1);
    }
}

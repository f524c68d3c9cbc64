//! Boundary grammars for legal document segmentation.
//!
//! A grammar is data: a header matcher (optional), a marker matcher, an
//! enactment phrase, noise rules and the leaf policies. New document
//! families are supported by supplying a new grammar, never by branching
//! inside the segmenter.

mod file;
mod matcher;
mod presets;
mod registry;
mod types;

pub use file::{load_grammar_file, GrammarFile};
pub use matcher::{clean_marker, BoundaryMatch, BoundaryMatcher, HeaderMatcher, MarkerMatcher};
pub use presets::{
    create_california_grammar, create_eu_regulation_grammar, create_numbered_points_grammar,
    create_plain_sections_grammar, CALIFORNIA_ENACTMENT_PHRASE, EU_ENACTMENT_PHRASE,
};
pub use registry::GrammarRegistry;
pub use types::{BoundaryGrammar, ChapeauPolicy, HeaderLabel, NoiseRule, ShortLeafPolicy};

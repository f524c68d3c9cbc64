//! Statute Segmenter - Split OCR'd legal documents into structured provisions.
//!
//! This crate turns the raw text of scanned statutes and regulations into
//! an ordered list of JSON-ready records, one per provision, tagged with the
//! enclosing section header and the provision's own marker.
//!
//! # Example
//!
//! ```
//! use statute_segmenter::grammar::create_california_grammar;
//! use statute_segmenter::{segment_document, DocumentTitle};
//!
//! let title = DocumentTitle::new("California_state_law").unwrap();
//! let doc = segment_document(
//!     "SEC. 1 (a) One two three. (b) x. SEC. 2 (a) Four five six seven.",
//!     &title,
//!     &create_california_grammar(),
//! );
//!
//! assert_eq!(doc.records.len(), 2);
//! assert_eq!(doc.records[1].kind, "SEC. 2");
//! ```
//!
//! # Architecture
//!
//! The segmenter is organized into several modules:
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Core data types (spans, scopes, records)
//! - [`error`]: Error types and Result alias
//! - [`grammar`]: Boundary grammars, presets and grammar files
//! - [`normalize`]: Text normalization
//! - [`segment`]: Hierarchical segmenter
//! - [`builder`]: Record construction and filtering
//! - [`ocr`]: Page text providers
//! - [`sink`]: Record sinks
//! - [`cli`]: Command-line interface
//! - [`pipeline`]: Pipeline driver

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod grammar;
pub mod normalize;
pub mod ocr;
pub mod pipeline;
pub mod segment;
pub mod sink;
pub mod types;

// Re-export main functions
pub use pipeline::{join_pages, run, segment_document};

// Re-export commonly used items
pub use error::{Result, SegmenterError};
pub use grammar::{BoundaryGrammar, GrammarRegistry};
pub use ocr::{OcrOptions, OcrProvider, PlainTextSource, TesseractOcr};
pub use sink::{JsonFileSink, MemorySink, RecordSink};
pub use types::{DocumentTitle, RunSummary, SegmentedDocument, StructuredRecord};

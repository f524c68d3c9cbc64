//! Error types for the segmenter.
//!
//! Only the two collaborator boundaries (OCR provider and sink) and
//! configuration can fail. Segmentation itself is infallible on string
//! input: documents without boundaries or with degenerate spans are
//! observations, not errors.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the segmenter library.
#[derive(Debug, Error)]
pub enum SegmenterError {
    /// Document title is empty or contains control characters.
    #[error("Invalid document title: '{0}'. Expected a non-empty single-line string")]
    InvalidTitle(String),

    /// Rasterization resolution outside the supported range.
    #[error("Invalid DPI: {0}. Expected a value between 72 and 1200")]
    InvalidDpi(u32),

    /// OCR language code not in tesseract's `eng` / `eng+fra` form.
    #[error("Invalid OCR language: '{0}'. Expected tesseract codes such as 'eng' or 'eng+fra'")]
    InvalidLanguage(String),

    /// No grammar registered under the requested name.
    #[error("Unknown grammar '{name}'. Available: {available}")]
    UnknownGrammar { name: String, available: String },

    /// A grammar pattern failed to compile.
    #[error("Invalid pattern in grammar field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// The external renderer or OCR program could not be started.
    #[error("OCR program '{program}' is unavailable: {source}")]
    RendererUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be rendered or recognized.
    #[error("Document {} is unreadable: {message}", .path.display())]
    DocumentUnreadable { path: PathBuf, message: String },

    /// The sink could not persist the records.
    #[error("Failed to write records to {}: {source}", .path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Grammar file could not be parsed.
    #[error("Grammar file parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for segmenter operations.
pub type Result<T> = std::result::Result<T, SegmenterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SegmenterError::InvalidDpi(10);
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("72 and 1200"));
    }

    #[test]
    fn test_unknown_grammar_lists_available() {
        let err = SegmenterError::UnknownGrammar {
            name: "texas".to_string(),
            available: "california, eu-regulation".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown grammar 'texas'. Available: california, eu-regulation"
        );
    }

    #[test]
    fn test_document_unreadable_display() {
        let err = SegmenterError::DocumentUnreadable {
            path: PathBuf::from("laws/missing.pdf"),
            message: "file not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Document laws/missing.pdf is unreadable: file not found"
        );
    }
}

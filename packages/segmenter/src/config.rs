//! Configuration constants and validation functions for the segmenter.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{Result, SegmenterError};

/// Default rasterization resolution for OCR.
pub const DEFAULT_DPI: u32 = 300;

/// Lowest accepted rasterization resolution.
pub const MIN_DPI: u32 = 72;

/// Highest accepted rasterization resolution.
///
/// Pages above this size make tesseract slow without improving recognition.
pub const MAX_DPI: u32 = 1200;

/// Default tesseract language.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Default minimum word count for an emitted record.
///
/// Two words keeps stray fragments like `text="a"` out of the output.
pub const DEFAULT_MIN_WORDS: usize = 2;

/// Record type used by flat grammars, which have no header labels.
pub const DEFAULT_FLAT_TYPE: &str = "Section";

/// Default output directory for JSON records.
pub const DEFAULT_OUTPUT_DIR: &str = "laws_json_file";

/// Text wrap width for CLI previews.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Separator placed between OCR pages; normalization collapses it.
pub const PAGE_SEPARATOR: &str = "\n\u{c}\n";

/// Tesseract language codes: three-letter codes joined by `+`,
/// optionally with a script suffix such as `chi_sim`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LANGUAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{3}(?:_[a-z]+)?(?:\+[a-z]{3}(?:_[a-z]+)?)*$").expect("valid regex")
});

/// Characters that may not appear in a title derived from a file name.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-.]+").expect("valid regex"));

/// Validate a document title.
///
/// # Examples
/// ```
/// use statute_segmenter::config::validate_title;
///
/// assert!(validate_title("California_state_law").is_ok());
/// assert!(validate_title("   ").is_err());
/// ```
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() || title.chars().any(char::is_control) {
        return Err(SegmenterError::InvalidTitle(title.to_string()));
    }
    Ok(())
}

/// Validate a rasterization resolution.
///
/// # Examples
/// ```
/// use statute_segmenter::config::validate_dpi;
///
/// assert!(validate_dpi(300).is_ok());
/// assert!(validate_dpi(10).is_err());
/// ```
pub fn validate_dpi(dpi: u32) -> Result<()> {
    if (MIN_DPI..=MAX_DPI).contains(&dpi) {
        Ok(())
    } else {
        Err(SegmenterError::InvalidDpi(dpi))
    }
}

/// Validate a tesseract language code (e.g. `eng`, `eng+fra`).
pub fn validate_language(language: &str) -> Result<()> {
    if LANGUAGE_PATTERN.is_match(language) {
        Ok(())
    } else {
        Err(SegmenterError::InvalidLanguage(language.to_string()))
    }
}

/// Derive a document title from a file path.
///
/// Uses the file stem with runs of unsafe characters replaced by `_`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use statute_segmenter::config::title_from_path;
///
/// assert_eq!(
///     title_from_path(Path::new("laws_pdf_file/EU Digital Service Act.pdf")),
///     Some("EU_Digital_Service_Act".to_string())
/// );
/// ```
pub fn title_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    let title = TITLE_UNSAFE.replace_all(stem.trim(), "_");
    let title = title.trim_matches('_');
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Default JSON output path for a document title.
pub fn default_output_path(title: &str) -> std::path::PathBuf {
    Path::new(DEFAULT_OUTPUT_DIR).join(format!("{title}.json"))
}

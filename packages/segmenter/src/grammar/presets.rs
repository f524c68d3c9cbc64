//! Ready-made grammars for the document families we process.

use regex::Regex;
use std::sync::LazyLock;

use super::matcher::{HeaderMatcher, MarkerMatcher};
use super::types::{BoundaryGrammar, ChapeauPolicy, HeaderLabel, NoiseRule};

/// Enactment clause of California statutes.
pub const CALIFORNIA_ENACTMENT_PHRASE: &str =
    "The people of the State of California do enact as follows";

/// Enactment clause of EU regulations.
pub const EU_ENACTMENT_PHRASE: &str = "HAVE ADOPTED THIS REGULATION:";

/// "SEC. 1", "SEC 2", "SECTION 3", "Section 27002".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CALIFORNIA_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:SEC\.?\s*\d+|SECTION\s+\d+)").expect("valid regex")
});

/// "(a)", "(aa)", "(1)" .. "(999)", "(i)" .. "(viii)", followed by whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PAREN_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*(?:[a-z]{1,2}|\d{1,3}|v?i{1,3})\s*\)\s+").expect("valid regex")
});

/// Chaptered-bill footer, e.g. "— 2 — Ch. 321".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CALIFORNIA_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"—\s*\d+\s*—\s*Ch\.\s*\d+").expect("valid regex"));

/// "Article 1", "ARTICLE 12".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EU_ARTICLE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bArticle\s+(?P<number>\d+)\b").expect("valid regex")
});

/// Numbered paragraph "1. " preceded by whitespace or scope start.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBERED_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(?P<marker>\d{1,3})\.\s+").expect("valid regex")
});

/// Official Journal running header in both page orientations:
/// "27.10.2022 EN Official Journal of the European Union L 277/1" and
/// "L 277/2 EN Official Journal of the European Union 27.10.2022".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static OFFICIAL_JOURNAL_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\d{1,2}\.\d{1,2}\.\d{4}\s+EN\s+Official Journal of the European Union\s+L\s*\d+/\d+|L\s*\d+/\d+\s+EN\s+Official Journal of the European Union\s+\d{1,2}\.\d{1,2}\.\d{4})",
    )
    .expect("valid regex")
});

/// "(27)" or "27." followed by whitespace or end of text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBERED_POINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\d{1,3}\)|\b\d{1,3}\.(?:\s|$)").expect("valid regex")
});

/// "SECTION 4" or "Section 4", case-sensitive as printed.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLAIN_SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:SECTION|Section)\s+\d+").expect("valid regex")
});

/// Create the grammar for California chaptered bills.
///
/// ```text
/// SEC. 2            -> type
/// ├── (a) ...       -> article_number "a"
/// ├── (b) ...
/// │   (1) ...       -> article_number "1" (flattened)
/// ```
#[must_use]
pub fn create_california_grammar() -> BoundaryGrammar {
    BoundaryGrammar::new("california", MarkerMatcher::from_regex(PAREN_MARKER.clone()))
        .with_description("California statutes: SEC./SECTION headers with (a), (1), (iv) markers")
        .with_header(HeaderMatcher::from_regex(
            CALIFORNIA_HEADER.clone(),
            HeaderLabel::Verbatim,
        ))
        .with_enactment_phrase(CALIFORNIA_ENACTMENT_PHRASE)
        .with_noise_rule(NoiseRule::from_regex(CALIFORNIA_FOOTER.clone()))
}

/// Create the grammar for EU regulations.
///
/// Articles are split into their numbered paragraphs ("1.", "2.").
#[must_use]
pub fn create_eu_regulation_grammar() -> BoundaryGrammar {
    BoundaryGrammar::new(
        "eu-regulation",
        MarkerMatcher::from_regex(NUMBERED_PARAGRAPH.clone()),
    )
    .with_description("EU regulations: Article N headers with numbered paragraphs")
    .with_header(HeaderMatcher::from_regex(
        EU_ARTICLE_HEADER.clone(),
        HeaderLabel::Template("Article {number}".to_string()),
    ))
    .with_enactment_phrase(EU_ENACTMENT_PHRASE)
    .with_noise_rule(NoiseRule::from_regex(OFFICIAL_JOURNAL_HEADER.clone()))
}

/// Create the flat grammar for documents made of numbered points only.
#[must_use]
pub fn create_numbered_points_grammar() -> BoundaryGrammar {
    BoundaryGrammar::new(
        "numbered-points",
        MarkerMatcher::from_regex(NUMBERED_POINT.clone()),
    )
    .with_description("Flat numbered points: (27) or 27., numbered entries")
}

/// Create the grammar for already-extracted plain text with SECTION headers.
///
/// Keeps text between a section header and its first point, and accepts
/// single-word entries.
#[must_use]
pub fn create_plain_sections_grammar() -> BoundaryGrammar {
    BoundaryGrammar::new(
        "plain-sections",
        MarkerMatcher::from_regex(NUMBERED_POINT.clone()),
    )
    .with_description("Plain text: SECTION N headers with (1) or 1. points, intro text kept")
    .with_header(HeaderMatcher::from_regex(
        PLAIN_SECTION_HEADER.clone(),
        HeaderLabel::Verbatim,
    ))
    .with_chapeau(ChapeauPolicy::Keep)
    .with_min_words(1)
}

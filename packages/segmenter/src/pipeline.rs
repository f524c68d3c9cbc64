//! Pipeline driver that ties all components together.

use std::path::Path;

use crate::builder::EntryBuilder;
use crate::config::PAGE_SEPARATOR;
use crate::error::Result;
use crate::grammar::BoundaryGrammar;
use crate::normalize::normalize;
use crate::ocr::{OcrOptions, OcrProvider};
use crate::segment::Segmenter;
use crate::sink::RecordSink;
use crate::types::{DocumentTitle, RunSummary, SegmentedDocument};

/// Join page texts in order.
///
/// # Examples
/// ```
/// use statute_segmenter::normalize::collapse_whitespace;
/// use statute_segmenter::pipeline::join_pages;
///
/// let joined = join_pages(&["(1) Alpha".to_string(), "beta.".to_string()]);
/// assert_eq!(collapse_whitespace(&joined), "(1) Alpha beta.");
/// ```
#[must_use]
pub fn join_pages(pages: &[String]) -> String {
    pages.join(PAGE_SEPARATOR)
}

/// Normalize, segment and build records for one document's raw text.
///
/// A document without any recognizable boundary yields no records; that is
/// logged, not treated as an error.
pub fn segment_document(
    raw_text: &str,
    title: &DocumentTitle,
    grammar: &BoundaryGrammar,
) -> SegmentedDocument {
    let text = normalize(raw_text, grammar);
    let segmentation = Segmenter::new(grammar).segment(&text);

    if segmentation.is_empty() {
        tracing::info!(
            title = %title,
            grammar = grammar.name(),
            chars = text.len(),
            "No boundaries found"
        );
    }

    let outcome = EntryBuilder::new(grammar, title).build_all(&text, &segmentation);

    tracing::debug!(
        title = %title,
        scopes = segmentation.scopes.len(),
        spans = segmentation.span_count(),
        emitted = outcome.records.len(),
        skipped = outcome.skipped,
        "Segmented document"
    );

    SegmentedDocument {
        title: title.clone(),
        records: outcome.records,
        scopes: segmentation.scopes.len(),
        skipped: outcome.skipped,
    }
}

/// Run one document through the pipeline.
///
/// # Arguments
/// * `provider` - Source of page texts
/// * `document` - Path to the source document
/// * `options` - Options passed to the provider
/// * `title` - Tag for every emitted record
/// * `grammar` - Boundary grammar of the document family
/// * `sink` - Destination of the records
///
/// # Returns
/// A `RunSummary` with counts and the sink's destination
pub fn run<P, S>(
    provider: &P,
    document: &Path,
    options: &OcrOptions,
    title: &DocumentTitle,
    grammar: &BoundaryGrammar,
    sink: &mut S,
) -> Result<RunSummary>
where
    P: OcrProvider + ?Sized,
    S: RecordSink + ?Sized,
{
    let pages = provider.recognize(document, options)?;
    let raw_text = join_pages(&pages);

    let segmented = segment_document(&raw_text, title, grammar);
    let destination = sink.accept(title, &segmented.records)?;

    let summary = RunSummary {
        title: title.to_string(),
        grammar: grammar.name().to_string(),
        pages: pages.len(),
        scopes: segmented.scopes,
        emitted: segmented.records.len(),
        skipped: segmented.skipped,
        destination,
    };

    tracing::info!(
        title = %summary.title,
        grammar = %summary.grammar,
        pages = summary.pages,
        scopes = summary.scopes,
        emitted = summary.emitted,
        skipped = summary.skipped,
        destination = %summary.destination,
        "Run complete"
    );

    Ok(summary)
}

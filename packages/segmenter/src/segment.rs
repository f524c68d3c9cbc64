//! Hierarchical segmenter.
//!
//! Walks normalized text once and carves it into header scopes and the
//! marker spans inside them. Header boundaries are always resolved first;
//! markers are only searched inside one header's body, so a marker pattern
//! never swallows a header token.

use crate::grammar::{BoundaryGrammar, BoundaryMatcher, ChapeauPolicy, HeaderMatcher};
use crate::types::{RawSpan, Scope, Segmentation};

/// Segmenter for one grammar.
pub struct Segmenter<'g> {
    grammar: &'g BoundaryGrammar,
}

impl<'g> Segmenter<'g> {
    /// Create a segmenter over a grammar.
    #[must_use]
    pub fn new(grammar: &'g BoundaryGrammar) -> Self {
        Self { grammar }
    }

    /// Segment normalized text into scopes of leaf spans.
    ///
    /// Returns an empty segmentation when no boundary is recognized.
    pub fn segment(&self, text: &str) -> Segmentation {
        match self.grammar.header() {
            Some(header) => self.segment_nested(text, header),
            None => self.segment_flat(text),
        }
    }

    /// Two-level segmentation: header scopes, then markers inside each.
    ///
    /// Text before the first header belongs to no scope and is dropped.
    fn segment_nested(&self, text: &str, header: &HeaderMatcher) -> Segmentation {
        let headers = header.find_all(text);
        let mut scopes = Vec::with_capacity(headers.len());

        for (i, found) in headers.iter().enumerate() {
            let scope_end = headers.get(i + 1).map_or(text.len(), |next| next.start);
            let spans = self.split_scope(text, found.end, scope_end);

            tracing::debug!(
                header = %found.label,
                spans = spans.len(),
                "Segmented scope"
            );

            scopes.push(Scope {
                header: Some(found.label.clone()),
                start: found.start,
                end: scope_end,
                spans,
            });
        }

        Segmentation { scopes }
    }

    /// Split one scope body into leaf spans.
    ///
    /// A body without markers is a single unlabeled leaf so its content is
    /// not lost. With markers, text before the first one is chapeau text and
    /// follows the grammar's chapeau policy.
    fn split_scope(&self, text: &str, body_start: usize, scope_end: usize) -> Vec<RawSpan> {
        let markers = self
            .grammar
            .marker()
            .find_all_within(text, body_start, scope_end);

        let Some(first) = markers.first() else {
            return vec![RawSpan::unlabeled(body_start, scope_end)];
        };

        let mut spans = Vec::with_capacity(markers.len() + 1);

        let chapeau = RawSpan::unlabeled(body_start, first.start);
        if self.grammar.chapeau() == ChapeauPolicy::Keep && !chapeau.body(text).trim().is_empty() {
            spans.push(chapeau);
        }

        for (i, marker) in markers.iter().enumerate() {
            let end = markers.get(i + 1).map_or(scope_end, |next| next.start);
            spans.push(RawSpan::labeled(
                marker.label.clone(),
                marker.start,
                marker.end,
                end,
            ));
        }

        spans
    }

    /// Single-level segmentation over the whole text.
    ///
    /// Text before the first marker is dropped; no markers means no spans.
    fn segment_flat(&self, text: &str) -> Segmentation {
        let markers = self.grammar.marker().find_all_within(text, 0, text.len());

        let Some(first) = markers.first() else {
            return Segmentation::default();
        };

        let spans: Vec<RawSpan> = markers
            .iter()
            .enumerate()
            .map(|(i, marker)| {
                let end = markers.get(i + 1).map_or(text.len(), |next| next.start);
                RawSpan::labeled(marker.label.clone(), marker.start, marker.end, end)
            })
            .collect();

        tracing::debug!(spans = spans.len(), "Segmented flat document");

        Segmentation {
            scopes: vec![Scope {
                header: None,
                start: first.start,
                end: text.len(),
                spans,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{
        create_california_grammar, create_eu_regulation_grammar, create_numbered_points_grammar,
        HeaderLabel, MarkerMatcher,
    };
    use pretty_assertions::assert_eq;

    fn bodies<'t>(text: &'t str, segmentation: &Segmentation) -> Vec<(Option<String>, Option<String>, &'t str)> {
        segmentation
            .scopes
            .iter()
            .flat_map(|scope| {
                scope
                    .spans
                    .iter()
                    .map(move |span| (scope.header.clone(), span.label.clone(), span.body(text).trim()))
            })
            .collect()
    }

    #[test]
    fn test_nested_segmentation() {
        let grammar = create_california_grammar();
        let text = "SEC. 1 (a) One two three. (b) x. SEC. 2 (a) Four five six seven.";
        let segmentation = Segmenter::new(&grammar).segment(text);

        assert_eq!(segmentation.scopes.len(), 2);
        assert_eq!(
            bodies(text, &segmentation),
            vec![
                (Some("SEC. 1".into()), Some("a".into()), "One two three."),
                (Some("SEC. 1".into()), Some("b".into()), "x."),
                (Some("SEC. 2".into()), Some("a".into()), "Four five six seven."),
            ]
        );
    }

    #[test]
    fn test_text_before_first_header_is_dropped() {
        let grammar = create_california_grammar();
        let text = "Digest (a) not a provision. SEC. 1 (a) Real text.";
        let segmentation = Segmenter::new(&grammar).segment(text);

        assert_eq!(segmentation.scopes.len(), 1);
        assert_eq!(segmentation.scopes[0].start, 28);
        let all = bodies(text, &segmentation);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].2, "Real text.");
    }

    #[test]
    fn test_scope_without_markers_is_single_leaf() {
        let grammar = create_california_grammar();
        let text = "SEC. 3 This act shall take effect immediately.";
        let segmentation = Segmenter::new(&grammar).segment(text);

        assert_eq!(
            bodies(text, &segmentation),
            vec![(
                Some("SEC. 3".into()),
                None,
                "This act shall take effect immediately."
            )]
        );
    }

    #[test]
    fn test_chapeau_dropped_by_default() {
        let grammar = create_california_grammar();
        let text = "SEC. 2 The Legislature finds: (a) Children use services. (b) Design matters.";
        let segmentation = Segmenter::new(&grammar).segment(text);

        let labels: Vec<Option<String>> = bodies(text, &segmentation).into_iter().map(|b| b.1).collect();
        assert_eq!(labels, vec![Some("a".into()), Some("b".into())]);
    }

    #[test]
    fn test_chapeau_kept_when_configured() {
        let grammar = create_california_grammar().with_chapeau(ChapeauPolicy::Keep);
        let text = "SEC. 2 The Legislature finds: (a) Children use services.";
        let segmentation = Segmenter::new(&grammar).segment(text);

        assert_eq!(
            bodies(text, &segmentation),
            vec![
                (Some("SEC. 2".into()), None, "The Legislature finds:"),
                (Some("SEC. 2".into()), Some("a".into()), "Children use services."),
            ]
        );
    }

    #[test]
    fn test_spans_are_contiguous_within_scope() {
        let grammar = create_california_grammar().with_chapeau(ChapeauPolicy::Keep);
        let text = "SEC. 1 Intro (a) A text. (b) B text. (c) C text. SEC. 2 (a) D text.";
        let segmentation = Segmenter::new(&grammar).segment(text);

        for scope in &segmentation.scopes {
            for pair in scope.spans.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            let last = scope.spans.last().unwrap();
            assert_eq!(last.end, scope.end);
        }
        assert_eq!(segmentation.scopes[0].end, segmentation.scopes[1].start);
    }

    #[test]
    fn test_markers_never_cross_headers() {
        let grammar = create_california_grammar();
        let text = "SEC. 1 (a) First. SEC. 2 Second without markers.";
        let segmentation = Segmenter::new(&grammar).segment(text);

        assert_eq!(
            bodies(text, &segmentation),
            vec![
                (Some("SEC. 1".into()), Some("a".into()), "First."),
                (Some("SEC. 2".into()), None, "Second without markers."),
            ]
        );
    }

    #[test]
    fn test_header_takes_precedence_over_marker_at_same_offset() {
        // "(1)" is both a header here and a valid marker.
        let grammar = BoundaryGrammar::new("parens", MarkerMatcher::new(r"\(\d+\)\s+").unwrap())
            .with_header(HeaderMatcher::new(r"\(1\)", HeaderLabel::Verbatim).unwrap());
        let text = "(1) (2) Alpha beta. (3) Gamma delta.";
        let segmentation = Segmenter::new(&grammar).segment(text);

        assert_eq!(segmentation.scopes.len(), 1);
        assert_eq!(segmentation.scopes[0].header.as_deref(), Some("(1)"));
        let spans = &segmentation.scopes[0].spans;
        assert!(spans.iter().all(|s| s.start != 0));
        let labels: Vec<&str> = spans.iter().filter_map(|s| s.label.as_deref()).collect();
        assert_eq!(labels, vec!["2", "3"]);
    }

    #[test]
    fn test_flat_segmentation() {
        let grammar = create_numbered_points_grammar();
        let text = "Preamble. (1) Alpha beta gamma. (2) Delta epsilon.";
        let segmentation = Segmenter::new(&grammar).segment(text);

        assert_eq!(
            bodies(text, &segmentation),
            vec![
                (None, Some("1".into()), "Alpha beta gamma."),
                (None, Some("2".into()), "Delta epsilon."),
            ]
        );
    }

    #[test]
    fn test_eu_paragraphs() {
        let grammar = create_eu_regulation_grammar();
        let text = "Article 1 Subject matter 1. The aim is a safe environment. \
                    2. This Regulation lays down rules. Article 2 Scope This Regulation applies.";
        let segmentation = Segmenter::new(&grammar).segment(text);

        assert_eq!(
            bodies(text, &segmentation),
            vec![
                (Some("Article 1".into()), Some("1".into()), "The aim is a safe environment."),
                (Some("Article 1".into()), Some("2".into()), "This Regulation lays down rules."),
                (Some("Article 2".into()), None, "Scope This Regulation applies."),
            ]
        );
    }

    #[test]
    fn test_no_boundaries_yields_empty_segmentation() {
        let text = "Plain prose without any recognizable structure.";
        for grammar in [create_california_grammar(), create_numbered_points_grammar()] {
            let segmentation = Segmenter::new(&grammar).segment(text);
            assert!(segmentation.is_empty());
        }
        assert!(Segmenter::new(&create_california_grammar()).segment("").is_empty());
    }
}

//! End-to-end integration tests for the segmenter pipeline.
//!
//! Runs text fixtures shaped like OCR output of real statutes through the
//! library API, from raw pages to the JSON written by the file sink.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use statute_segmenter::grammar::{
    create_california_grammar, create_eu_regulation_grammar, create_numbered_points_grammar,
    load_grammar_file, BoundaryGrammar,
};
use statute_segmenter::{
    run, segment_document, DocumentTitle, JsonFileSink, MemorySink, OcrOptions, PlainTextSource,
    StructuredRecord,
};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn segment_fixture(name: &str, title: &str, grammar: &BoundaryGrammar) -> Vec<StructuredRecord> {
    let title = DocumentTitle::new(title).unwrap();
    segment_document(&load_fixture(name), &title, grammar).records
}

fn summarize(records: &[StructuredRecord]) -> Vec<(&str, Option<&str>, &str)> {
    records
        .iter()
        .map(|r| (r.kind.as_str(), r.article_number.as_deref(), r.text.as_str()))
        .collect()
}

#[test]
fn test_california_fixture() {
    let records = segment_fixture(
        "california.txt",
        "California_state_law",
        &create_california_grammar(),
    );

    assert_eq!(
        summarize(&records),
        vec![
            (
                "SECTION 1",
                Some("a"),
                "The Legislature declares that children should be afforded protections not only \
                 by online products and services specifically directed at them."
            ),
            (
                "SEC. 2",
                Some("a"),
                "This title shall be known as the California Age-Appropriate Design Code Act."
            ),
            (
                "SEC. 2",
                Some("b"),
                "A business that provides an online service shall complete a Data Protection \
                 Impact Assessment."
            ),
            (
                "SEC. 3",
                None,
                "This act shall become operative on July 1, 2024."
            ),
        ]
    );

    assert_eq!(records[0].word_count, 20);
    assert_eq!(records[1].word_count, 12);
    assert!(records.iter().all(|r| r.kb == "California_state_law"));
    assert!(records.iter().all(|r| r.entry_number.is_none()));
}

#[test]
fn test_california_digest_is_ignored() {
    let records = segment_fixture("california.txt", "ab2273", &create_california_grammar());
    assert!(records
        .iter()
        .all(|r| !r.text.contains("Existing law") && !r.text.contains("Ch. 320")));
}

#[test]
fn test_eu_regulation_fixture() {
    let records = segment_fixture(
        "eu_regulation.txt",
        "EU_Digital_Service_Act",
        &create_eu_regulation_grammar(),
    );

    assert_eq!(
        summarize(&records),
        vec![
            (
                "Article 1",
                Some("1"),
                "The aim of this Regulation is to contribute to the proper functioning of the \
                 internal market for intermediary services."
            ),
            (
                "Article 1",
                Some("2"),
                "This Regulation lays down harmonised rules on the provision of intermediary \
                 services."
            ),
            (
                "Article 2",
                Some("1"),
                "This Regulation shall apply to intermediary services offered to recipients of \
                 the service."
            ),
            (
                "Article 2",
                Some("2"),
                "This Regulation shall not apply to any service that is not an intermediary \
                 service."
            ),
        ]
    );
    assert!(records.iter().all(|r| !r.text.contains("Official Journal")));
}

#[test]
fn test_numbered_points_fixture() {
    let records = segment_fixture(
        "numbered_points.txt",
        "points",
        &create_numbered_points_grammar(),
    );

    let got: Vec<(Option<usize>, Option<&str>, &str)> = records
        .iter()
        .map(|r| (r.entry_number, r.article_number.as_deref(), r.text.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (Some(1), Some("1"), "Online platforms play an important role in society."),
            (Some(2), Some("3"), "Providers should act diligently."),
            (Some(3), Some("27"), "Member States should designate competent authorities."),
        ]
    );
    assert!(records.iter().all(|r| r.kind == "Section"));
}

#[test]
fn test_grammar_file_fixture() {
    let grammar = load_grammar_file(&fixture_path("florida.yaml")).unwrap();
    let records = segment_fixture("florida.txt", "Florida_HB3", &grammar);

    assert_eq!(
        summarize(&records),
        vec![
            (
                "Section 1",
                None,
                "The following provisions are created to read:"
            ),
            (
                "Section 1",
                Some("1"),
                "As used in this section, the term account holder means a resident."
            ),
            (
                "Section 1",
                Some("2"),
                "A social media platform shall prohibit a minor from creating an account."
            ),
            (
                "Section 2",
                None,
                "This act shall take effect January 1, 2025."
            ),
        ]
    );
}

#[test]
fn test_segmentation_is_deterministic() {
    let grammar = create_eu_regulation_grammar();
    let first = segment_fixture("eu_regulation.txt", "dsa", &grammar);
    let second = segment_fixture("eu_regulation.txt", "dsa", &grammar);
    assert_eq!(first, second);
}

#[test]
fn test_run_text_source_into_memory() {
    let mut sink = MemorySink::new();
    let summary = run(
        &PlainTextSource,
        &fixture_path("california.txt"),
        &OcrOptions::default(),
        &DocumentTitle::new("California_state_law").unwrap(),
        &create_california_grammar(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(summary.pages, 1);
    assert_eq!(summary.scopes, 3);
    assert_eq!(summary.emitted, 4);
    assert_eq!(summary.skipped, 1);
    assert_eq!(sink.records().count(), 4);
}

#[test]
fn test_run_writes_json_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("laws_json_file").join("EU_Digital_Service_Act.json");

    let mut sink = JsonFileSink::new(&output);
    let summary = run(
        &PlainTextSource,
        &fixture_path("eu_regulation.txt"),
        &OcrOptions::default(),
        &DocumentTitle::new("EU_Digital_Service_Act").unwrap(),
        &create_eu_regulation_grammar(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(summary.destination, output.display().to_string());

    let json = fs::read_to_string(&output).unwrap();
    assert!(json.starts_with("[\n    {\n        \"kb\": \"EU_Digital_Service_Act\","));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value[0];
    assert_eq!(first["article_number"], "1");
    assert_eq!(first["type"], "Article 1");
    assert_eq!(first["word_count"], 19);
    assert!(first.get("entry_number").is_none());
}

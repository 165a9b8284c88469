//! Whole documents: header detection, schedules and closing material.

use crate::{parse, ParserConfig};
use pretty_assertions::assert_eq;
use statute_ir::{Alignment, Block, DivisionKind, DocType, Line, TagName};

fn centered(text: &str) -> Block {
    Block::Line(Line::new(text).centered())
}

fn act() -> Vec<Block> {
    vec![
        Block::line("Statute Act 2024"),
        Block::line("An Act to make provision about statutes."),
        Block::line("BE IT ENACTED by the King’s most Excellent Majesty, as follows:—"),
        Block::Line(Line::new("Interpretation").emboldened()),
        Block::numbered("1", "In this Act—"),
        Block::line("“the Act” means this Act;"),
        Block::numbered("2", "This Act comes into force on Royal Assent."),
        centered("SCHEDULE 1"),
        Block::Line(Line::new("Section 1").aligned(Alignment::Right)),
        centered("Repeals"),
        Block::numbered("1", "The Old Act 1900 is repealed."),
        Block::line("EXPLANATORY NOTE"),
        Block::line("(This note is not part of the Act)"),
    ]
}

#[test]
fn test_document_parts() {
    let output = parse(&act(), &ParserConfig::for_doc_type(DocType::Act));
    assert!(!output.has_errors());
    assert!(output.unattributed.is_empty());

    let document = &output.document;
    assert_eq!(document.header.len(), 3);
    assert_eq!(document.conclusions.len(), 2);

    let numbers: Vec<_> = document.body.iter().filter_map(|d| d.number_text()).collect();
    assert_eq!(numbers, vec!["1", "2"]);
    let first = &document.body[0];
    assert_eq!(first.tag, TagName::Section);
    assert_eq!(first.heading_text(), Some("Interpretation"));
    assert_eq!(first.children()[0].kind, DivisionKind::Definition);

    assert_eq!(document.schedules.len(), 1);
    let schedule = &document.schedules[0];
    assert_eq!(schedule.number_text(), Some("SCHEDULE 1"));
    assert_eq!(schedule.heading_text(), Some("Repeals"));
    assert_eq!(schedule.intro().len(), 1);
    assert_eq!(schedule.children()[0].tag, TagName::Paragraph);
    assert_eq!(schedule.children()[0].number_text(), Some("1"));
}

#[test]
fn test_schedules_banner_is_consumed() {
    let mut blocks = act();
    blocks.insert(7, centered("SCHEDULES"));
    let output = parse(&blocks, &ParserConfig::for_doc_type(DocType::Act));
    assert!(output.unattributed.is_empty());
    assert_eq!(output.document.body.len(), 2);
    assert_eq!(output.document.schedules.len(), 1);
}

#[test]
fn test_no_body_start_leaves_everything_in_header() {
    let blocks = vec![
        Block::line("A title"),
        Block::line("Some words."),
        Block::line("EXPLANATORY NOTE"),
    ];
    let output = parse(&blocks, &ParserConfig::default());
    assert_eq!(output.document.header.len(), 2);
    assert!(output.document.body.is_empty());
    assert_eq!(output.document.conclusions.len(), 1);
}

#[test]
fn test_header_runs_to_the_enacting_formula() {
    // The arrangement of sections repeats the provision numbers before the
    // formula; none of it may start the body.
    let blocks = vec![
        Block::line("Statute Act 2024"),
        Block::numbered("1", "Interpretation"),
        Block::numbered("2", "Commencement"),
        Block::line("BE IT ENACTED by the King’s most Excellent Majesty, as follows:—"),
        Block::numbered("1", "In this Act words mean things."),
        Block::numbered("2", "This Act comes into force on Royal Assent."),
    ];
    let output = parse(&blocks, &ParserConfig::for_doc_type(DocType::Act));
    assert_eq!(output.document.header.len(), 4);
    let numbers: Vec<_> = output.document.body.iter().filter_map(|d| d.number_text()).collect();
    assert_eq!(numbers, vec!["1", "2"]);
    assert!(output.unattributed.is_empty());
}

#[test]
fn test_unnumbered_text_between_schedules_is_unknown() {
    let blocks = vec![
        Block::numbered("1", "Text."),
        centered("SCHEDULE 1"),
        Block::numbered("1", "Paragraph."),
        Block::TableOfContents,
        Block::Line(Line::new("SCHEDULE 3").centered()),
        centered("SCHEDULE 2"),
        Block::numbered("1", "Paragraph."),
    ];
    let output = parse(&blocks, &ParserConfig::default());
    let kinds: Vec<_> = output.document.schedules.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DivisionKind::Schedule,
            DivisionKind::Unknown,
            DivisionKind::Schedule
        ]
    );
    assert_eq!(output.unattributed, vec![4]);
}

#[test]
fn test_memo_reuses_body_scan() {
    let output = parse(&act(), &ParserConfig::for_doc_type(DocType::Act));
    assert!(output.stats.memo_hits > 0);

    let unmemoized = parse(
        &act(),
        &ParserConfig::for_doc_type(DocType::Act).without_memo(),
    );
    assert_eq!(unmemoized.stats.memo_hits, 0);
    assert_eq!(unmemoized.document, output.document);
}

#[test]
fn test_output_serializes() {
    let output = parse(&act(), &ParserConfig::for_doc_type(DocType::Act));
    let json = serde_json::to_value(&output).unwrap_or_default();
    assert!(json["document"]["body"].is_array());
    assert_eq!(json["stats"]["quote_enters"], 0);
}

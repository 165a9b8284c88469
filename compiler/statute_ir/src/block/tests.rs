use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_line_normalizes_text() {
    let line = Line::from_runs(vec![Run::plain("  The   Secretary "), Run::bold(" of State ")]);
    assert_eq!(line.text, "The Secretary of State");
}

#[test]
fn test_emphasis_ignores_blank_runs() {
    let line = Line::from_runs(vec![Run::bold("Interpretation"), Run::plain("  ")]);
    assert!(line.is_bold());
    assert!(!line.is_italic());

    let mixed = Line::from_runs(vec![Run::bold("Half"), Run::plain(" bold")]);
    assert!(!mixed.is_bold());

    let empty = Line::from_runs(vec![]);
    assert!(!empty.is_bold());
}

#[test]
fn test_set_text_keeps_emphasis() {
    let mut line = Line::new("“quoted”.").italicized();
    line.set_text("quoted");
    assert_eq!(line.text, "quoted");
    assert!(line.is_italic());
    assert_eq!(line.runs.len(), 1);
}

#[test]
fn test_numbered_display_text() {
    let numbered = NumberedLine::new("(a)", "the first");
    assert_eq!(numbered.display_text(), "(a) the first");

    let bare = NumberedLine::new("1", "");
    assert_eq!(bare.display_text(), "1");
}

#[test]
fn test_table_first_and_last_line() {
    let table = Table {
        rows: vec![
            Row {
                cells: vec![Cell { blocks: vec![] }, Cell { blocks: vec![Block::line("top")] }],
            },
            Row {
                cells: vec![Cell {
                    blocks: vec![Block::line("middle"), Block::numbered("(a)", "bottom")],
                }],
            },
        ],
    };
    assert_eq!(table.first_line().map(|l| l.text.as_str()), Some("top"));
    assert_eq!(table.last_line().map(|l| l.text.as_str()), Some("bottom"));
}

#[test]
fn test_block_json_shape() {
    let json = r#"[
        {"type": "line", "text": "PART 1", "alignment": "center"},
        {"type": "numbered", "number": {"text": "1"}, "line": {"text": "Overview"}},
        {"type": "table_of_contents"}
    ]"#;
    let blocks: Vec<Block> = serde_json::from_str(json).unwrap();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].as_line().is_some_and(Line::is_centered));
    assert_eq!(blocks[1].as_numbered().map(|n| n.number.text.as_str()), Some("1"));
    assert_eq!(blocks[2], Block::TableOfContents);
}

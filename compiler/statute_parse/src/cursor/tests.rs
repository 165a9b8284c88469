use super::*;
use pretty_assertions::assert_eq;

fn blocks() -> Vec<Block> {
    vec![
        Block::line("one"),
        Block::numbered("1", "two"),
        Block::line("three"),
        Block::TableOfContents,
    ]
}

#[test]
fn test_advance_and_position() {
    let blocks = blocks();
    let mut cursor = Cursor::new(&blocks);
    assert_eq!(cursor.position(), 0);
    assert_eq!(cursor.current_plain_line().map(|l| l.text.as_str()), Some("one"));
    cursor.advance();
    assert_eq!(cursor.position(), 1);
    assert!(cursor.current_numbered().is_some());
    assert!(cursor.current_plain_line().is_none());
    assert_eq!(cursor.previous(), Some(&Block::line("one")));
}

#[test]
fn test_peek_does_not_move() {
    let blocks = blocks();
    let cursor = Cursor::new(&blocks);
    assert_eq!(cursor.peek(2), Some(&Block::line("three")));
    assert_eq!(cursor.peek(9), None);
    assert_eq!(cursor.position(), 0);
}

#[test]
fn test_advance_if_and_while() {
    let blocks = blocks();
    let mut cursor = Cursor::new(&blocks);
    assert!(cursor.advance_if(|b| b.as_numbered().is_some()).is_none());
    assert_eq!(cursor.position(), 0);

    let taken = cursor.advance_while(|b| b.as_line().is_some());
    assert_eq!(taken.len(), 3);
    assert_eq!(cursor.current(), Some(&Block::TableOfContents));
    assert_eq!(cursor.span_from(0), Span::new(0, 3));
}

#[test]
fn test_end_of_stream() {
    let blocks = blocks();
    let mut cursor = Cursor::new(&blocks);
    cursor.set_position(4);
    assert!(cursor.is_at_end());
    assert!(cursor.current().is_none());
    assert!(cursor.advance().is_none());
    assert_eq!(cursor.position(), 4);
}

#[test]
fn test_save_and_restore_position() {
    let blocks = blocks();
    let mut cursor = Cursor::new(&blocks);
    let saved = cursor.position();
    cursor.advance();
    cursor.advance();
    cursor.set_position(saved);
    assert_eq!(cursor.current(), Some(&Block::line("one")));
}

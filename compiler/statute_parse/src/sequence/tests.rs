use super::*;
use crate::text::numbers::NumberStyle;
use statute_ir::{NumberToken, Span, TagName};

fn numbered(kind: DivisionKind, number: &str) -> Division {
    Division::leaf(
        kind,
        TagName::Fixed(kind),
        Some(NumberToken::new(number)),
        None,
        vec![],
        Span::DUMMY,
    )
}

fn decimal(ordinal: u32, suffix: u32) -> SeqValue {
    SeqValue::new(NumberStyle::Decimal, ordinal).with_suffix(suffix)
}

#[test]
fn test_decimal_successors() {
    assert!(follows(decimal(4, 0), decimal(5, 0)));
    assert!(follows(decimal(4, 0), decimal(4, 1)));
    assert!(follows(decimal(4, 1), decimal(4, 2)));
    assert!(follows(decimal(4, 1), decimal(5, 0)));
    assert!(!follows(decimal(4, 0), decimal(6, 0)));
    assert!(!follows(decimal(4, 0), decimal(4, 2)));
    assert!(!follows(decimal(5, 0), decimal(4, 0)));
}

#[test]
fn test_letter_and_numeral_successors() {
    let p = DivisionKind::SubParagraph1;
    assert!(is_next_sibling(&numbered(p, "(a)"), &numbered(p, "(b)")));
    assert!(is_next_sibling(&numbered(p, "(z)"), &numbered(p, "(aa)")));
    assert!(is_next_sibling(&numbered(p, "(aa)"), &numbered(p, "(bb)")));
    assert!(!is_next_sibling(&numbered(p, "(a)"), &numbered(p, "(c)")));

    let r = DivisionKind::SubParagraph2;
    assert!(is_next_sibling(&numbered(r, "(iv)"), &numbered(r, "(v)")));
    assert!(is_next_sibling(&numbered(r, "(ix)"), &numbered(r, "(x)")));
    assert!(!is_next_sibling(&numbered(r, "(i)"), &numbered(r, "(iii)")));
}

#[test]
fn test_provision_siblings() {
    let s = DivisionKind::PrimaryProvision;
    assert!(is_next_sibling(&numbered(s, "1."), &numbered(s, "2.")));
    assert!(is_next_sibling(&numbered(s, "2"), &numbered(s, "2A")));
    assert!(!is_next_sibling(&numbered(s, "2"), &numbered(s, "4")));

    let sub = DivisionKind::SecondaryProvision;
    assert!(is_next_sibling(&numbered(sub, "(1)"), &numbered(sub, "(1A)")));
    assert!(is_next_sibling(&numbered(sub, "“(1A)"), &numbered(sub, "(2)")));
}

#[test]
fn test_groupings() {
    let part = DivisionKind::Part;
    assert!(is_next_sibling(&numbered(part, "PART 1"), &numbered(part, "PART 2")));
    assert!(is_next_sibling(&numbered(part, "PART IV"), &numbered(part, "PART V")));
    assert!(!is_next_sibling(&numbered(part, "PART 1"), &numbered(part, "PART 3")));

    let heading = DivisionKind::CrossHeading;
    let cross = Division::leaf(heading, TagName::Fixed(heading), None, None, vec![], Span::DUMMY);
    assert!(is_next_sibling(&cross, &cross));
}

#[test]
fn test_mixed_kinds_are_not_compared() {
    assert!(is_next_sibling(
        &numbered(DivisionKind::SubParagraph1, "(a)"),
        &numbered(DivisionKind::Definition, "(q)")
    ));
}

#[test]
fn test_follows_record() {
    assert!(follows_record(None, decimal(1, 0), false));
    assert!(!follows_record(None, decimal(3, 0), false));
    assert!(follows_record(None, decimal(3, 0), true));
    assert!(follows_record(Some(decimal(2, 0)), decimal(3, 0), false));
    assert!(!follows_record(Some(decimal(2, 0)), decimal(2, 0), true));
}

#[test]
fn test_continues_lettering() {
    assert!(continues_lettering("(h)", "(i)"));
    assert!(continues_lettering("(u)", "(v)"));
    assert!(!continues_lettering("(a)", "(i)"));
    assert!(!continues_lettering("(h)", "(ii)"));
}

#[test]
fn test_largest_numbers_have_no_successor() {
    assert!(!follows(decimal(u32::MAX, 0), decimal(u32::MAX, 0)));
    assert!(!follows(decimal(u32::MAX, 0), decimal(0, 0)));
    assert!(!follows(decimal(7, u32::MAX), decimal(7, 0)));
    assert!(follows(decimal(u32::MAX - 1, 0), decimal(u32::MAX, 0)));

    let s = DivisionKind::PrimaryProvision;
    assert!(!is_next_sibling(&numbered(s, "4294967295"), &numbered(s, "4294967295")));
    let sub = DivisionKind::SecondaryProvision;
    assert!(!is_next_sibling(&numbered(sub, "(4294967295)"), &numbered(sub, "(4294967295)")));
    assert!(!follows_record(Some(decimal(u32::MAX, 0)), decimal(1, 0), false));
}

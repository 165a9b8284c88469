use super::*;
use crate::frame::FrameContext;
use pretty_assertions::assert_eq;

fn line(text: &str) -> Content {
    Content::Block(Block::line(text))
}

#[test]
fn test_branch_without_children_becomes_leaf() {
    let division = Division::branch(
        DivisionKind::PrimaryProvision,
        TagName::Section,
        Some(NumberToken::new("1")),
        None,
        vec![line("intro")],
        vec![],
        vec![line("wrap")],
        Span::new(0, 2),
    );
    assert!(division.is_leaf());
    assert_eq!(division.contents(), &[line("intro"), line("wrap")]);
    assert!(division.children().is_empty());
}

#[test]
fn test_branch_with_children_keeps_parts() {
    let child = Division::leaf(
        DivisionKind::SubParagraph1,
        TagName::Fixed(DivisionKind::SubParagraph1),
        Some(NumberToken::new("(a)")),
        None,
        vec![line("first")],
        Span::new(1, 2),
    );
    let division = Division::branch(
        DivisionKind::PrimaryProvision,
        TagName::Section,
        Some(NumberToken::new("1")),
        None,
        vec![line("intro")],
        vec![child],
        vec![],
        Span::new(0, 2),
    );
    assert!(division.is_branch());
    assert_eq!(division.intro(), &[line("intro")]);
    assert_eq!(division.children().len(), 1);
    assert_eq!(division.last_line().map(|l| l.text.as_str()), Some("first"));
    assert_eq!(division.first_text(), Some("intro"));
}

#[test]
fn test_tag_names_follow_frame() {
    let body = |doc| Frame::body(doc);
    assert_eq!(
        TagName::resolve(DivisionKind::PrimaryProvision, body(DocType::Bill)),
        TagName::Section
    );
    assert_eq!(
        TagName::resolve(DivisionKind::PrimaryProvision, body(DocType::Order)),
        TagName::Article
    );
    assert_eq!(
        TagName::resolve(DivisionKind::PrimaryProvision, body(DocType::Regulations)),
        TagName::Regulation
    );
    assert_eq!(
        TagName::resolve(DivisionKind::PrimaryProvision, body(DocType::Rules)),
        TagName::Rule
    );
    assert_eq!(
        TagName::resolve(DivisionKind::SecondaryProvision, body(DocType::Act)),
        TagName::Subsection
    );
    assert_eq!(
        TagName::resolve(DivisionKind::SecondaryProvision, body(DocType::Regulations)),
        TagName::Paragraph
    );

    let schedule = Frame::new(DocType::Act, FrameContext::Schedule);
    assert_eq!(
        TagName::resolve(DivisionKind::PrimaryProvision, schedule),
        TagName::Paragraph
    );
    assert_eq!(
        TagName::resolve(DivisionKind::SecondaryProvision, schedule),
        TagName::Subparagraph
    );
    assert_eq!(
        TagName::resolve(DivisionKind::CrossHeading, schedule).as_str(),
        "crossHeading"
    );
}

#[test]
fn test_unknown_wraps_blocks() {
    let division = Division::unknown(vec![Block::line("stray")], Span::new(4, 5));
    assert_eq!(division.kind, DivisionKind::Unknown);
    assert_eq!(division.first_text(), Some("stray"));
    assert_eq!(division.span, Span::new(4, 5));
}

#[test]
fn test_last_line_through_quoted_content() {
    let inner = Division::leaf(
        DivisionKind::UnnumberedParagraph,
        TagName::Fixed(DivisionKind::UnnumberedParagraph),
        None,
        None,
        vec![line("quoted text”.")],
        Span::new(1, 2),
    );
    let quoted = QuotedStructure::new(vec![inner], Frame::default(), Span::new(1, 2));
    let division = Division::leaf(
        DivisionKind::SecondaryProvision,
        TagName::Subsection,
        Some(NumberToken::new("(2)")),
        None,
        vec![line("insert—"), Content::Quoted(quoted)],
        Span::new(0, 2),
    );
    assert_eq!(division.last_line().map(|l| l.text.as_str()), Some("quoted text”."));
}

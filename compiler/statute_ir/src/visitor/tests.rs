use super::*;
use crate::{Block, DivisionKind, Frame, Span, TagName};

fn paragraph(text: &str) -> Division {
    Division::leaf(
        DivisionKind::UnnumberedParagraph,
        TagName::Fixed(DivisionKind::UnnumberedParagraph),
        None,
        None,
        vec![Content::Block(Block::line(text))],
        Span::DUMMY,
    )
}

fn quoted(inner: Vec<Division>) -> Content {
    Content::Quoted(QuotedStructure::new(inner, Frame::default(), Span::DUMMY))
}

/// Two quotes, one nested inside the other, plus a plain paragraph.
fn sample() -> Division {
    let inner = quoted(vec![paragraph("inner")]);
    let nested_holder = Division::leaf(
        DivisionKind::UnnumberedParagraph,
        TagName::Fixed(DivisionKind::UnnumberedParagraph),
        None,
        None,
        vec![inner],
        Span::DUMMY,
    );
    Division::branch(
        DivisionKind::SecondaryProvision,
        TagName::Subsection,
        None,
        None,
        vec![Content::Block(Block::line("intro"))],
        vec![paragraph("child")],
        vec![quoted(vec![nested_holder])],
        Span::DUMMY,
    )
}

/// Counts quotations and marks each one invalid on the way down.
struct MarkInvalid(usize);

impl VisitorMut for MarkInvalid {
    fn visit_quoted_mut(&mut self, quoted: &mut QuotedStructure) {
        self.0 += 1;
        quoted.invalid_frame = true;
        walk_quoted_mut(self, quoted);
    }
}

fn quotes(content: &[Content], out: &mut Vec<bool>) {
    for item in content {
        if let Content::Quoted(quoted) = item {
            out.push(quoted.invalid_frame);
            for division in &quoted.contents {
                if let DivisionBody::Leaf { contents } = &division.body {
                    quotes(contents, out);
                }
            }
        }
    }
}

#[test]
fn test_visitor_reaches_nested_quotes() {
    let mut tree = sample();
    let mut visitor = MarkInvalid(0);
    visitor.visit_division_mut(&mut tree);
    assert_eq!(visitor.0, 2);
}

#[test]
fn test_visitor_updates_every_quote() {
    let mut tree = sample();
    MarkInvalid(0).visit_division_mut(&mut tree);

    let mut seen = Vec::new();
    quotes(tree.wrap_up(), &mut seen);
    assert_eq!(seen, vec![true, true]);
}

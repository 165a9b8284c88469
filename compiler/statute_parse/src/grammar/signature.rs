//! Signature blocks: an opening formula (`Signed by authority of ...`)
//! and the names, offices and dates under it.

use statute_ir::{Block, Content, Division, DivisionKind};

use crate::outcome::{ParseOutcome, RuleId};
use crate::text::{numbers, patterns};
use crate::Parser;

/// Lines that belong to the signature above them.
fn is_signature_line(block: &Block) -> bool {
    match block {
        Block::Line(line) => {
            !patterns::is_signature_opener(&line.text)
                && !patterns::is_structural_heading(numbers::bare(&line.text))
        }
        Block::Table(_) => true,
        Block::Numbered(_) | Block::TableOfContents => false,
    }
}

impl Parser<'_> {
    pub(crate) fn signatures(&mut self) -> ParseOutcome<Division> {
        self.rule(RuleId::Signatures, 0, |p| {
            let start = p.cursor.position();
            let Some(opener) = p
                .match_block(|block| {
                    block
                        .as_plain_line()
                        .is_some_and(|line| patterns::is_signature_opener(&line.text))
                })
            else {
                return ParseOutcome::no_match(RuleId::Signatures, start);
            };
            let mut contents = vec![Content::Block(opener.clone())];
            let rest = p.match_while(is_signature_line);
            contents.extend(rest.iter().cloned().map(Content::Block));
            let kind = DivisionKind::Signatures;
            ParseOutcome::consumed_ok(Division::leaf(
                kind,
                p.tag(kind),
                None,
                None,
                contents,
                p.cursor.span_from(start),
            ))
        })
    }
}

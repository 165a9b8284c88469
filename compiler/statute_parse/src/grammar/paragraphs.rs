//! Numbered paragraphs below the primary level, and the tail every
//! numbered division shares once its first line is taken.

use statute_ir::{Block, Content, Division, DivisionKind, Line, NumberToken};

use super::content::RunMode;
use crate::outcome::{ParseOutcome, RuleId};
use crate::text::numbers::{self, SeqValue};
use crate::Parser;

/// The first line of a division, already consumed.
pub(crate) struct DivisionHead {
    pub kind: DivisionKind,
    pub start: usize,
    pub number: Option<NumberToken>,
    pub heading: Option<Line>,
    /// Text on the number line, which opens the intro.
    pub text: Option<Line>,
    /// Left indent of the first line; continuation text is at least this
    /// far in.
    pub indent: i32,
}

impl Parser<'_> {
    pub(crate) fn secondary_provision(&mut self) -> ParseOutcome<Division> {
        self.numbered_paragraph(
            RuleId::SecondaryProvision,
            DivisionKind::SecondaryProvision,
            numbers::secondary,
        )
    }

    pub(crate) fn sub_paragraph1(&mut self) -> ParseOutcome<Division> {
        self.numbered_paragraph(
            RuleId::SubParagraph1,
            DivisionKind::SubParagraph1,
            numbers::lettered,
        )
    }

    pub(crate) fn sub_paragraph2(&mut self) -> ParseOutcome<Division> {
        self.numbered_paragraph(
            RuleId::SubParagraph2,
            DivisionKind::SubParagraph2,
            numbers::roman,
        )
    }

    pub(crate) fn sub_paragraph3(&mut self) -> ParseOutcome<Division> {
        self.numbered_paragraph(
            RuleId::SubParagraph3,
            DivisionKind::SubParagraph3,
            numbers::upper,
        )
    }

    fn numbered_paragraph(
        &mut self,
        id: RuleId,
        kind: DivisionKind,
        classify: fn(&str) -> Option<SeqValue>,
    ) -> ParseOutcome<Division> {
        self.rule(id, 0, |p| {
            let start = p.cursor.position();
            let Some(numbered) = p
                .cursor
                .current_numbered()
                .filter(|n| classify(&n.number.text).is_some())
            else {
                return ParseOutcome::no_match(id, start);
            };
            p.cursor.advance();
            p.numbered_tail(
                DivisionHead {
                    kind,
                    start,
                    number: Some(numbered.number.clone()),
                    heading: None,
                    text: Some(numbered.line.clone()),
                    indent: numbered.line.left_indent,
                },
                Vec::new(),
            )
        })
    }

    /// Intro, children and wrap-up after a division's first line.
    ///
    /// `initial` holds children already taken from the first line itself.
    /// When the intro (or, with no intro, the first line) closes the
    /// enclosing quotation the division ends there.
    pub(crate) fn numbered_tail(
        &mut self,
        head: DivisionHead,
        initial: Vec<Division>,
    ) -> ParseOutcome<Division> {
        let mut intro = Vec::new();
        if let Some(text) = head.text.filter(|line| !line.is_blank()) {
            intro.push(Content::Block(Block::Line(text)));
        }
        let intro = crate::chain!(self.content_run(
            intro,
            RunMode::Continuation {
                indent: head.indent
            }
        ));
        let closed = if intro.is_empty() {
            self.closed_by_last_block()
        } else {
            self.ends_quote(&intro)
        };
        let tag = self.tag(head.kind);
        if closed {
            return ParseOutcome::consumed_ok(Division::branch(
                head.kind,
                tag,
                head.number,
                head.heading,
                intro,
                initial,
                Vec::new(),
                self.cursor.span_from(head.start),
            ));
        }
        let number = head.number.as_ref().map(|n| n.text.as_str());
        let children = crate::chain!(self.children(head.kind, number, initial));
        let wrap_up = crate::chain!(self.wrap_up(&children, head.indent));
        ParseOutcome::consumed_ok(Division::branch(
            head.kind,
            tag,
            head.number,
            head.heading,
            intro,
            children,
            wrap_up,
            self.cursor.span_from(head.start),
        ))
    }
}

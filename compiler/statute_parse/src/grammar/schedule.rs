//! Schedules.
//!
//! ```text
//! SCHEDULE 2                      heading
//! Section 4                       reference (optional)
//! AMENDMENTS                      title (optional)
//! PART 1 / 1 / (a) / text ...     children, parsed in schedule context
//! ```
//!
//! The reference may also come after the title. Paragraph numbering starts
//! again in every schedule.

use statute_ir::{Block, Content, Division, DivisionKind, Line, NumberToken};
use tracing::debug;

use crate::context::ParseContext;
use crate::outcome::{ParseOutcome, RuleId};
use crate::text::{numbers, patterns};
use crate::Parser;

fn is_reference(block: &Block) -> bool {
    block.as_plain_line().is_some_and(|line| {
        !line.is_blank()
            && (patterns::is_schedule_reference(&line.text) || line.is_right_aligned())
    })
}

fn is_title(block: &Block) -> bool {
    block.as_plain_line().is_some_and(|line| {
        (line.is_centered() || line.is_bold())
            && !line.is_blank()
            && !patterns::is_structural_heading(numbers::bare(&line.text))
            && !patterns::is_schedule_reference(&line.text)
    })
}

impl Parser<'_> {
    pub(crate) fn schedule(&mut self) -> ParseOutcome<Division> {
        self.rule(RuleId::Schedule, 0, |p| {
            let start = p.cursor.position();
            let Some(heading_line) = p.match_block(|block| {
                block
                    .as_plain_line()
                    .is_some_and(|line| patterns::is_schedule_heading(numbers::bare(&line.text)))
            }) else {
                return ParseOutcome::no_match(RuleId::Schedule, start);
            };
            let number = NumberToken {
                text: heading_line.display_text(),
                bold: heading_line.as_line().is_some_and(Line::is_bold),
            };

            let mut intro = Vec::new();
            if let Some(reference) = p.match_block(is_reference) {
                intro.push(Content::Block(reference.clone()));
            }
            let title = p.match_block(is_title).and_then(Block::as_line).cloned();
            if intro.is_empty() && title.is_some() {
                if let Some(reference) = p.match_block(is_reference) {
                    intro.push(Content::Block(reference.clone()));
                }
            }
            debug!(number = %number.text, pos = start, "schedule");

            let kind = DivisionKind::Schedule;
            let tag = p.tag(kind);
            if p.closed_by_last_block() {
                return ParseOutcome::consumed_ok(Division::leaf(
                    kind,
                    tag,
                    Some(number),
                    title,
                    intro,
                    p.cursor.span_from(start),
                ));
            }
            let children = crate::chain!(p.with_context(ParseContext::IN_SCHEDULE, |p| {
                p.state.record_mut().schedule = None;
                p.children(kind, Some(&number.text), Vec::new())
            }));
            ParseOutcome::consumed_ok(Division::branch(
                kind,
                tag,
                Some(number),
                title,
                intro,
                children,
                Vec::new(),
                p.cursor.span_from(start),
            ))
        })
    }
}

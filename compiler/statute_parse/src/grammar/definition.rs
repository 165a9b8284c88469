//! Definitions in an interpretation provision: `“term” means ...`, with
//! any lettered paragraphs that complete the definition.

use statute_ir::{Division, DivisionKind};

use super::paragraphs::DivisionHead;
use crate::outcome::{ParseOutcome, RuleId};
use crate::text::patterns;
use crate::Parser;

impl Parser<'_> {
    pub(crate) fn definition(&mut self) -> ParseOutcome<Division> {
        self.rule(RuleId::Definition, 0, |p| {
            let start = p.cursor.position();
            let Some(line) = p
                .cursor
                .current_plain_line()
                .filter(|line| patterns::is_definition(&line.text))
            else {
                return ParseOutcome::no_match(RuleId::Definition, start);
            };
            p.cursor.advance();
            p.numbered_tail(
                DivisionHead {
                    kind: DivisionKind::Definition,
                    start,
                    number: None,
                    heading: None,
                    text: Some(line.clone()),
                    indent: line.left_indent,
                },
                Vec::new(),
            )
        })
    }
}

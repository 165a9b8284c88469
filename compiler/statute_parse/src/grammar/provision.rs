//! Primary provisions: sections, articles, regulations, rules, and the
//! paragraphs of a schedule.
//!
//! A primary provision opens in one of three ways:
//!
//! | Form | Blocks |
//! |------|--------|
//! | heading above | bold line, then `12 Text` |
//! | heading inline | `12 Heading` with the text in bold |
//! | headingless | `12 Text` |
//!
//! Headingless provisions are only recognised when their number follows the
//! last primary number recorded at this quotation depth, so numbered lists
//! in running text are not mistaken for new provisions. A compound number
//! (`1.—(1) Text`) opens the provision and its first subsection on one line.

use statute_ir::{Block, Division, DivisionKind, Line, NumberToken, NumberedLine};
use tracing::debug;

use super::paragraphs::DivisionHead;
use crate::outcome::{ParseOutcome, RuleId};
use crate::sequence;
use crate::text::numbers::{self, SeqValue};
use crate::text::patterns;
use crate::Parser;

/// What a provision's first lines gave.
struct ProvisionOpening {
    heading: Option<Line>,
    number: NumberToken,
    value: SeqValue,
    /// The subsection of a compound number.
    secondary: Option<NumberToken>,
    /// Text of the number line, when it is not the heading.
    text: Option<Line>,
    indent: i32,
    /// Position of the number line.
    number_position: usize,
}

/// Split a primary number line into its number, its value and the
/// secondary number of a compound.
fn primary_number(numbered: &NumberedLine) -> Option<(NumberToken, SeqValue, Option<NumberToken>)> {
    let token = &numbered.number;
    if let Some(value) = numbers::primary(&token.text) {
        return Some((token.clone(), value, None));
    }
    let (primary, secondary) = numbers::compound(&token.text)?;
    let value = numbers::primary(&primary)?;
    Some((
        NumberToken {
            text: primary,
            bold: token.bold,
        },
        value,
        Some(NumberToken {
            text: secondary,
            bold: token.bold,
        }),
    ))
}

impl Parser<'_> {
    pub(crate) fn primary_provision(&mut self) -> ParseOutcome<Division> {
        self.rule(RuleId::PrimaryProvision, 0, |p| {
            let start = p.cursor.position();
            let opening = crate::chain!(crate::one_of!(
                p,
                p.heading_above(),
                p.heading_inline(),
                p.headingless()
            ));
            let in_schedule = p.frame().is_schedule();
            p.state.record_mut().set(in_schedule, opening.value);
            debug!(number = %opening.number.text, pos = start, "primary provision");

            let (initial, text) = match opening.secondary {
                Some(secondary) => {
                    let child = crate::chain!(p.numbered_tail(
                        DivisionHead {
                            kind: DivisionKind::SecondaryProvision,
                            start: opening.number_position,
                            number: Some(secondary),
                            heading: None,
                            text: opening.text,
                            indent: opening.indent,
                        },
                        Vec::new(),
                    ));
                    (vec![child], None)
                }
                None => (Vec::new(), opening.text),
            };
            p.numbered_tail(
                DivisionHead {
                    kind: DivisionKind::PrimaryProvision,
                    start,
                    number: Some(opening.number),
                    heading: opening.heading,
                    text,
                    indent: opening.indent,
                },
                initial,
            )
        })
    }

    /// A bold line heading the number line below it.
    fn heading_above(&mut self) -> ParseOutcome<ProvisionOpening> {
        let start = self.cursor.position();
        let is_heading = self.cursor.current_plain_line().is_some_and(|line| {
            line.is_bold()
                && !line.is_centered()
                && !line.is_blank()
                && !patterns::is_structural_heading(numbers::bare(&line.text))
        });
        if !is_heading || !self.primary_number_follows() {
            return ParseOutcome::no_match(RuleId::PrimaryProvision, start);
        }
        let heading = self.cursor.advance().and_then(Block::as_line).cloned();
        let number_position = self.cursor.position();
        let Some(numbered) = self.cursor.advance().and_then(Block::as_numbered) else {
            return ParseOutcome::no_match(RuleId::PrimaryProvision, start);
        };
        let Some((number, value, secondary)) = primary_number(numbered) else {
            return ParseOutcome::no_match(RuleId::PrimaryProvision, start);
        };
        ParseOutcome::consumed_ok(ProvisionOpening {
            heading,
            number,
            value,
            secondary,
            text: Some(numbered.line.clone()),
            indent: numbered.line.left_indent,
            number_position,
        })
    }

    /// A number line whose text is the bold heading.
    fn heading_inline(&mut self) -> ParseOutcome<ProvisionOpening> {
        let start = self.cursor.position();
        let Some(numbered) = self
            .cursor
            .current_numbered()
            .filter(|n| n.line.is_bold() && !n.line.is_blank())
        else {
            return ParseOutcome::no_match(RuleId::PrimaryProvision, start);
        };
        let Some((number, value, secondary)) = primary_number(numbered) else {
            return ParseOutcome::no_match(RuleId::PrimaryProvision, start);
        };
        self.cursor.advance();
        ParseOutcome::consumed_ok(ProvisionOpening {
            heading: Some(numbered.line.clone()),
            number,
            value,
            secondary,
            text: None,
            indent: numbered.line.left_indent,
            number_position: start,
        })
    }

    /// A number line with no heading, accepted only in sequence.
    fn headingless(&mut self) -> ParseOutcome<ProvisionOpening> {
        let start = self.cursor.position();
        let Some(numbered) = self.cursor.current_numbered() else {
            return ParseOutcome::no_match(RuleId::PrimaryProvision, start);
        };
        let Some((number, value, secondary)) = primary_number(numbered) else {
            return ParseOutcome::no_match(RuleId::PrimaryProvision, start);
        };
        let record = self.state.record().get(self.frame().is_schedule());
        if !sequence::follows_record(record, value, self.free_start()) {
            debug!(number = %number.text, ?record, "headingless provision out of sequence");
            return ParseOutcome::no_match(RuleId::PrimaryProvision, start);
        }
        self.cursor.advance();
        ParseOutcome::consumed_ok(ProvisionOpening {
            heading: None,
            number,
            value,
            secondary,
            text: Some(numbered.line.clone()),
            indent: numbered.line.left_indent,
            number_position: start,
        })
    }
}

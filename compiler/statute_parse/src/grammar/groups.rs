//! Groupings above the provisions.
//!
//! Groups of Parts, Parts and Chapters are a label line (`PART 2`) followed
//! by a heading line, both centered or bold. Cross-headings are a single
//! centered line; grouping sections a single centered italic line. Inside a
//! schedule each produces its schedule kind.

use statute_ir::{Block, Division, DivisionKind, Line, NumberToken};

use crate::outcome::{ParseOutcome, RuleId};
use crate::text::{numbers, patterns};
use crate::Parser;

type LabelFn = fn(&str) -> Option<&str>;

fn is_display_line(line: &Line) -> bool {
    (line.is_centered() || line.is_bold()) && !line.is_blank()
}

impl Parser<'_> {
    pub(crate) fn group_of_parts(&mut self) -> ParseOutcome<Division> {
        self.labelled_group(
            RuleId::GroupOfParts,
            DivisionKind::GroupOfParts,
            DivisionKind::GroupOfParts,
            patterns::group_of_parts_label,
        )
    }

    pub(crate) fn part(&mut self) -> ParseOutcome<Division> {
        self.labelled_group(
            RuleId::Part,
            DivisionKind::Part,
            DivisionKind::SchedulePart,
            patterns::part_label,
        )
    }

    pub(crate) fn chapter(&mut self) -> ParseOutcome<Division> {
        self.labelled_group(
            RuleId::Chapter,
            DivisionKind::Chapter,
            DivisionKind::ScheduleChapter,
            patterns::chapter_label,
        )
    }

    /// A label line and a heading line, then children.
    ///
    /// Both lines are required: a label with no heading after it is not a
    /// grouping, and the rule fails without consuming anything.
    fn labelled_group(
        &mut self,
        id: RuleId,
        body_kind: DivisionKind,
        schedule_kind: DivisionKind,
        label: LabelFn,
    ) -> ParseOutcome<Division> {
        self.rule(id, 0, |p| {
            let start = p.cursor.position();
            let kind = if p.state.context.in_schedule() {
                schedule_kind
            } else {
                body_kind
            };
            let Some(label_line) = p.cursor.current_plain_line().filter(|line| {
                is_display_line(line) && label(numbers::bare(&line.text)).is_some()
            }) else {
                return ParseOutcome::no_match(id, start);
            };
            let heading_follows = p.cursor.peek(1).and_then(Block::as_plain_line).is_some_and(|line| {
                is_display_line(line) && !patterns::is_structural_heading(numbers::bare(&line.text))
            });
            if !heading_follows {
                return ParseOutcome::no_match(id, start);
            }
            p.cursor.advance();
            let heading = p.cursor.advance().and_then(Block::as_plain_line).cloned();
            let number = NumberToken {
                text: label_line.text.clone(),
                bold: label_line.is_bold(),
            };
            let children = if p.closed_by_last_block() {
                Vec::new()
            } else {
                crate::chain!(p.children(kind, Some(&number.text), Vec::new()))
            };
            ParseOutcome::consumed_ok(Division::branch(
                kind,
                p.tag(kind),
                Some(number),
                heading,
                Vec::new(),
                children,
                Vec::new(),
                p.cursor.span_from(start),
            ))
        })
    }

    /// A centered heading line over provisions.
    pub(crate) fn cross_heading(&mut self) -> ParseOutcome<Division> {
        self.rule(RuleId::CrossHeading, 0, |p| {
            let start = p.cursor.position();
            let kind = if p.state.context.in_schedule() {
                DivisionKind::ScheduleCrossHeading
            } else {
                DivisionKind::CrossHeading
            };
            let Some(line) = p.cursor.current_plain_line().filter(|line| {
                line.is_centered()
                    && !line.is_italic()
                    && !line.is_blank()
                    && !patterns::is_structural_heading(numbers::bare(&line.text))
                    && !patterns::is_schedule_reference(&line.text)
            }) else {
                return ParseOutcome::no_match(RuleId::CrossHeading, start);
            };
            p.cursor.advance();
            p.grouping_body(kind, line.clone(), start)
        })
    }

    /// A centered italic heading, the level below a cross-heading.
    pub(crate) fn grouping_section(&mut self) -> ParseOutcome<Division> {
        self.rule(RuleId::GroupingSection, 0, |p| {
            let start = p.cursor.position();
            let kind = if p.state.context.in_schedule() {
                DivisionKind::ScheduleGroupingSection
            } else {
                DivisionKind::GroupingSection
            };
            let Some(line) = p
                .cursor
                .current_plain_line()
                .filter(|line| line.is_centered() && line.is_italic() && !line.is_blank())
            else {
                return ParseOutcome::no_match(RuleId::GroupingSection, start);
            };
            p.cursor.advance();
            p.grouping_body(kind, line.clone(), start)
        })
    }

    fn grouping_body(
        &mut self,
        kind: DivisionKind,
        heading: Line,
        start: usize,
    ) -> ParseOutcome<Division> {
        let children = if self.closed_by_last_block() {
            Vec::new()
        } else {
            crate::chain!(self.children(kind, None, Vec::new()))
        };
        ParseOutcome::consumed_ok(Division::branch(
            kind,
            self.tag(kind),
            None,
            Some(heading),
            Vec::new(),
            children,
            Vec::new(),
            self.cursor.span_from(start),
        ))
    }
}

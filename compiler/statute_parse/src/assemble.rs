//! Document assembly.
//!
//! ```text
//! header        blocks up to the enacting formula, then on to the first
//!               division that starts the body
//! body          top-level divisions up to the back matter
//! schedules     optional SCHEDULES banner, then Schedule divisions
//! conclusions   the explanatory note and anything after the schedules
//! ```
//!
//! The assembler is where recovery happens. A block no rule accepts, or a
//! division that fails hard or is out of sequence with the previous one,
//! is kept as an `Unknown` division and the parse resumes at the next
//! block.

use statute_ir::{Block, Content, Division, DivisionBody, DivisionKind, Document, Span};
use tracing::{debug, warn};

use crate::error::ParseWarning;
use crate::grammar::{is_second_level, BODY_STARTERS, QUOTE_INTERIOR, TOP_LEVEL};
use crate::outcome::{ParseOutcome, RuleId, RuleSet};
use crate::quoted::postpass::extract_quotes;
use crate::sequence;
use crate::text::{numbers, patterns};
use crate::Parser;

/// Divisions a bare run of blocks may hold: anything a quotation could,
/// plus signatures.
const FRAGMENT: RuleSet = QUOTE_INTERIOR.with(RuleId::Signatures);

/// Schedules, the schedules banner and the explanatory note end the body.
fn is_back_matter(block: &Block) -> bool {
    block.as_plain_line().is_some_and(|line| {
        let text = numbers::bare(&line.text);
        patterns::is_schedule_heading(text)
            || patterns::is_schedules_banner(text)
            || patterns::is_explanatory_note(text)
    })
}

fn is_banner(block: &Block) -> bool {
    block
        .as_plain_line()
        .is_some_and(|line| patterns::is_schedules_banner(numbers::bare(&line.text)))
}

fn is_explanatory_note(block: &Block) -> bool {
    block
        .as_plain_line()
        .is_some_and(|line| patterns::is_explanatory_note(numbers::bare(&line.text)))
}

fn is_enacting_formula(block: &Block) -> bool {
    block
        .as_plain_line()
        .is_some_and(|line| patterns::is_enacting_formula(numbers::bare(&line.text)))
}

fn is_schedule_heading(block: &Block) -> bool {
    block
        .as_plain_line()
        .is_some_and(|line| patterns::is_schedule_heading(numbers::bare(&line.text)))
}

/// Whether `candidate` may follow the last division of its kind in
/// `divisions`.
fn follows_previous(divisions: &[Division], candidate: &Division) -> bool {
    divisions
        .iter()
        .rev()
        .find(|d| d.kind == candidate.kind)
        .is_none_or(|prev| sequence::is_next_sibling(prev, candidate))
}

/// Whether a division found while scanning for the body marks its start.
/// A cross-heading or grouping section only does when it owns provisions.
fn starts_body(division: &Division) -> bool {
    match division.kind {
        DivisionKind::CrossHeading | DivisionKind::GroupingSection => division.is_branch(),
        _ => true,
    }
}

impl Parser<'_> {
    /// Parse the whole stream into a document.
    pub(crate) fn parse_document(&mut self) -> Document {
        let blocks = self.cursor.blocks();
        let boundary = blocks.iter().position(is_back_matter).unwrap_or(blocks.len());
        let floor = blocks[..boundary]
            .iter()
            .position(is_enacting_formula)
            .map_or(0, |formula| formula + 1);
        let body_start = self.find_body_start(floor, boundary).unwrap_or(boundary);
        debug!(body_start, boundary, blocks = blocks.len(), "assembling document");

        let header = blocks[..body_start].to_vec();
        self.cursor.set_position(body_start);
        let mut body = self.division_run(TOP_LEVEL, true);
        let mut schedules = self.schedules();
        let conclusions = blocks[self.cursor.position()..].to_vec();
        self.cursor.set_position(blocks.len());

        if self.config.extract_quotes {
            extract_quotes(&mut body);
            extract_quotes(&mut schedules);
        }
        Document {
            header,
            body,
            schedules,
            conclusions,
        }
    }

    /// Parse the stream as a plain run of divisions.
    pub(crate) fn parse_fragment(&mut self) -> Vec<Division> {
        self.division_run(FRAGMENT, false)
    }

    /// First position in `floor..boundary` where a body division parses.
    fn find_body_start(&mut self, floor: usize, boundary: usize) -> Option<usize> {
        (floor..boundary).find(|&position| {
            self.look_ahead(|p| {
                p.cursor.set_position(position);
                match p.next_division(BODY_STARTERS, false) {
                    ParseOutcome::ConsumedOk { value } | ParseOutcome::EmptyOk { value } => {
                        starts_body(&value)
                    }
                    ParseOutcome::ConsumedErr { .. } => true,
                    ParseOutcome::EmptyErr { .. } => false,
                }
            })
        })
    }

    /// Divisions from the current position to the end of the stream, or to
    /// the back matter when `stop_at_back_matter` is set.
    fn division_run(&mut self, eligible: RuleSet, stop_at_back_matter: bool) -> Vec<Division> {
        let mut divisions: Vec<Division> = Vec::new();
        while let Some(block) = self.cursor.current() {
            if stop_at_back_matter && is_back_matter(block) {
                break;
            }
            if matches!(block, Block::TableOfContents) {
                self.skip_contents();
                continue;
            }
            let second_level = divisions.last().is_some_and(|d| is_second_level(d.kind));
            match self.next_in_sequence(eligible, second_level, &divisions) {
                Some(division) => divisions.push(division),
                None => self.unattributed_block(&mut divisions),
            }
        }
        divisions
    }

    /// Schedules, up to the explanatory note. Unclaimed blocks between
    /// schedules become `Unknown`; anything after the last schedule is left
    /// for the conclusions.
    fn schedules(&mut self) -> Vec<Division> {
        let mut schedules: Vec<Division> = Vec::new();
        while let Some(block) = self.cursor.current() {
            if is_explanatory_note(block) {
                break;
            }
            if is_banner(block) {
                debug!(pos = self.cursor.position(), "schedules banner");
                self.cursor.advance();
                continue;
            }
            if matches!(block, Block::TableOfContents) {
                self.skip_contents();
                continue;
            }
            let eligible = RuleSet::single(RuleId::Schedule);
            if let Some(schedule) = self.next_in_sequence(eligible, false, &schedules) {
                schedules.push(schedule);
                continue;
            }
            if !self.schedule_ahead() {
                break;
            }
            self.unattributed_block(&mut schedules);
        }
        schedules
    }

    /// Whether a schedule heading comes before the explanatory note.
    fn schedule_ahead(&self) -> bool {
        let rest = &self.cursor.blocks()[self.cursor.position()..];
        rest.iter()
            .take_while(|block| !is_explanatory_note(block))
            .skip(1)
            .any(is_schedule_heading)
    }

    /// The next division if one parses, makes progress and follows the
    /// previous one of its kind. Otherwise the parser is put back and a
    /// hard error, if any, is recorded.
    fn next_in_sequence(
        &mut self,
        eligible: RuleSet,
        second_level: bool,
        previous: &[Division],
    ) -> Option<Division> {
        let snapshot = self.snapshot();
        let start = self.cursor.position();
        match self.next_division(eligible, second_level) {
            ParseOutcome::ConsumedOk { value } | ParseOutcome::EmptyOk { value }
                if self.cursor.position() > start && follows_previous(previous, &value) =>
            {
                return Some(value);
            }
            ParseOutcome::ConsumedOk { value } | ParseOutcome::EmptyOk { value } => {
                debug!(pos = start, kind = value.kind.name(), number = ?value.number_text(), "division out of sequence");
            }
            ParseOutcome::ConsumedErr { error, .. } => {
                warn!(pos = start, %error, "recovering from structural error");
                self.record_error(error);
            }
            ParseOutcome::EmptyErr { .. } => {}
        }
        self.restore(snapshot);
        None
    }

    fn skip_contents(&mut self) {
        let position = self.cursor.position();
        debug!(position, "skipping table of contents");
        self.warn(ParseWarning::SkippedContents { position });
        self.cursor.advance();
    }

    /// Keep the current block as `Unknown`, joining it to an `Unknown`
    /// division that ends right before it.
    fn unattributed_block(&mut self, divisions: &mut Vec<Division>) {
        let position = self.cursor.position();
        let Some(block) = self.cursor.advance() else {
            return;
        };
        warn!(position, text = %block.display_text(), "unattributed block");
        self.unattributed.push(position);
        self.warn(ParseWarning::Unattributed { position });

        if let Some(last) = divisions.last_mut() {
            let adjacent = last.kind == DivisionKind::Unknown && last.span.end as usize == position;
            if let (true, DivisionBody::Leaf { contents }) = (adjacent, &mut last.body) {
                contents.push(Content::Block(block.clone()));
                last.span = Span::from_positions(last.span.start as usize, position + 1);
                return;
            }
        }
        divisions.push(Division::unknown(
            vec![block.clone()],
            Span::from_positions(position, position + 1),
        ));
    }
}

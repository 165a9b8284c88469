//! Quoted structures.
//!
//! A quotation opens on a block whose text starts with an opening mark,
//! optionally after a `{docType-context}` frame annotation, and runs until a
//! line whose trailing closing marks close it. The interior is parsed with
//! the ordinary rules under the quotation's frame, with its own provision
//! record and with schedule and table flags cleared.
//!
//! Several quotations can open on the same line (`“‘(a) ...`) and one line
//! can close several (`... text.’”.`). Quotations that opened on a line are
//! "claimed" on it: their leading marks are not counted again when deciding
//! whether the line opens another, or how many levels its closing marks end.
//! A line ending in `k` closing marks ends `k` levels at once, reported
//! upwards through `trailing_closes`.

pub(crate) mod postpass;

use statute_ir::{Block, Content, Division, Frame, FrameAnnotation, QuotedStructure};
use tracing::debug;

use crate::error::{ParseError, ParseErrorKind, ParseWarning};
use crate::grammar::{is_second_level, QUOTE_INTERIOR};
use crate::outcome::{ParseOutcome, RuleId};
use crate::text::quotes;
use crate::Parser;

/// Text whose closing marks end quotations: the last line of a table, the
/// number and text of a numbered line.
fn closing_text(block: &Block) -> String {
    match block {
        Block::Table(table) => table
            .last_line()
            .map(|line| line.text.clone())
            .unwrap_or_default(),
        other => other.display_text(),
    }
}

impl Parser<'_> {
    /// Whether the current block opens a quotation not already open.
    pub(crate) fn opens_quotation_here(&self) -> bool {
        let position = self.cursor.position();
        self.cursor.current().is_some_and(|block| {
            quotes::opens_quotation(&block.display_text(), self.state.claimed_at(position))
        })
    }

    /// How many open quotations the block at `position` closes.
    pub(crate) fn line_closes_at(&self, position: usize) -> usize {
        if self.state.quote_depth == 0 {
            return 0;
        }
        let Some(block) = self.cursor.block_at(position) else {
            return 0;
        };
        let opened_here = match block {
            Block::Table(_) => 0,
            _ => self.state.claimed_at(position),
        };
        quotes::closing_levels(&closing_text(block), opened_here).min(self.state.quote_depth)
    }

    /// How many open quotations end with `division`.
    pub(crate) fn closes_after(&self, division: &Division) -> usize {
        if self.state.quote_depth == 0 {
            return 0;
        }
        match division.last_content() {
            Some(Content::Quoted(quoted)) => quoted.trailing_closes.min(self.state.quote_depth),
            _ if division.span.is_empty() => 0,
            _ => self.line_closes_at(division.span.end as usize - 1),
        }
    }

    /// Whether a content run ending in `contents` has closed the current
    /// quotation. The last content was the last block consumed.
    pub(crate) fn ends_quote(&self, contents: &[Content]) -> bool {
        if self.state.quote_depth == 0 {
            return false;
        }
        match contents.last() {
            None => false,
            Some(Content::Quoted(quoted)) => quoted.trailing_closes > 0,
            Some(Content::Block(_) | Content::Table(_)) => self.closed_by_last_block(),
        }
    }

    /// Whether the last consumed block closes the current quotation.
    pub(crate) fn closed_by_last_block(&self) -> bool {
        self.cursor
            .position()
            .checked_sub(1)
            .is_some_and(|last| self.line_closes_at(last) > 0)
    }

    /// Parse a quotation starting at the current block.
    ///
    /// Fails softly when the quotation limit is reached, when the interior
    /// does not parse, or when a line that should open and close a quotation
    /// does not close it. Running out of blocks inside a multi-line
    /// quotation is a hard error.
    pub(crate) fn quoted_structure(&mut self) -> ParseOutcome<QuotedStructure> {
        let start = self.cursor.position();
        if self.state.quote_depth >= self.config.max_quote_depth {
            self.warn(ParseWarning::QuoteDepthExceeded {
                position: start,
                limit: self.config.max_quote_depth,
            });
            return ParseOutcome::no_match(RuleId::QuotedStructure, start);
        }
        let Some(block) = self.cursor.current() else {
            return ParseOutcome::no_match(RuleId::QuotedStructure, start);
        };
        let text = block.display_text();
        let enclosing = self.frame();
        let (frame, invalid_frame) = if self.state.claimed_at(start) == 0 {
            match Frame::read_leading_annotation(text.trim_start()).0 {
                FrameAnnotation::Absent => (enclosing, false),
                FrameAnnotation::Valid(frame) => (frame, false),
                FrameAnnotation::Invalid => {
                    self.warn(ParseWarning::InvalidFrame { position: start });
                    (enclosing, true)
                }
            }
        } else {
            (enclosing, false)
        };
        let single_line = quotes::is_single_line(&text);

        self.attempt(|p| {
            p.state.enter_quote(frame, start);
            let depth = p.state.quote_depth;
            p.stats.quote_enters += 1;
            p.stats.max_quote_depth = p.stats.max_quote_depth.max(depth);
            debug!(pos = start, depth, %frame, "enter quotation");

            let interior = p.without_context(|p| p.quote_interior(start, single_line));

            p.state.exit_quote();
            p.stats.quote_exits += 1;
            debug!(pos = p.cursor.position(), depth, ok = interior.is_ok(), "exit quotation");

            let build = |(contents, closes): (Vec<Division>, usize)| {
                let mut quoted = QuotedStructure::new(contents, frame, p.cursor.span_from(start));
                quoted.invalid_frame = invalid_frame;
                quoted.trailing_closes = closes.min(depth).saturating_sub(1);
                quoted
            };
            match interior {
                ParseOutcome::ConsumedOk { value } => ParseOutcome::ConsumedOk { value: build(value) },
                ParseOutcome::EmptyOk { value } => ParseOutcome::EmptyOk { value: build(value) },
                ParseOutcome::ConsumedErr {
                    error,
                    consumed_span,
                } => ParseOutcome::ConsumedErr {
                    error,
                    consumed_span,
                },
                ParseOutcome::EmptyErr { expected, position } => {
                    ParseOutcome::EmptyErr { expected, position }
                }
            }
        })
    }

    /// Divisions of a quotation up to the one that closes it, with the
    /// number of levels that division closes.
    fn quote_interior(
        &mut self,
        start: usize,
        single_line: bool,
    ) -> ParseOutcome<(Vec<Division>, usize)> {
        let mut contents: Vec<Division> = Vec::new();
        loop {
            if contents.is_empty() && self.cursor.is_at_end() {
                return ParseOutcome::no_match(RuleId::QuotedStructure, start);
            }
            crate::committed!(self.quote_continues(start));
            let before = self.cursor.position();
            let second_level = contents.last().is_some_and(|last| is_second_level(last.kind));
            let division = match self.next_division(QUOTE_INTERIOR, second_level) {
                ParseOutcome::ConsumedOk { value } | ParseOutcome::EmptyOk { value } => value,
                ParseOutcome::ConsumedErr {
                    error,
                    consumed_span,
                } => {
                    return ParseOutcome::ConsumedErr {
                        error,
                        consumed_span,
                    };
                }
                ParseOutcome::EmptyErr { .. } => {
                    return ParseOutcome::no_match(RuleId::QuotedStructure, start);
                }
            };
            if self.cursor.position() == before {
                return ParseOutcome::no_match(RuleId::QuotedStructure, start);
            }
            let closes = self.closes_after(&division);
            contents.push(division);
            if closes > 0 {
                return ParseOutcome::consumed_ok((contents, closes));
            }
            if single_line {
                debug!(pos = start, "single-line quotation left open");
                return ParseOutcome::no_match(RuleId::QuotedStructure, start);
            }
        }
    }

    /// A quotation needs more blocks: the stream must not have ended.
    fn quote_continues(&self, start: usize) -> Result<(), ParseError> {
        if self.cursor.is_at_end() {
            Err(ParseError::new(
                ParseErrorKind::UnterminatedQuote { start },
                self.cursor.position(),
            )
            .while_parsing(RuleId::QuotedStructure))
        } else {
            Ok(())
        }
    }
}

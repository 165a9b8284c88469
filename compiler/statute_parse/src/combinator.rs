//! Backtracking combinators.
//!
//! `attempt` is the single rollback point: it snapshots the parser, runs a
//! rule and, when the rule fails without committing, puts everything back.
//! Grammar rules never restore for themselves; they return `EmptyErr` and
//! let the combinator undo whatever they looked at.

use statute_ir::Block;
use tracing::trace;

use crate::context::ParseContext;
use crate::outcome::ParseOutcome;
use crate::snapshot::ParserSnapshot;
use crate::Parser;

impl<'a> Parser<'a> {
    /// Capture the cursor position and parser state.
    #[inline]
    pub fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot::new(self.cursor.position(), self.state.clone())
    }

    /// Return to a snapshot.
    #[inline]
    pub fn restore(&mut self, snapshot: ParserSnapshot) {
        self.cursor.set_position(snapshot.cursor_pos);
        self.state = snapshot.state;
    }

    /// Run `rule`, restoring the parser if it fails without committing.
    ///
    /// After an `EmptyErr` the position and state equal their values before
    /// the call, however far the rule got before giving up.
    pub fn attempt<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> ParseOutcome<T>,
    ) -> ParseOutcome<T> {
        let snapshot = self.snapshot();
        let outcome = rule(self);
        if outcome.failed_without_progress() {
            trace!(pos = snapshot.cursor_pos, "rollback");
            self.restore(snapshot);
        }
        outcome
    }

    /// Repeat `rule` while `cond` accepts the current block.
    ///
    /// Stops at the end of the stream, at the first soft failure (which is
    /// rolled back) or when an attempt succeeds without consuming anything.
    /// A hard failure is returned as is.
    pub fn attempt_while<T>(
        &mut self,
        mut cond: impl FnMut(&Block) -> bool,
        mut rule: impl FnMut(&mut Self) -> ParseOutcome<T>,
    ) -> ParseOutcome<Vec<T>> {
        let start = self.cursor.position();
        let mut values = Vec::new();
        while let Some(block) = self.cursor.current() {
            if !cond(block) {
                break;
            }
            let before = self.cursor.position();
            match self.attempt(&mut rule) {
                ParseOutcome::ConsumedOk { value } => values.push(value),
                ParseOutcome::EmptyOk { value } => {
                    values.push(value);
                    if self.cursor.position() == before {
                        break;
                    }
                }
                ParseOutcome::ConsumedErr {
                    error,
                    consumed_span,
                } => {
                    return ParseOutcome::ConsumedErr {
                        error,
                        consumed_span,
                    };
                }
                ParseOutcome::EmptyErr { .. } => break,
            }
        }
        if self.cursor.position() > start {
            ParseOutcome::consumed_ok(values)
        } else {
            ParseOutcome::empty_ok(values)
        }
    }

    /// Run `f` and restore the parser afterwards, whatever it returned.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    /// Consume the current block if `pred` accepts it.
    #[inline]
    pub(crate) fn match_block(&mut self, pred: impl FnOnce(&Block) -> bool) -> Option<&'a Block> {
        self.cursor.advance_if(pred)
    }

    /// Consume blocks while `pred` accepts them.
    #[inline]
    pub(crate) fn match_while(&mut self, pred: impl FnMut(&Block) -> bool) -> &'a [Block] {
        self.cursor.advance_while(pred)
    }

    /// Run `f` with `flag` set, restoring the previous flags afterwards.
    pub(crate) fn with_context<T>(
        &mut self,
        flag: ParseContext,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.state.context;
        self.state.context = saved.with(flag);
        let result = f(self);
        self.state.context = saved;
        result
    }

    /// Run `f` with every flag cleared, as at the start of a quotation.
    pub(crate) fn without_context<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.state.context;
        self.state.context = ParseContext::NONE;
        let result = f(self);
        self.state.context = saved;
        result
    }
}

//! Mutable parser state.
//!
//! Everything a rule's result can depend on besides the block position
//! lives here, is captured whole by snapshots, and feeds the memo key. The
//! quotation stacks move together: entering a quotation pushes one entry on
//! each, leaving pops one from each.

use serde::Serialize;
use smallvec::{smallvec, SmallVec};
use statute_ir::Frame;

use crate::context::ParseContext;
use crate::text::numbers::SeqValue;

/// Last primary provision numbers seen at one quotation depth.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProvisionRecords {
    pub body: Option<SeqValue>,
    pub schedule: Option<SeqValue>,
}

impl ProvisionRecords {
    pub fn get(&self, in_schedule: bool) -> Option<SeqValue> {
        if in_schedule {
            self.schedule
        } else {
            self.body
        }
    }

    pub fn set(&mut self, in_schedule: bool, value: SeqValue) {
        if in_schedule {
            self.schedule = Some(value);
        } else {
            self.body = Some(value);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserState {
    /// Open quotations.
    pub quote_depth: usize,
    /// Frame of each open quotation, innermost last.
    pub frames: SmallVec<[Frame; 4]>,
    /// Block position each open quotation started at, innermost last.
    pub quote_starts: SmallVec<[usize; 4]>,
    /// One record per quotation depth; index 0 is the document itself.
    pub records: SmallVec<[ProvisionRecords; 4]>,
    /// Division nesting depth.
    pub nesting: usize,
    pub context: ParseContext,
}

impl Default for ParserState {
    fn default() -> Self {
        ParserState {
            quote_depth: 0,
            frames: SmallVec::new(),
            quote_starts: SmallVec::new(),
            records: smallvec![ProvisionRecords::default()],
            nesting: 0,
            context: ParseContext::NONE,
        }
    }
}

impl ParserState {
    pub fn in_quote(&self) -> bool {
        self.quote_depth > 0
    }

    pub fn record(&self) -> &ProvisionRecords {
        &self.records[self.records.len() - 1]
    }

    pub fn record_mut(&mut self) -> &mut ProvisionRecords {
        let last = self.records.len() - 1;
        &mut self.records[last]
    }

    /// How many open quotations started at `pos`. Their opening marks are
    /// already accounted for on that line.
    pub fn claimed_at(&self, pos: usize) -> usize {
        self.quote_starts.iter().filter(|&&start| start == pos).count()
    }

    pub fn enter_quote(&mut self, frame: Frame, pos: usize) {
        self.quote_depth += 1;
        self.frames.push(frame);
        self.quote_starts.push(pos);
        self.records.push(ProvisionRecords::default());
    }

    pub fn exit_quote(&mut self) {
        debug_assert!(self.quote_depth > 0, "exit_quote without a matching enter");
        self.quote_depth = self.quote_depth.saturating_sub(1);
        self.frames.pop();
        self.quote_starts.pop();
        if self.records.len() > 1 {
            self.records.pop();
        }
    }
}

/// Counters reported with the parse output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub memo_hits: usize,
    pub memo_misses: usize,
    pub quote_enters: usize,
    pub quote_exits: usize,
    pub max_quote_depth: usize,
}

impl ParseStats {
    /// Fold in the counters of a nested parse (a table cell).
    pub fn absorb(&mut self, other: &ParseStats) {
        self.memo_hits += other.memo_hits;
        self.memo_misses += other.memo_misses;
        self.quote_enters += other.quote_enters;
        self.quote_exits += other.quote_exits;
        self.max_quote_depth = self.max_quote_depth.max(other.max_quote_depth);
    }
}

#[cfg(test)]
mod tests;

//! Parser snapshots for backtracking.
//!
//! A snapshot is the cursor position plus a copy of [`ParserState`]. The
//! state is small (its stacks are inline up to four quotation levels), so
//! taking one before every attempt is cheap. Warnings, errors and stats are
//! not captured: they describe what the parser tried, not where it is.

use crate::state::ParserState;

#[derive(Clone, Debug)]
pub struct ParserSnapshot {
    pub(crate) cursor_pos: usize,
    pub(crate) state: ParserState,
}

impl ParserSnapshot {
    #[inline]
    pub(crate) fn new(cursor_pos: usize, state: ParserState) -> Self {
        Self { cursor_pos, state }
    }
}

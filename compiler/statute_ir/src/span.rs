//! Block-position spans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open range of block positions covered by a node.
///
/// Layout: 8 bytes total
/// - start: u32 - index of the first block
/// - end: u32 - index one past the last block
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create from block positions, saturating at `u32::MAX`.
    #[inline]
    pub fn from_positions(start: usize, end: usize) -> Self {
        let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Span {
            start: clamp(start),
            end: clamp(end),
        }
    }

    /// A zero-width span at a position.
    #[inline]
    pub fn point(pos: usize) -> Self {
        Self::from_positions(pos, pos)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

//! Parse context flags.
//!
//! Flags that change how rules behave in part of the document without being
//! part of the block stream itself. They are saved in snapshots and in memo
//! keys, so a rule never sees a cached result computed under other flags.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ParseContext(u8);

impl ParseContext {
    pub const NONE: Self = Self(0);

    /// Inside a schedule: provisions are paragraphs and groupings take their
    /// schedule kinds.
    pub const IN_SCHEDULE: Self = Self(1 << 0);

    /// Inside a table cell.
    pub const IN_TABLE: Self = Self(1 << 1);

    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    #[inline]
    #[must_use]
    pub const fn without(self, flag: Self) -> Self {
        Self(self.0 & !flag.0)
    }

    #[inline]
    pub const fn in_schedule(self) -> bool {
        self.has(Self::IN_SCHEDULE)
    }

    #[inline]
    pub const fn in_table(self) -> bool {
        self.has(Self::IN_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_combine() {
        let ctx = ParseContext::NONE.with(ParseContext::IN_SCHEDULE);
        assert!(ctx.in_schedule());
        assert!(!ctx.in_table());
        let ctx = ctx.with(ParseContext::IN_TABLE).without(ParseContext::IN_SCHEDULE);
        assert!(ctx.in_table());
        assert!(!ctx.in_schedule());
    }
}

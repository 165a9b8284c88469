//! Four-way rule outcome and backtracking macros.
//!
//! | Progress | Result | Variant | Meaning |
//! |----------|--------|---------|---------|
//! | Consumed | Ok | `ConsumedOk` | Rule matched and consumed blocks |
//! | Empty | Ok | `EmptyOk` | Optional part absent |
//! | Consumed | Err | `ConsumedErr` | Committed and failed; do not backtrack |
//! | Empty | Err | `EmptyErr` | No match; the caller tries the next rule |
//!
//! A rule that fails softly may have looked at (and even advanced past)
//! blocks before giving up; the combinators in [`crate::combinator`] restore
//! the snapshot taken before the attempt, so from the caller's point of view
//! nothing was consumed.

use std::fmt;

use serde::Serialize;
use statute_ir::Span;

use crate::error::ParseError;

/// Identity of a grammar rule, used for memo keys and expected sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum RuleId {
    GroupOfParts = 0,
    Part,
    Chapter,
    CrossHeading,
    GroupingSection,
    PrimaryProvision,
    SecondaryProvision,
    SubParagraph1,
    SubParagraph2,
    SubParagraph3,
    Schedule,
    Definition,
    Signatures,
    UnnumberedParagraph,
    QuotedStructure,
    /// The "next division" dispatch over a set of eligible rules.
    Dispatch,
}

impl RuleId {
    pub const ALL: [RuleId; 16] = [
        RuleId::GroupOfParts,
        RuleId::Part,
        RuleId::Chapter,
        RuleId::CrossHeading,
        RuleId::GroupingSection,
        RuleId::PrimaryProvision,
        RuleId::SecondaryProvision,
        RuleId::SubParagraph1,
        RuleId::SubParagraph2,
        RuleId::SubParagraph3,
        RuleId::Schedule,
        RuleId::Definition,
        RuleId::Signatures,
        RuleId::UnnumberedParagraph,
        RuleId::QuotedStructure,
        RuleId::Dispatch,
    ];

    #[inline]
    const fn bit(self) -> u32 {
        1 << (self as u8)
    }

    /// Phrase for "while parsing {description}".
    pub const fn description(self) -> &'static str {
        match self {
            RuleId::GroupOfParts => "a group of parts",
            RuleId::Part => "a part",
            RuleId::Chapter => "a chapter",
            RuleId::CrossHeading => "a cross-heading",
            RuleId::GroupingSection => "a grouping section",
            RuleId::PrimaryProvision => "a provision",
            RuleId::SecondaryProvision => "a sub-provision",
            RuleId::SubParagraph1 => "a lettered paragraph",
            RuleId::SubParagraph2 => "a numeral paragraph",
            RuleId::SubParagraph3 => "a capital-lettered paragraph",
            RuleId::Schedule => "a schedule",
            RuleId::Definition => "a definition",
            RuleId::Signatures => "a signature block",
            RuleId::UnnumberedParagraph => "an unnumbered paragraph",
            RuleId::QuotedStructure => "a quotation",
            RuleId::Dispatch => "a division",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A set of rules as a bitset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RuleSet(u32);

impl RuleSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn single(rule: RuleId) -> Self {
        Self(rule.bit())
    }

    #[inline]
    #[must_use]
    pub const fn with(self, rule: RuleId) -> Self {
        Self(self.0 | rule.bit())
    }

    #[inline]
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub const fn contains(self, rule: RuleId) -> bool {
        self.0 & rule.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn union_with(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn iter(self) -> impl Iterator<Item = RuleId> {
        RuleId::ALL.into_iter().filter(move |r| self.contains(*r))
    }

    /// "a part, a chapter or a provision", or "nothing".
    pub fn format_expected(self) -> String {
        let names: Vec<&str> = self.iter().map(RuleId::description).collect();
        match names.as_slice() {
            [] => "nothing".to_string(),
            [one] => (*one).to_string(),
            [init @ .., last] => format!("{} or {last}", init.join(", ")),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ParseOutcome<T> {
    ConsumedOk {
        value: T,
    },
    EmptyOk {
        value: T,
    },
    ConsumedErr {
        error: ParseError,
        /// Blocks consumed before the failure.
        consumed_span: Span,
    },
    EmptyErr {
        /// Rules that would have been accepted here.
        expected: RuleSet,
        /// Block index of the mismatch.
        position: usize,
    },
}

impl<T> ParseOutcome<T> {
    #[inline]
    pub fn consumed_ok(value: T) -> Self {
        Self::ConsumedOk { value }
    }

    #[inline]
    pub fn empty_ok(value: T) -> Self {
        Self::EmptyOk { value }
    }

    #[cold]
    pub fn consumed_err(error: ParseError, consumed_span: Span) -> Self {
        Self::ConsumedErr {
            error,
            consumed_span,
        }
    }

    #[inline]
    pub fn empty_err(expected: RuleSet, position: usize) -> Self {
        Self::EmptyErr { expected, position }
    }

    #[inline]
    pub fn no_match(rule: RuleId, position: usize) -> Self {
        Self::EmptyErr {
            expected: RuleSet::single(rule),
            position,
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::ConsumedOk { .. } | Self::EmptyOk { .. })
    }

    #[inline]
    pub fn failed_without_progress(&self) -> bool {
        matches!(self, Self::EmptyErr { .. })
    }

    /// Attach "while parsing {rule}" to hard errors.
    #[must_use]
    pub fn while_parsing(self, rule: RuleId) -> Self {
        match self {
            Self::ConsumedErr {
                error,
                consumed_span,
            } => Self::ConsumedErr {
                error: error.while_parsing(rule),
                consumed_span,
            },
            other => other,
        }
    }

    /// # Panics
    /// Panics if this is an error variant.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::ConsumedOk { value } | Self::EmptyOk { value } => value,
            Self::ConsumedErr { error, .. } => {
                panic!("called `ParseOutcome::unwrap()` on `ConsumedErr`: {error}")
            }
            Self::EmptyErr { expected, position } => panic!(
                "called `ParseOutcome::unwrap()` on `EmptyErr` at block {position}: expected {}",
                expected.format_expected()
            ),
        }
    }
}

/// Try alternatives in order, restoring the parser between them.
///
/// The first success or hard error wins. If every alternative fails softly
/// the result is an `EmptyErr` carrying the union of their expected sets.
#[macro_export]
macro_rules! one_of {
    ($self:expr, $($alt:expr),+ $(,)?) => {{
        let original = $self.snapshot();
        let mut expected = $crate::outcome::RuleSet::new();
        let mut position: usize = $self.cursor.position();
        'alternatives: {
            $(
                match $alt {
                    $crate::ParseOutcome::EmptyErr { expected: e, position: p } => {
                        expected.union_with(e);
                        position = position.max(p);
                        $self.restore(original.clone());
                    }
                    outcome => break 'alternatives outcome,
                }
            )+
            $crate::ParseOutcome::EmptyErr { expected, position }
        }
    }};
}

/// Optional sub-parse: `Some(value)` on success, `None` (restored) on a soft
/// failure, early return on a hard error.
#[macro_export]
macro_rules! try_outcome {
    ($self:expr, $parser:expr) => {{
        let snapshot = $self.snapshot();
        match $parser {
            $crate::ParseOutcome::ConsumedOk { value }
            | $crate::ParseOutcome::EmptyOk { value } => Some(value),
            $crate::ParseOutcome::ConsumedErr {
                error,
                consumed_span,
            } => {
                return $crate::ParseOutcome::ConsumedErr {
                    error,
                    consumed_span,
                };
            }
            $crate::ParseOutcome::EmptyErr { .. } => {
                $self.restore(snapshot);
                None
            }
        }
    }};
}

/// Unwrap a required sub-parse, returning any failure from the enclosing
/// function.
#[macro_export]
macro_rules! chain {
    ($parser:expr) => {{
        match $parser {
            $crate::ParseOutcome::ConsumedOk { value }
            | $crate::ParseOutcome::EmptyOk { value } => value,
            $crate::ParseOutcome::ConsumedErr {
                error,
                consumed_span,
            } => {
                return $crate::ParseOutcome::ConsumedErr {
                    error,
                    consumed_span,
                };
            }
            $crate::ParseOutcome::EmptyErr { expected, position } => {
                return $crate::ParseOutcome::EmptyErr { expected, position };
            }
        }
    }};
}

/// Bridge a `Result` into a committed path: an `Err` becomes a hard error
/// at the error's position.
#[macro_export]
macro_rules! committed {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(error) => {
                let span = $crate::Span::point(error.position);
                return $crate::ParseOutcome::consumed_err(error, span);
            }
        }
    };
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

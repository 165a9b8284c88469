//! Sibling sequence validation.
//!
//! Two adjacent divisions of the same kind are accepted as siblings only if
//! the second is numbered as the successor of the first: `4` then `5`, `4`
//! then `4A`, `4A` then `4B` or `5`, `(z)` then `(aa)`, `(iv)` then `(v)`.
//! The same successor test gates headingless provisions against the last
//! provision number recorded at the current quotation depth.

use statute_ir::{Division, DivisionKind};

use crate::text::numbers::{self, SeqValue};
use crate::text::patterns;

/// Sequence value of a number token for a division of `kind`.
pub fn value_of(kind: DivisionKind, number: &str) -> Option<SeqValue> {
    match kind {
        DivisionKind::PrimaryProvision => numbers::primary(number),
        DivisionKind::SecondaryProvision => numbers::secondary(number),
        DivisionKind::SubParagraph1 => numbers::lettered(number),
        DivisionKind::SubParagraph2 => numbers::roman(number),
        DivisionKind::SubParagraph3 => numbers::upper(number),
        DivisionKind::GroupOfParts => {
            patterns::group_of_parts_label(numbers::bare(number)).and_then(numbers::grouping)
        }
        DivisionKind::Part | DivisionKind::SchedulePart => {
            patterns::part_label(numbers::bare(number)).and_then(numbers::grouping)
        }
        DivisionKind::Chapter | DivisionKind::ScheduleChapter => {
            patterns::chapter_label(numbers::bare(number)).and_then(numbers::grouping)
        }
        DivisionKind::Schedule => {
            patterns::schedule_label(numbers::bare(number)).and_then(numbers::grouping)
        }
        _ => None,
    }
}

/// `next` is the successor of `prev`.
pub fn follows(prev: SeqValue, next: SeqValue) -> bool {
    if prev.style != next.style {
        return false;
    }
    let successor = prev.ordinal.checked_add(1) == Some(next.ordinal) && next.suffix == 0;
    let inserted =
        next.ordinal == prev.ordinal && prev.suffix.checked_add(1) == Some(next.suffix);
    successor || inserted
}

/// Whether a headingless provision numbered `next` may follow the recorded
/// provision. With nothing recorded, only the first number qualifies, except
/// inside a quotation, where the excerpt may start anywhere.
pub fn follows_record(record: Option<SeqValue>, next: SeqValue, in_quote: bool) -> bool {
    match record {
        Some(prev) => follows(prev, next),
        None => in_quote || next.is_first(),
    }
}

/// Whether `next` may stand as the sibling after `prev`.
///
/// Kinds without numbering always may. Numbered kinds need both numbers to
/// read in the kind's style and `next` to follow `prev`.
pub fn is_next_sibling(prev: &Division, next: &Division) -> bool {
    if prev.kind != next.kind || !next.kind.is_sequenced() {
        return true;
    }
    let value = |d: &Division| d.number_text().and_then(|n| value_of(d.kind, n));
    match (value(prev), value(next)) {
        (Some(prev), Some(next)) => follows(prev, next),
        _ => false,
    }
}

/// Inside lettered paragraph `parent`, a numeral-looking `candidate` whose
/// letter is the parent's successor continues the lettering instead: under
/// `(h)`, `(i)` is the next lettered paragraph, not a first numeral.
pub fn continues_lettering(parent: &str, candidate: &str) -> bool {
    match (numbers::lettered(parent), numbers::lettered(candidate)) {
        (Some(parent), Some(candidate)) => {
            parent.ordinal.checked_add(1) == Some(candidate.ordinal)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests;

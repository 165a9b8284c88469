//! Grammar rules.
//!
//! One rule per division kind, all following the same shape: look ahead at
//! the heading or number, consume it, take the intro, stop early if the
//! intro ends a quotation, then loop over children, validating each against
//! the parent and its previous sibling, and finally take any wrap-up text.
//!
//! Every rule runs through [`Parser::rule`], which applies the nesting
//! guard, grows the stack when needed, consults the memo table and makes
//! the rule's soft failure roll back.

mod content;
mod definition;
mod groups;
mod paragraphs;
mod provision;
mod schedule;
mod signature;

use statute_ir::{Division, DivisionKind, TagName};
use tracing::{debug, trace};

use crate::error::ParseWarning;
use crate::memo::{MemoEntry, MemoKey};
use crate::outcome::{ParseOutcome, RuleId, RuleSet};
use crate::sequence;
use crate::stack::ensure_sufficient_stack;
use crate::text::numbers;
use crate::Parser;

/// Dispatch order when the previous sibling was not second-level.
const DEFAULT_ORDER: [RuleId; 14] = [
    RuleId::GroupOfParts,
    RuleId::Part,
    RuleId::Chapter,
    RuleId::GroupingSection,
    RuleId::CrossHeading,
    RuleId::Schedule,
    RuleId::PrimaryProvision,
    RuleId::SecondaryProvision,
    RuleId::SubParagraph1,
    RuleId::SubParagraph2,
    RuleId::SubParagraph3,
    RuleId::Definition,
    RuleId::Signatures,
    RuleId::UnnumberedParagraph,
];

/// Dispatch order right after a second-level sibling: the second-level
/// reading of an ambiguous number wins.
const SECOND_LEVEL_ORDER: [RuleId; 14] = [
    RuleId::GroupOfParts,
    RuleId::Part,
    RuleId::Chapter,
    RuleId::GroupingSection,
    RuleId::CrossHeading,
    RuleId::Schedule,
    RuleId::SecondaryProvision,
    RuleId::PrimaryProvision,
    RuleId::SubParagraph2,
    RuleId::SubParagraph1,
    RuleId::SubParagraph3,
    RuleId::Definition,
    RuleId::Signatures,
    RuleId::UnnumberedParagraph,
];

/// Divisions the body loop accepts.
pub(crate) const TOP_LEVEL: RuleSet = RuleSet::new()
    .with(RuleId::GroupOfParts)
    .with(RuleId::Part)
    .with(RuleId::Chapter)
    .with(RuleId::GroupingSection)
    .with(RuleId::CrossHeading)
    .with(RuleId::PrimaryProvision)
    .with(RuleId::Signatures)
    .with(RuleId::UnnumberedParagraph);

/// Divisions that mark the start of the body.
pub(crate) const BODY_STARTERS: RuleSet = RuleSet::new()
    .with(RuleId::GroupOfParts)
    .with(RuleId::Part)
    .with(RuleId::Chapter)
    .with(RuleId::GroupingSection)
    .with(RuleId::CrossHeading)
    .with(RuleId::PrimaryProvision);

/// Divisions a quotation may contain: any excerpt of legislation.
pub(crate) const QUOTE_INTERIOR: RuleSet = RuleSet::new()
    .with(RuleId::GroupOfParts)
    .with(RuleId::Part)
    .with(RuleId::Chapter)
    .with(RuleId::GroupingSection)
    .with(RuleId::CrossHeading)
    .with(RuleId::Schedule)
    .with(RuleId::PrimaryProvision)
    .with(RuleId::SecondaryProvision)
    .with(RuleId::SubParagraph1)
    .with(RuleId::SubParagraph2)
    .with(RuleId::SubParagraph3)
    .with(RuleId::Definition)
    .with(RuleId::UnnumberedParagraph);

const SCHEDULE_BODY: RuleSet = RuleSet::new()
    .with(RuleId::Part)
    .with(RuleId::Chapter)
    .with(RuleId::GroupingSection)
    .with(RuleId::CrossHeading)
    .with(RuleId::PrimaryProvision)
    .with(RuleId::Definition)
    .with(RuleId::UnnumberedParagraph);

/// Rules whose divisions may appear as children of `parent`.
fn children_of(parent: DivisionKind, in_schedule: bool) -> RuleSet {
    let provisions = RuleSet::new()
        .with(RuleId::GroupingSection)
        .with(RuleId::CrossHeading)
        .with(RuleId::PrimaryProvision);
    match parent {
        DivisionKind::GroupOfParts => RuleSet::single(RuleId::Part),
        DivisionKind::Part | DivisionKind::SchedulePart => {
            let set = provisions.with(RuleId::Chapter);
            if in_schedule {
                set.with(RuleId::UnnumberedParagraph)
            } else {
                set
            }
        }
        DivisionKind::Chapter | DivisionKind::ScheduleChapter => {
            if in_schedule {
                provisions.with(RuleId::UnnumberedParagraph)
            } else {
                provisions
            }
        }
        DivisionKind::CrossHeading | DivisionKind::ScheduleCrossHeading => RuleSet::new()
            .with(RuleId::GroupingSection)
            .with(RuleId::PrimaryProvision),
        DivisionKind::GroupingSection | DivisionKind::ScheduleGroupingSection => {
            RuleSet::single(RuleId::PrimaryProvision)
        }
        DivisionKind::PrimaryProvision => RuleSet::new()
            .with(RuleId::SecondaryProvision)
            .with(RuleId::SubParagraph1)
            .with(RuleId::Definition),
        DivisionKind::SecondaryProvision => RuleSet::new()
            .with(RuleId::SubParagraph1)
            .with(RuleId::Definition),
        DivisionKind::SubParagraph1 => RuleSet::single(RuleId::SubParagraph2),
        DivisionKind::SubParagraph2 => RuleSet::single(RuleId::SubParagraph3),
        DivisionKind::Definition => RuleSet::single(RuleId::SubParagraph1),
        DivisionKind::Schedule => SCHEDULE_BODY,
        DivisionKind::SubParagraph3
        | DivisionKind::Signatures
        | DivisionKind::UnnumberedParagraph
        | DivisionKind::Unknown => RuleSet::new(),
    }
}

/// The rule that produces divisions of `kind`.
pub(crate) fn rule_for(kind: DivisionKind) -> Option<RuleId> {
    Some(match kind {
        DivisionKind::GroupOfParts => RuleId::GroupOfParts,
        DivisionKind::Part | DivisionKind::SchedulePart => RuleId::Part,
        DivisionKind::Chapter | DivisionKind::ScheduleChapter => RuleId::Chapter,
        DivisionKind::CrossHeading | DivisionKind::ScheduleCrossHeading => RuleId::CrossHeading,
        DivisionKind::GroupingSection | DivisionKind::ScheduleGroupingSection => {
            RuleId::GroupingSection
        }
        DivisionKind::PrimaryProvision => RuleId::PrimaryProvision,
        DivisionKind::SecondaryProvision => RuleId::SecondaryProvision,
        DivisionKind::SubParagraph1 => RuleId::SubParagraph1,
        DivisionKind::SubParagraph2 => RuleId::SubParagraph2,
        DivisionKind::SubParagraph3 => RuleId::SubParagraph3,
        DivisionKind::Schedule => RuleId::Schedule,
        DivisionKind::Definition => RuleId::Definition,
        DivisionKind::Signatures => RuleId::Signatures,
        DivisionKind::UnnumberedParagraph => RuleId::UnnumberedParagraph,
        DivisionKind::Unknown => return None,
    })
}

/// Kinds after which the next sibling prefers its second-level reading.
pub(crate) fn is_second_level(kind: DivisionKind) -> bool {
    matches!(
        kind,
        DivisionKind::SecondaryProvision | DivisionKind::SubParagraph2
    )
}

impl Parser<'_> {
    /// Run a grammar rule.
    ///
    /// Refuses softly once nesting reaches the configured limit. Otherwise
    /// the rule body runs (or is replayed from the memo table) one level
    /// deeper, and a soft failure leaves the parser exactly as it was.
    pub(crate) fn rule(
        &mut self,
        id: RuleId,
        param: u32,
        body: impl FnOnce(&mut Self) -> ParseOutcome<Division>,
    ) -> ParseOutcome<Division> {
        let position = self.cursor.position();
        if self.state.nesting >= self.config.max_depth {
            self.warn(ParseWarning::DepthExceeded {
                position,
                limit: self.config.max_depth,
            });
            return ParseOutcome::no_match(id, position);
        }
        ensure_sufficient_stack(|| {
            self.memoized(id, param, |p| {
                p.state.nesting += 1;
                trace!(rule = %id, pos = position, depth = p.state.nesting, "enter");
                let outcome = p.attempt(body);
                p.state.nesting -= 1;
                trace!(rule = %id, pos = p.cursor.position(), ok = outcome.is_ok(), "exit");
                outcome.while_parsing(id)
            })
        })
    }

    fn memo_key(&self, rule: RuleId, param: u32) -> MemoKey {
        let position = self.cursor.position();
        MemoKey {
            position,
            rule,
            param,
            quote_depth: self.state.quote_depth,
            claimed: self.state.claimed_at(position),
            frame: self.frame(),
            context: self.state.context,
            nesting: self.state.nesting,
            record: self.state.record().clone(),
        }
    }

    /// Look `rule` up in the memo table, or run it and store the result.
    ///
    /// A hit moves the cursor to the recorded end and restores the
    /// provision record the rule left behind.
    fn memoized(
        &mut self,
        rule: RuleId,
        param: u32,
        body: impl FnOnce(&mut Self) -> ParseOutcome<Division>,
    ) -> ParseOutcome<Division> {
        if !self.memo.is_enabled() {
            return body(self);
        }
        let key = self.memo_key(rule, param);
        if let Some(entry) = self.memo.get(&key) {
            let (end, outcome, record) = (
                entry.end,
                entry.outcome.clone(),
                entry.record_after.clone(),
            );
            self.stats.memo_hits += 1;
            trace!(rule = %rule, pos = key.position, end, "memo hit");
            self.cursor.set_position(end);
            *self.state.record_mut() = record;
            return outcome;
        }
        self.stats.memo_misses += 1;
        let outcome = body(self);
        let entry = MemoEntry {
            end: self.cursor.position(),
            outcome: outcome.clone(),
            record_after: self.state.record().clone(),
        };
        self.memo.insert(key, entry);
        outcome
    }

    /// Parse the next division among the `eligible` rules, in precedence
    /// order. `second_level` is set when the previous sibling was a
    /// second-level division.
    ///
    /// A block that opens a further quotation can only start an unnumbered
    /// paragraph wrapping that quotation.
    pub(crate) fn next_division(
        &mut self,
        eligible: RuleSet,
        second_level: bool,
    ) -> ParseOutcome<Division> {
        let param = eligible.bits() | if second_level { 1 << 31 } else { 0 };
        self.memoized(RuleId::Dispatch, param, |p| {
            let position = p.cursor.position();
            if p.cursor.is_at_end() {
                return ParseOutcome::empty_err(eligible, position);
            }
            let eligible = if p.opens_quotation_here() {
                RuleSet::single(RuleId::UnnumberedParagraph).intersect(eligible)
            } else {
                eligible
            };
            let order = if second_level {
                &SECOND_LEVEL_ORDER
            } else {
                &DEFAULT_ORDER
            };
            let mut expected = RuleSet::new();
            for &rule in order {
                if !eligible.contains(rule) {
                    continue;
                }
                match p.parse_rule(rule) {
                    ParseOutcome::EmptyErr { expected: e, .. } => expected.union_with(e),
                    outcome => return outcome,
                }
            }
            ParseOutcome::empty_err(expected, position)
        })
    }

    fn parse_rule(&mut self, rule: RuleId) -> ParseOutcome<Division> {
        match rule {
            RuleId::GroupOfParts => self.group_of_parts(),
            RuleId::Part => self.part(),
            RuleId::Chapter => self.chapter(),
            RuleId::CrossHeading => self.cross_heading(),
            RuleId::GroupingSection => self.grouping_section(),
            RuleId::PrimaryProvision => self.primary_provision(),
            RuleId::SecondaryProvision => self.secondary_provision(),
            RuleId::SubParagraph1 => self.sub_paragraph1(),
            RuleId::SubParagraph2 => self.sub_paragraph2(),
            RuleId::SubParagraph3 => self.sub_paragraph3(),
            RuleId::Schedule => self.schedule(),
            RuleId::Definition => self.definition(),
            RuleId::Signatures => self.signatures(),
            RuleId::UnnumberedParagraph => self.unnumbered_paragraph(),
            RuleId::QuotedStructure | RuleId::Dispatch => {
                ParseOutcome::no_match(rule, self.cursor.position())
            }
        }
    }

    /// Whether `candidate` may follow `siblings` under `parent`.
    fn is_valid_child(
        &self,
        parent: DivisionKind,
        parent_number: Option<&str>,
        siblings: &[Division],
        candidate: &Division,
    ) -> bool {
        let eligible = children_of(parent, self.state.context.in_schedule());
        if !rule_for(candidate.kind).is_some_and(|rule| eligible.contains(rule)) {
            return false;
        }
        let previous = siblings.iter().rev().find(|s| s.kind == candidate.kind);
        match previous {
            Some(prev) => {
                if !sequence::is_next_sibling(prev, candidate) {
                    return false;
                }
            }
            None => {
                if !self.free_start() && !starts_sequence(candidate) {
                    return false;
                }
            }
        }
        if parent == DivisionKind::SubParagraph1 && candidate.kind == DivisionKind::SubParagraph2 {
            if let (Some(parent), Some(number)) = (parent_number, candidate.number_text()) {
                if sequence::continues_lettering(parent, number) {
                    return false;
                }
            }
        }
        true
    }

    /// Whether a numbered list may start at any number here: inside a
    /// quotation or a table the excerpt may begin mid-sequence.
    pub(crate) fn free_start(&self) -> bool {
        self.state.in_quote() || self.state.context.in_table()
    }

    /// Parse the children of a `parent` division, after any `initial` ones
    /// already taken from the parent's own line.
    ///
    /// Stops at the first division that is not a valid child (restoring the
    /// parser to before it), at the end of the stream, or once a child
    /// closes the enclosing quotation.
    pub(crate) fn children(
        &mut self,
        parent: DivisionKind,
        parent_number: Option<&str>,
        initial: Vec<Division>,
    ) -> ParseOutcome<Vec<Division>> {
        let eligible = children_of(parent, self.state.context.in_schedule());
        let start = self.cursor.position();
        let mut children = initial;
        while !self.cursor.is_at_end() {
            if children.last().is_some_and(|last| self.closes_after(last) > 0) {
                break;
            }
            let second_level = children.last().is_some_and(|last| is_second_level(last.kind));
            let snapshot = self.snapshot();
            match self.next_division(eligible, second_level) {
                ParseOutcome::ConsumedOk { value } | ParseOutcome::EmptyOk { value } => {
                    if self.is_valid_child(parent, parent_number, &children, &value) {
                        debug!(parent = parent.name(), child = value.kind.name(), number = ?value.number_text(), "child");
                        children.push(value);
                    } else {
                        debug!(parent = parent.name(), child = value.kind.name(), number = ?value.number_text(), "child rejected");
                        self.restore(snapshot);
                        break;
                    }
                }
                ParseOutcome::EmptyErr { .. } => {
                    self.restore(snapshot);
                    break;
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
            }
        }
        if self.cursor.position() > start {
            ParseOutcome::consumed_ok(children)
        } else {
            ParseOutcome::empty_ok(children)
        }
    }

    pub(crate) fn tag(&self, kind: DivisionKind) -> TagName {
        TagName::resolve(kind, self.frame())
    }
}

/// The first child of its kind must carry the first number of its style.
fn starts_sequence(candidate: &Division) -> bool {
    let first_only = matches!(
        candidate.kind,
        DivisionKind::SecondaryProvision
            | DivisionKind::SubParagraph1
            | DivisionKind::SubParagraph2
            | DivisionKind::SubParagraph3
    );
    if !first_only {
        return true;
    }
    candidate
        .number_text()
        .and_then(|n| sequence::value_of(candidate.kind, n))
        .is_some_and(numbers::SeqValue::is_first)
}

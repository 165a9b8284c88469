//! Rule result cache.
//!
//! Backtracking re-tries the same rule at the same position many times (the
//! header scan alone probes every block). Results are cached under a key
//! holding the position, the rule and every piece of state the result can
//! depend on. A hit replays the recorded end position and provision record,
//! so parsing with the cache on and off yields the same tree.

use rustc_hash::FxHashMap;
use statute_ir::{Division, Frame};

use crate::context::ParseContext;
use crate::outcome::{ParseOutcome, RuleId};
use crate::state::ProvisionRecords;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemoKey {
    pub position: usize,
    pub rule: RuleId,
    /// Rule parameters: the eligible set and priority hint of a dispatch.
    pub param: u32,
    pub quote_depth: usize,
    /// Open quotations that started at `position`.
    pub claimed: usize,
    pub frame: Frame,
    pub context: ParseContext,
    pub nesting: usize,
    pub record: ProvisionRecords,
}

#[derive(Clone, Debug)]
pub struct MemoEntry {
    pub end: usize,
    pub outcome: ParseOutcome<Division>,
    pub record_after: ProvisionRecords,
}

#[derive(Default)]
pub struct MemoTable {
    enabled: bool,
    entries: FxHashMap<MemoKey, MemoEntry>,
}

impl MemoTable {
    pub fn new(enabled: bool) -> Self {
        MemoTable {
            enabled,
            entries: FxHashMap::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn get(&self, key: &MemoKey) -> Option<&MemoEntry> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: MemoKey, entry: MemoEntry) {
        if self.enabled {
            self.entries.insert(key, entry);
        }
    }
}

#[cfg(test)]
mod tests;

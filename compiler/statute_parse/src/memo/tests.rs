use super::*;
use statute_ir::{Span, TagName};

fn key(position: usize) -> MemoKey {
    MemoKey {
        position,
        rule: RuleId::PrimaryProvision,
        param: 0,
        quote_depth: 0,
        claimed: 0,
        frame: Frame::default(),
        context: ParseContext::NONE,
        nesting: 0,
        record: ProvisionRecords::default(),
    }
}

fn entry(end: usize) -> MemoEntry {
    MemoEntry {
        end,
        outcome: ParseOutcome::consumed_ok(Division::unknown(vec![], Span::new(0, 1))),
        record_after: ProvisionRecords::default(),
    }
}

#[test]
fn test_lookup_by_full_key() {
    let mut table = MemoTable::new(true);
    table.insert(key(0), entry(3));
    assert_eq!(table.get(&key(0)).map(|e| e.end), Some(3));
    assert!(table.get(&key(1)).is_none());

    let mut in_quote = key(0);
    in_quote.quote_depth = 1;
    assert!(table.get(&in_quote).is_none());

    let mut other_rule = key(0);
    other_rule.rule = RuleId::Part;
    assert!(table.get(&other_rule).is_none());
}

#[test]
fn test_disabled_table_stores_nothing() {
    let mut table = MemoTable::new(false);
    table.insert(key(0), entry(1));
    assert!(table.get(&key(0)).is_none());
    assert!(!table.is_enabled());
}

#[test]
fn test_entries_keep_outcome() {
    let mut table = MemoTable::new(true);
    table.insert(key(2), entry(4));
    let cached = table.get(&key(2)).map(|e| e.outcome.clone());
    assert!(matches!(
        cached,
        Some(ParseOutcome::ConsumedOk { value }) if value.tag == TagName::Fixed(statute_ir::DivisionKind::Unknown)
    ));
}

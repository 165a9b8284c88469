use super::*;
use crate::text::numbers::NumberStyle;
use pretty_assertions::assert_eq;
use statute_ir::DocType;

#[test]
fn test_quote_stacks_move_together() {
    let mut state = ParserState::default();
    state.enter_quote(Frame::body(DocType::Act), 3);
    state.enter_quote(Frame::body(DocType::Regulations), 3);
    assert_eq!(state.quote_depth, 2);
    assert_eq!(state.frames.len(), 2);
    assert_eq!(state.records.len(), 3);
    assert_eq!(state.claimed_at(3), 2);
    assert_eq!(state.claimed_at(4), 0);

    state.exit_quote();
    state.exit_quote();
    assert_eq!(state, ParserState::default());
}

#[test]
fn test_records_are_per_depth() {
    let mut state = ParserState::default();
    let five = SeqValue::new(NumberStyle::Decimal, 5);
    state.record_mut().set(false, five);

    state.enter_quote(Frame::default(), 0);
    assert_eq!(state.record().get(false), None);
    state.record_mut().set(false, SeqValue::new(NumberStyle::Decimal, 9));
    state.exit_quote();

    assert_eq!(state.record().get(false), Some(five));
    assert_eq!(state.record().get(true), None);
}

#[test]
fn test_stats_absorb() {
    let mut stats = ParseStats {
        quote_enters: 1,
        max_quote_depth: 1,
        ..ParseStats::default()
    };
    stats.absorb(&ParseStats {
        quote_enters: 2,
        max_quote_depth: 3,
        ..ParseStats::default()
    });
    assert_eq!(stats.quote_enters, 3);
    assert_eq!(stats.max_quote_depth, 3);
}

use super::*;
use crate::error::ParseErrorKind;
use pretty_assertions::assert_eq;

fn hard_error() -> ParseError {
    ParseError::new(ParseErrorKind::UnterminatedQuote { start: 0 }, 4)
}

#[test]
fn test_progress_predicates() {
    let ok: ParseOutcome<i32> = ParseOutcome::consumed_ok(1);
    assert!(ok.is_ok() && !ok.failed_without_progress());

    let empty: ParseOutcome<i32> = ParseOutcome::empty_ok(1);
    assert!(empty.is_ok());

    let hard: ParseOutcome<i32> = ParseOutcome::consumed_err(hard_error(), Span::new(0, 4));
    assert!(!hard.is_ok() && !hard.failed_without_progress());

    let soft: ParseOutcome<i32> = ParseOutcome::no_match(RuleId::Part, 2);
    assert!(!soft.is_ok() && soft.failed_without_progress());
}

#[test]
fn test_while_parsing_only_touches_hard_errors() {
    let hard: ParseOutcome<()> = ParseOutcome::consumed_err(hard_error(), Span::new(0, 1));
    match hard.while_parsing(RuleId::Schedule) {
        ParseOutcome::ConsumedErr { error, .. } => {
            assert_eq!(error.context.as_deref(), Some("while parsing a schedule"));
        }
        other => panic!("expected ConsumedErr, got {other:?}"),
    }
}

#[test]
fn test_rule_set_formatting() {
    assert_eq!(RuleSet::new().format_expected(), "nothing");
    assert_eq!(RuleSet::single(RuleId::Part).format_expected(), "a part");
    let set = RuleSet::new()
        .with(RuleId::Part)
        .with(RuleId::Chapter)
        .with(RuleId::PrimaryProvision);
    assert_eq!(set.format_expected(), "a part, a chapter or a provision");
    assert_eq!(set.iter().count(), 3);
}

/// A minimal parser exercising the macros.
struct Mock {
    cursor: MockCursor,
}

struct MockCursor(usize);

impl MockCursor {
    fn position(&self) -> usize {
        self.0
    }
}

impl Mock {
    fn snapshot(&self) -> usize {
        self.cursor.0
    }

    fn restore(&mut self, pos: usize) {
        self.cursor.0 = pos;
    }

    fn consume_then_fail(&mut self) -> ParseOutcome<&'static str> {
        self.cursor.0 += 3;
        ParseOutcome::no_match(RuleId::Part, self.cursor.0)
    }

    fn succeed(&mut self) -> ParseOutcome<&'static str> {
        self.cursor.0 += 1;
        ParseOutcome::consumed_ok("matched")
    }

    fn optional_then_required(&mut self) -> ParseOutcome<(Option<&'static str>, &'static str)> {
        let first = crate::try_outcome!(self, self.consume_then_fail());
        let second = crate::chain!(self.succeed());
        ParseOutcome::consumed_ok((first, second))
    }
}

#[test]
fn test_one_of_restores_between_alternatives() {
    let mut p = Mock {
        cursor: MockCursor(0),
    };
    let outcome = crate::one_of!(p, p.consume_then_fail(), p.succeed());
    assert_eq!(outcome.unwrap(), "matched");
    assert_eq!(p.cursor.position(), 1);
}

#[test]
fn test_one_of_merges_soft_failures() {
    let mut p = Mock {
        cursor: MockCursor(0),
    };
    let outcome = crate::one_of!(p, p.consume_then_fail(), p.consume_then_fail());
    assert!(outcome.failed_without_progress());
    assert_eq!(p.cursor.position(), 0);
}

#[test]
fn test_try_outcome_and_chain() {
    let mut p = Mock {
        cursor: MockCursor(0),
    };
    let (first, second) = p.optional_then_required().unwrap();
    assert_eq!(first, None);
    assert_eq!(second, "matched");
    assert_eq!(p.cursor.position(), 1);
}

fn committed_path(input: Result<i32, ParseError>) -> ParseOutcome<i32> {
    let value = crate::committed!(input);
    ParseOutcome::consumed_ok(value + 1)
}

#[test]
fn test_committed_turns_errors_hard() {
    assert_eq!(committed_path(Ok(1)).unwrap(), 2);
    let outcome = committed_path(Err(hard_error()));
    match outcome {
        ParseOutcome::ConsumedErr { consumed_span, .. } => {
            assert_eq!(consumed_span, Span::point(4));
        }
        other => panic!("expected ConsumedErr, got {other:?}"),
    }
}

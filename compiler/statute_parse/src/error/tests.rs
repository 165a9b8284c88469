use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_display_includes_code_and_position() {
    let error = ParseError::new(ParseErrorKind::UnterminatedQuote { start: 3 }, 7);
    assert_eq!(
        error.to_string(),
        "[S0001] quotation opened at block 3 is never closed at block 7"
    );
    assert_eq!(error.code(), ErrorCode::S0001);
}

#[test]
fn test_while_parsing_keeps_first_context() {
    let error = ParseError::new(ParseErrorKind::UnterminatedQuote { start: 0 }, 2)
        .while_parsing(RuleId::Schedule)
        .while_parsing(RuleId::PrimaryProvision);
    assert_eq!(error.context.as_deref(), Some("while parsing a schedule"));
}

#[test]
fn test_code_is_stable() {
    assert_eq!(ErrorCode::S0001.as_str(), "S0001");
    assert_eq!(ErrorCode::S0001.to_string(), "S0001");
}

#[test]
fn test_warning_position() {
    assert_eq!(ParseWarning::Unattributed { position: 9 }.position(), 9);
    assert_eq!(
        ParseWarning::QuoteDepthExceeded {
            position: 2,
            limit: 8
        }
        .position(),
        2
    );
}

#[test]
fn test_relocated_keeps_variant() {
    let warning = ParseWarning::DepthExceeded {
        position: 1,
        limit: 4,
    }
    .relocated(12);
    assert_eq!(
        warning,
        ParseWarning::DepthExceeded {
            position: 12,
            limit: 4
        }
    );
}

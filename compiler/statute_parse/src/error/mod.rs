//! Parse errors and warnings.
//!
//! Errors are hard failures a rule committed to, such as a quotation that
//! never closes. The assembler records them and
//! resumes at the next block. Warnings are non-fatal observations such as a
//! nesting limit being hit or a block that no rule could attribute.

use std::fmt;

use serde::Serialize;

use crate::outcome::RuleId;

/// Stable code identifying a class of parse error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    /// A multi-line quotation was never closed.
    S0001,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::S0001 => "S0001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("quotation opened at block {start} is never closed")]
    UnterminatedQuote { start: usize },
}

impl ParseErrorKind {
    pub const fn code(&self) -> ErrorCode {
        match self {
            ParseErrorKind::UnterminatedQuote { .. } => ErrorCode::S0001,
        }
    }
}

/// A structural parse error at a block position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[error("[{}] {} at block {}", .kind.code(), .kind, .position)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Block index the error was detected at.
    pub position: usize,
    /// Optional "while parsing X" note.
    pub context: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        ParseError {
            kind,
            position,
            context: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach "while parsing {rule}" unless a context is already present.
    #[must_use]
    pub fn while_parsing(self, rule: RuleId) -> Self {
        if self.context.is_some() {
            return self;
        }
        self.with_context(format!("while parsing {}", rule.description()))
    }
}

/// Non-fatal diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum ParseWarning {
    /// A rule was refused because nesting reached the limit.
    DepthExceeded { position: usize, limit: usize },
    /// Quotations nested deeper than the limit were not opened.
    QuoteDepthExceeded { position: usize, limit: usize },
    /// A frame annotation could not be read; the enclosing frame was used.
    InvalidFrame { position: usize },
    /// A block no rule accepted, kept as an `Unknown` division.
    Unattributed { position: usize },
    /// A table-of-contents marker in the body was skipped.
    SkippedContents { position: usize },
}

impl ParseWarning {
    pub fn position(&self) -> usize {
        match self {
            ParseWarning::DepthExceeded { position, .. }
            | ParseWarning::QuoteDepthExceeded { position, .. }
            | ParseWarning::InvalidFrame { position }
            | ParseWarning::Unattributed { position }
            | ParseWarning::SkippedContents { position } => *position,
        }
    }

    /// The same warning reported at `position`, for diagnostics raised
    /// inside a table cell and attributed to the table.
    #[must_use]
    pub fn relocated(self, position: usize) -> Self {
        match self {
            ParseWarning::DepthExceeded { limit, .. } => {
                ParseWarning::DepthExceeded { position, limit }
            }
            ParseWarning::QuoteDepthExceeded { limit, .. } => {
                ParseWarning::QuoteDepthExceeded { position, limit }
            }
            ParseWarning::InvalidFrame { .. } => ParseWarning::InvalidFrame { position },
            ParseWarning::Unattributed { .. } => ParseWarning::Unattributed { position },
            ParseWarning::SkippedContents { .. } => ParseWarning::SkippedContents { position },
        }
    }
}

#[cfg(test)]
mod tests;

//! Structural grammar parser for legislation.
//!
//! Turns the flat block stream produced by the pre-parser into the
//! `Document` tree of `statute_ir`: header, body divisions, schedules and
//! closing material.
//!
//! # Architecture
//!
//! - [`cursor`]: position into the block stream
//! - [`combinator`]: `attempt`/`attempt_while`, the single rollback point
//! - [`memo`]: packrat cache keyed by position, rule and parser state
//! - [`grammar`]: one rule per division kind plus the "next division" dispatch
//! - [`quoted`]: quoted structures and the quote-mark post-pass
//! - [`sequence`]: sibling numbering validation
//! - [`assemble`]: header, body, schedules and conclusions
//!
//! Rules return a [`ParseOutcome`]. Failing to match is ordinary control
//! flow (`EmptyErr`); only a rule that committed and then could not finish
//! produces a hard error, which the assembler records before resuming.

mod assemble;
mod combinator;
pub mod config;
mod context;
mod cursor;
pub mod error;
mod grammar;
mod memo;
pub mod outcome;
mod quoted;
pub mod sequence;
mod snapshot;
mod stack;
mod state;
pub mod text;

pub use config::ParserConfig;
pub use context::ParseContext;
pub use cursor::Cursor;
pub use error::{ErrorCode, ParseError, ParseErrorKind, ParseWarning};
pub use outcome::{ParseOutcome, RuleId, RuleSet};
pub use snapshot::ParserSnapshot;
pub use state::ParseStats;
pub use statute_ir::Span;

use std::sync::Once;

use serde::Serialize;
use statute_ir::{Block, Document, Frame};
use tracing::debug;

use crate::memo::MemoTable;
use crate::state::ParserState;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only the first call has any
/// effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: &'a ParserConfig,
    /// Frame of the stream itself, used outside any quotation.
    base: Frame,
    state: ParserState,
    memo: MemoTable,
    stats: ParseStats,
    warnings: Vec<ParseWarning>,
    errors: Vec<ParseError>,
    unattributed: Vec<usize>,
}

impl<'a> Parser<'a> {
    pub fn new(blocks: &'a [Block], config: &'a ParserConfig, base: Frame) -> Self {
        Parser {
            cursor: Cursor::new(blocks),
            config,
            base,
            state: ParserState::default(),
            memo: MemoTable::new(config.memoize),
            stats: ParseStats::default(),
            warnings: Vec::new(),
            errors: Vec::new(),
            unattributed: Vec::new(),
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn quote_depth(&self) -> usize {
        self.state.quote_depth
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// The frame rules run under: the innermost quotation's, else the
    /// stream's, switched to its schedule variant inside a schedule.
    pub(crate) fn frame(&self) -> Frame {
        let frame = self.state.frames.last().copied().unwrap_or(self.base);
        if self.state.context.in_schedule() {
            frame.in_schedule()
        } else {
            frame
        }
    }

    pub(crate) fn warn(&mut self, warning: ParseWarning) {
        if !self.warnings.contains(&warning) {
            debug!(?warning, "parse warning");
            self.warnings.push(warning);
        }
    }

    pub(crate) fn record_error(&mut self, error: ParseError) {
        if !self.errors.iter().any(|e| e.kind == error.kind) {
            self.errors.push(error);
        }
    }

    fn finish(self, document: Document) -> ParseOutput {
        ParseOutput {
            document,
            errors: self.errors,
            warnings: self.warnings,
            unattributed: self.unattributed,
            stats: self.stats,
        }
    }
}

/// Everything a parse produces.
#[derive(Clone, Debug, Serialize)]
pub struct ParseOutput {
    pub document: Document,
    pub errors: Vec<ParseError>,
    pub warnings: Vec<ParseWarning>,
    /// Positions of blocks no rule could attribute to a division.
    pub unattributed: Vec<usize>,
    pub stats: ParseStats,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a whole document.
pub fn parse(blocks: &[Block], config: &ParserConfig) -> ParseOutput {
    let mut parser = Parser::new(blocks, config, Frame::body(config.doc_type));
    let document = parser.parse_document();
    parser.finish(document)
}

/// Parse a block list as a plain run of divisions, with no header or
/// schedule detection. The result has only a body.
pub fn parse_divisions(blocks: &[Block], config: &ParserConfig) -> ParseOutput {
    let mut parser = Parser::new(blocks, config, Frame::body(config.doc_type));
    let mut body = parser.parse_fragment();
    if config.extract_quotes {
        quoted::postpass::extract_quotes(&mut body);
    }
    parser.finish(Document {
        body,
        ..Document::default()
    })
}

#[cfg(test)]
mod tests;

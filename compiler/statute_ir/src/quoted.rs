//! Quoted structures.

use crate::division::Division;
use crate::frame::Frame;
use crate::span::Span;
use serde::{Deserialize, Serialize};

/// A span of text quoting an excerpt of legislation, such as text being
/// inserted by an amendment.
///
/// The interior is parsed as divisions under `frame`. The literal quote marks
/// and the punctuation after the closing mark are lifted out of the first and
/// last lines by the post-pass that runs after parsing.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct QuotedStructure {
    pub contents: Vec<Division>,
    pub frame: Frame,
    pub start_quote: Option<String>,
    pub end_quote: Option<String>,
    /// Trailing punctuation after the closing mark, e.g. `.` or `; or`.
    pub appended_text: Option<String>,
    /// A frame annotation was present but malformed; the enclosing frame was
    /// used instead.
    pub invalid_frame: bool,
    pub span: Span,
    /// How many enclosing quotation levels the final line also closes.
    #[serde(default)]
    pub trailing_closes: usize,
}

impl QuotedStructure {
    pub fn new(contents: Vec<Division>, frame: Frame, span: Span) -> Self {
        QuotedStructure {
            contents,
            frame,
            start_quote: None,
            end_quote: None,
            appended_text: None,
            invalid_frame: false,
            span,
            trailing_closes: 0,
        }
    }
}

//! Grammar frames.
//!
//! A frame is the (document type, context) pair that selects which grammar
//! variant and which element names apply to a region. The document's own
//! frame comes from configuration; quoted structures may announce a
//! different one with a bracketed annotation such as `{regulations-sch}`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of instrument whose grammar applies.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    /// A Bill before Parliament.
    #[default]
    Bill,
    /// An Act of Parliament.
    Act,
    /// An Order (statutory instrument numbered in articles).
    Order,
    /// Regulations (statutory instrument numbered in regulations).
    Regulations,
    /// Rules (statutory instrument numbered in rules).
    Rules,
}

impl DocType {
    /// Primary legislation numbers its top level as sections.
    pub const fn is_primary_legislation(self) -> bool {
        matches!(self, DocType::Bill | DocType::Act)
    }

    pub const fn name(self) -> &'static str {
        match self {
            DocType::Bill => "bill",
            DocType::Act => "act",
            DocType::Order => "order",
            DocType::Regulations => "regulations",
            DocType::Rules => "rules",
        }
    }

    /// Look up a document type by its annotation name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bill" | "ukpubb" | "nipubb" | "spubb" => Some(DocType::Bill),
            "act" | "ukpga" | "asp" | "nia" | "asc" => Some(DocType::Act),
            "order" | "uksi" | "nisr" | "ssi" | "wsi" => Some(DocType::Order),
            "regulations" | "regs" => Some(DocType::Regulations),
            "rules" => Some(DocType::Rules),
            _ => None,
        }
    }
}

/// Where in an instrument a region sits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameContext {
    #[default]
    Body,
    Schedule,
}

impl FrameContext {
    pub const fn name(self) -> &'static str {
        match self {
            FrameContext::Body => "body",
            FrameContext::Schedule => "sch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "body" | "main" => Some(FrameContext::Body),
            "sch" | "schedule" => Some(FrameContext::Schedule),
            _ => None,
        }
    }
}

/// Document type plus context.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Frame {
    pub doc_type: DocType,
    pub context: FrameContext,
}

/// Result of reading a frame annotation.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FrameAnnotation {
    /// No annotation present.
    Absent,
    /// A well-formed annotation.
    Valid(Frame),
    /// Braces present but the contents name no known frame.
    Invalid,
}

impl Frame {
    pub const fn new(doc_type: DocType, context: FrameContext) -> Self {
        Frame { doc_type, context }
    }

    pub const fn body(doc_type: DocType) -> Self {
        Frame::new(doc_type, FrameContext::Body)
    }

    #[must_use]
    pub const fn in_schedule(self) -> Self {
        Frame::new(self.doc_type, FrameContext::Schedule)
    }

    pub const fn is_schedule(self) -> bool {
        matches!(self.context, FrameContext::Schedule)
    }

    /// Parse the inside of a `{docType[-context]}` annotation.
    ///
    /// The context defaults to `Body` when omitted.
    pub fn parse_annotation(inner: &str) -> Option<Frame> {
        let inner = inner.trim();
        let (doc, context) = match inner.split_once('-') {
            Some((doc, context)) => (doc, Some(context)),
            None => (inner, None),
        };
        let doc_type = DocType::from_name(doc)?;
        let context = match context {
            Some(name) => FrameContext::from_name(name)?,
            None => FrameContext::Body,
        };
        Some(Frame::new(doc_type, context))
    }

    /// Read a leading annotation from `text`.
    ///
    /// Returns the annotation and the byte length it occupies (braces and any
    /// following whitespace included).
    pub fn read_leading_annotation(text: &str) -> (FrameAnnotation, usize) {
        let Some(rest) = text.strip_prefix('{') else {
            return (FrameAnnotation::Absent, 0);
        };
        let Some(close) = rest.find('}') else {
            return (FrameAnnotation::Absent, 0);
        };
        let inner = &rest[..close];
        let after = &rest[close + 1..];
        let consumed = text.len() - after.trim_start().len();
        match Frame::parse_annotation(inner) {
            Some(frame) => (FrameAnnotation::Valid(frame), consumed),
            None => (FrameAnnotation::Invalid, consumed),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.doc_type.name(), self.context.name())
    }
}

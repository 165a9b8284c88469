//! Statute IR - block stream and legislative tree types.
//!
//! This crate contains the data on both sides of the structural parser:
//! - `Block`s produced by the pre-parser from word-processor documents
//!   (lines, numbered lines, tables, table-of-contents markers)
//! - `Division`s, the recursive legal-document tree the parser builds
//! - `QuotedStructure`s, quoted excerpts of other legislation parsed under
//!   their own frame
//! - `Document`, the aggregate handed to the markup builder
//!
//! # Design Philosophy
//!
//! - **Immutable input**: blocks are never modified while parsing; the tree
//!   owns clones of the blocks it covers.
//! - **One sum type per node**: every division kind shares `Division`, and
//!   the leaf/branch distinction lives in `DivisionBody`.
//! - **Tree ownership**: no back-references and no sharing between nodes.

mod block;
mod division;
mod document;
mod frame;
mod quoted;
mod span;
pub mod visitor;

pub use block::{Alignment, Block, Cell, Line, NumberToken, NumberedLine, Row, Run, Table};
pub use division::{Content, Division, DivisionBody, DivisionKind, ParsedTable, TagName};
pub use document::Document;
pub use frame::{DocType, Frame, FrameAnnotation, FrameContext};
pub use quoted::QuotedStructure;
pub use span::Span;

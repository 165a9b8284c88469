//! Tree visitor.
//!
//! `VisitorMut` walks a division tree with mutable access to every node.
//! Default implementations call the `walk_*_mut` functions, which descend
//! into children in document order. Override a `visit_*_mut` method to act
//! at a node, and call the matching `walk_*_mut` function to keep
//! descending.
//!
//! # Example
//!
//! ```text
//! struct ClearFrames;
//!
//! impl VisitorMut for ClearFrames {
//!     fn visit_quoted_mut(&mut self, quoted: &mut QuotedStructure) {
//!         quoted.invalid_frame = false;
//!         walk_quoted_mut(self, quoted);
//!     }
//! }
//! ```

use crate::division::{Content, Division, DivisionBody};
use crate::quoted::QuotedStructure;

pub trait VisitorMut {
    fn visit_division_mut(&mut self, division: &mut Division) {
        walk_division_mut(self, division);
    }

    fn visit_content_mut(&mut self, content: &mut Content) {
        walk_content_mut(self, content);
    }

    fn visit_quoted_mut(&mut self, quoted: &mut QuotedStructure) {
        walk_quoted_mut(self, quoted);
    }
}

pub fn walk_division_mut<V: VisitorMut + ?Sized>(visitor: &mut V, division: &mut Division) {
    match &mut division.body {
        DivisionBody::Leaf { contents } => {
            for content in contents {
                visitor.visit_content_mut(content);
            }
        }
        DivisionBody::Branch {
            intro,
            children,
            wrap_up,
        } => {
            for content in intro {
                visitor.visit_content_mut(content);
            }
            for child in children {
                visitor.visit_division_mut(child);
            }
            for content in wrap_up {
                visitor.visit_content_mut(content);
            }
        }
    }
}

pub fn walk_content_mut<V: VisitorMut + ?Sized>(visitor: &mut V, content: &mut Content) {
    match content {
        Content::Block(_) => {}
        Content::Quoted(quoted) => visitor.visit_quoted_mut(quoted),
        Content::Table(table) => {
            for division in table.rows.iter_mut().flatten().flatten() {
                visitor.visit_division_mut(division);
            }
        }
    }
}

pub fn walk_quoted_mut<V: VisitorMut + ?Sized>(visitor: &mut V, quoted: &mut QuotedStructure) {
    for division in &mut quoted.contents {
        visitor.visit_division_mut(division);
    }
}

#[cfg(test)]
mod tests;

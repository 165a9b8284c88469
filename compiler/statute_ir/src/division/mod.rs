//! Output tree nodes.
//!
//! Every node of the legislative hierarchy is a `Division`. The `kind`
//! discriminates what the node is; `body` says whether it is a leaf (flat
//! content only) or a branch (intro, non-empty children, wrap-up).

use crate::block::{Block, Line, NumberToken};
use crate::frame::{DocType, Frame};
use crate::quoted::QuotedStructure;
use crate::span::Span;
use serde::{Deserialize, Serialize};

/// What a division is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionKind {
    GroupOfParts,
    Part,
    Chapter,
    CrossHeading,
    GroupingSection,
    PrimaryProvision,
    SecondaryProvision,
    /// Lettered level: `(a)`.
    SubParagraph1,
    /// Roman level: `(i)`.
    SubParagraph2,
    /// Upper-lettered level: `(A)`.
    SubParagraph3,
    Schedule,
    SchedulePart,
    ScheduleChapter,
    ScheduleCrossHeading,
    ScheduleGroupingSection,
    Definition,
    Signatures,
    UnnumberedParagraph,
    Unknown,
}

impl DivisionKind {
    pub const fn name(self) -> &'static str {
        match self {
            DivisionKind::GroupOfParts => "groupOfParts",
            DivisionKind::Part => "part",
            DivisionKind::Chapter => "chapter",
            DivisionKind::CrossHeading => "crossHeading",
            DivisionKind::GroupingSection => "groupingSection",
            DivisionKind::PrimaryProvision => "primaryProvision",
            DivisionKind::SecondaryProvision => "secondaryProvision",
            DivisionKind::SubParagraph1 => "level1",
            DivisionKind::SubParagraph2 => "level2",
            DivisionKind::SubParagraph3 => "level3",
            DivisionKind::Schedule => "schedule",
            DivisionKind::SchedulePart => "schedulePart",
            DivisionKind::ScheduleChapter => "scheduleChapter",
            DivisionKind::ScheduleCrossHeading => "scheduleCrossHeading",
            DivisionKind::ScheduleGroupingSection => "scheduleGroupingSection",
            DivisionKind::Definition => "definition",
            DivisionKind::Signatures => "signatures",
            DivisionKind::UnnumberedParagraph => "unnumberedParagraph",
            DivisionKind::Unknown => "unknown",
        }
    }

    /// Kinds whose siblings must be numbered in sequence.
    pub const fn is_sequenced(self) -> bool {
        matches!(
            self,
            DivisionKind::GroupOfParts
                | DivisionKind::Part
                | DivisionKind::Chapter
                | DivisionKind::PrimaryProvision
                | DivisionKind::SecondaryProvision
                | DivisionKind::SubParagraph1
                | DivisionKind::SubParagraph2
                | DivisionKind::SubParagraph3
                | DivisionKind::Schedule
                | DivisionKind::SchedulePart
                | DivisionKind::ScheduleChapter
        )
    }
}

/// Element name chosen from the division kind and the frame it was parsed in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagName {
    Section,
    Subsection,
    Article,
    Regulation,
    Rule,
    Paragraph,
    Subparagraph,
    /// Kinds whose name does not depend on the frame.
    Fixed(DivisionKind),
}

impl TagName {
    /// Resolve the element name for `kind` parsed under `frame`.
    ///
    /// Provisions inside schedules are paragraphs and sub-paragraphs whatever
    /// the instrument; in the body the instrument type decides.
    pub fn resolve(kind: DivisionKind, frame: Frame) -> TagName {
        match kind {
            DivisionKind::PrimaryProvision => {
                if frame.is_schedule() {
                    return TagName::Paragraph;
                }
                match frame.doc_type {
                    DocType::Bill | DocType::Act => TagName::Section,
                    DocType::Order => TagName::Article,
                    DocType::Regulations => TagName::Regulation,
                    DocType::Rules => TagName::Rule,
                }
            }
            DivisionKind::SecondaryProvision => {
                if frame.is_schedule() {
                    TagName::Subparagraph
                } else if frame.doc_type.is_primary_legislation() {
                    TagName::Subsection
                } else {
                    TagName::Paragraph
                }
            }
            other => TagName::Fixed(other),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TagName::Section => "section",
            TagName::Subsection => "subsection",
            TagName::Article => "article",
            TagName::Regulation => "regulation",
            TagName::Rule => "rule",
            TagName::Paragraph => "paragraph",
            TagName::Subparagraph => "subparagraph",
            TagName::Fixed(kind) => kind.name(),
        }
    }
}

/// A table whose cells have been parsed into divisions.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct ParsedTable {
    /// Rows, then cells, then the divisions of each cell.
    pub rows: Vec<Vec<Vec<Division>>>,
}

impl ParsedTable {
    fn last_line(&self) -> Option<&Line> {
        self.rows
            .iter()
            .rev()
            .flat_map(|row| row.iter().rev())
            .flat_map(|cell| cell.iter().rev())
            .find_map(Division::last_line)
    }
}

/// One item of flat division content.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "content", rename_all = "snake_case")]
pub enum Content {
    Block(Block),
    Quoted(QuotedStructure),
    Table(ParsedTable),
}

impl Content {
    /// The last text line this content item covers.
    pub fn last_line(&self) -> Option<&Line> {
        match self {
            Content::Block(block) => block.last_line(),
            Content::Quoted(quoted) => quoted.contents.last().and_then(Division::last_line),
            Content::Table(table) => table.last_line(),
        }
    }

    pub fn as_quoted(&self) -> Option<&QuotedStructure> {
        match self {
            Content::Quoted(quoted) => Some(quoted),
            _ => None,
        }
    }
}

/// Leaf or branch payload of a division.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DivisionBody {
    Leaf {
        contents: Vec<Content>,
    },
    Branch {
        intro: Vec<Content>,
        /// Never empty.
        children: Vec<Division>,
        wrap_up: Vec<Content>,
    },
}

/// A node of the output hierarchy.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Division {
    pub kind: DivisionKind,
    pub tag: TagName,
    pub number: Option<NumberToken>,
    pub heading: Option<Line>,
    pub span: Span,
    pub body: DivisionBody,
}

impl Division {
    /// Create a leaf division.
    pub fn leaf(
        kind: DivisionKind,
        tag: TagName,
        number: Option<NumberToken>,
        heading: Option<Line>,
        contents: Vec<Content>,
        span: Span,
    ) -> Self {
        Division {
            kind,
            tag,
            number,
            heading,
            span,
            body: DivisionBody::Leaf { contents },
        }
    }

    /// Create a branch division.
    ///
    /// A branch must have children: with none, the intro and wrap-up are
    /// folded into the contents of a leaf instead.
    #[expect(clippy::too_many_arguments, reason = "mirrors the node's fields one to one")]
    pub fn branch(
        kind: DivisionKind,
        tag: TagName,
        number: Option<NumberToken>,
        heading: Option<Line>,
        intro: Vec<Content>,
        children: Vec<Division>,
        wrap_up: Vec<Content>,
        span: Span,
    ) -> Self {
        let body = if children.is_empty() {
            let mut contents = intro;
            contents.extend(wrap_up);
            DivisionBody::Leaf { contents }
        } else {
            DivisionBody::Branch {
                intro,
                children,
                wrap_up,
            }
        };
        Division {
            kind,
            tag,
            number,
            heading,
            span,
            body,
        }
    }

    /// An `Unknown` leaf holding blocks no rule could attribute.
    pub fn unknown(blocks: Vec<Block>, span: Span) -> Self {
        Division::leaf(
            DivisionKind::Unknown,
            TagName::Fixed(DivisionKind::Unknown),
            None,
            None,
            blocks.into_iter().map(Content::Block).collect(),
            span,
        )
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.body, DivisionBody::Leaf { .. })
    }

    pub fn is_branch(&self) -> bool {
        !self.is_leaf()
    }

    pub fn number_text(&self) -> Option<&str> {
        self.number.as_ref().map(|n| n.text.as_str())
    }

    pub fn heading_text(&self) -> Option<&str> {
        self.heading.as_ref().map(|h| h.text.as_str())
    }

    pub fn children(&self) -> &[Division] {
        match &self.body {
            DivisionBody::Branch { children, .. } => children,
            DivisionBody::Leaf { .. } => &[],
        }
    }

    /// Leaf contents; empty for branches.
    pub fn contents(&self) -> &[Content] {
        match &self.body {
            DivisionBody::Leaf { contents } => contents,
            DivisionBody::Branch { .. } => &[],
        }
    }

    /// Branch intro; empty for leaves.
    pub fn intro(&self) -> &[Content] {
        match &self.body {
            DivisionBody::Branch { intro, .. } => intro,
            DivisionBody::Leaf { .. } => &[],
        }
    }

    /// Branch wrap-up; empty for leaves.
    pub fn wrap_up(&self) -> &[Content] {
        match &self.body {
            DivisionBody::Branch { wrap_up, .. } => wrap_up,
            DivisionBody::Leaf { .. } => &[],
        }
    }

    /// The content item parsed last, looking through children.
    ///
    /// For a branch that is the last wrap-up item if any, otherwise the last
    /// content of its last child.
    pub fn last_content(&self) -> Option<&Content> {
        match &self.body {
            DivisionBody::Leaf { contents } => contents.last(),
            DivisionBody::Branch {
                intro,
                children,
                wrap_up,
            } => wrap_up
                .last()
                .or_else(|| children.last().and_then(Division::last_content))
                .or_else(|| intro.last()),
        }
    }

    /// The last text line this division covers.
    pub fn last_line(&self) -> Option<&Line> {
        match self.last_content() {
            Some(content) => content.last_line(),
            None => self.heading.as_ref(),
        }
    }

    /// Plain text of the first content line, if any.
    pub fn first_text(&self) -> Option<&str> {
        let first = match &self.body {
            DivisionBody::Leaf { contents } => contents.first(),
            DivisionBody::Branch { intro, .. } => intro.first(),
        };
        match first? {
            Content::Block(block) => block.first_line().map(|l| l.text.as_str()),
            Content::Quoted(_) | Content::Table(_) => None,
        }
    }
}

#[cfg(test)]
mod tests;

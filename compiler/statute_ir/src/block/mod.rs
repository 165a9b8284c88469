//! Input blocks.
//!
//! The pre-parser resolves alignment, indentation, emphasis and numbering
//! from the underlying document before the structural parser runs, so every
//! field here is final. Indentation is measured in twips (1/20 point), the
//! unit word-processor paragraphs carry natively.

use serde::{Deserialize, Serialize};

/// Paragraph alignment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// A formatted run of text within a line.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            bold: true,
            italic: false,
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            bold: false,
            italic: true,
        }
    }
}

/// A single paragraph of text.
///
/// `text` is the normalized concatenation of `runs` (whitespace collapsed,
/// trimmed). Grammar patterns always match against `text`; the runs are only
/// consulted for emphasis.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Line {
    pub text: String,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub left_indent: i32,
    #[serde(default)]
    pub first_line_indent: i32,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Line {
    /// Create a left-aligned line from a single plain run.
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_runs(vec![Run::plain(text)])
    }

    /// Create a line from runs, normalizing the text.
    pub fn from_runs(runs: Vec<Run>) -> Self {
        let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
        Line {
            text: normalize(&joined),
            runs,
            ..Line::default()
        }
    }

    #[must_use]
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn centered(self) -> Self {
        self.aligned(Alignment::Center)
    }

    #[must_use]
    pub fn indented(mut self, left_indent: i32) -> Self {
        self.left_indent = left_indent;
        self
    }

    /// Make every run bold.
    #[must_use]
    pub fn emboldened(mut self) -> Self {
        for run in &mut self.runs {
            run.bold = true;
        }
        self
    }

    /// Make every run italic.
    #[must_use]
    pub fn italicized(mut self) -> Self {
        for run in &mut self.runs {
            run.italic = true;
        }
        self
    }

    pub fn is_centered(&self) -> bool {
        self.alignment == Alignment::Center
    }

    pub fn is_right_aligned(&self) -> bool {
        self.alignment == Alignment::Right
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// True when every non-blank run is bold (and there is at least one).
    pub fn is_bold(&self) -> bool {
        self.all_visible_runs(|r| r.bold)
    }

    /// True when every non-blank run is italic (and there is at least one).
    pub fn is_italic(&self) -> bool {
        self.all_visible_runs(|r| r.italic)
    }

    fn all_visible_runs(&self, pred: impl Fn(&Run) -> bool) -> bool {
        let mut visible = self.runs.iter().filter(|r| !r.text.trim().is_empty());
        let Some(first) = visible.next() else {
            return false;
        };
        pred(first) && visible.all(pred)
    }

    /// Replace the text, keeping formatting. Runs are rewritten to match so
    /// the two never disagree.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let bold = self.is_bold();
        let italic = self.is_italic();
        self.runs = vec![Run {
            text: text.clone(),
            bold,
            italic,
        }];
        self.text = text;
    }
}

/// Collapse internal whitespace and trim.
pub(crate) fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The literal number the pre-parser extracted from a numbered paragraph.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct NumberToken {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
}

impl NumberToken {
    pub fn new(text: impl Into<String>) -> Self {
        NumberToken {
            text: text.into(),
            bold: false,
        }
    }

    #[must_use]
    pub fn emboldened(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A line carrying an extracted number token.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct NumberedLine {
    pub number: NumberToken,
    pub line: Line,
}

impl NumberedLine {
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        NumberedLine {
            number: NumberToken::new(number),
            line: Line::new(text),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: Line) -> Self {
        self.line = line;
        self
    }

    /// Number and text as they appear on the page.
    pub fn display_text(&self) -> String {
        if self.line.text.is_empty() {
            self.number.text.clone()
        } else {
            format!("{} {}", self.number.text, self.line.text)
        }
    }
}

/// A table cell. Cells hold their own block lists, which may contain
/// structured content.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Cell {
    pub blocks: Vec<Block>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// First line of the first non-empty cell.
    pub fn first_line(&self) -> Option<&Line> {
        self.rows
            .iter()
            .flat_map(|row| &row.cells)
            .flat_map(|cell| &cell.blocks)
            .find_map(Block::first_line)
    }

    /// Last line of the last non-empty cell.
    pub fn last_line(&self) -> Option<&Line> {
        self.rows
            .iter()
            .rev()
            .flat_map(|row| row.cells.iter().rev())
            .flat_map(|cell| cell.blocks.iter().rev())
            .find_map(Block::last_line)
    }
}

/// One item of the pre-parsed block stream.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Line(Line),
    Numbered(NumberedLine),
    Table(Table),
    TableOfContents,
}

impl Block {
    pub fn line(text: impl Into<String>) -> Self {
        Block::Line(Line::new(text))
    }

    pub fn numbered(number: impl Into<String>, text: impl Into<String>) -> Self {
        Block::Numbered(NumberedLine::new(number, text))
    }

    /// The text line of a simple block, `None` for tables and markers.
    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Block::Line(line) => Some(line),
            Block::Numbered(numbered) => Some(&numbered.line),
            Block::Table(_) | Block::TableOfContents => None,
        }
    }

    pub fn as_numbered(&self) -> Option<&NumberedLine> {
        match self {
            Block::Numbered(numbered) => Some(numbered),
            _ => None,
        }
    }

    /// An unnumbered `Line`, `None` for everything else.
    pub fn as_plain_line(&self) -> Option<&Line> {
        match self {
            Block::Line(line) => Some(line),
            _ => None,
        }
    }

    /// The first line of the block; composite blocks expose their first
    /// nested line.
    pub fn first_line(&self) -> Option<&Line> {
        match self {
            Block::Line(line) => Some(line),
            Block::Numbered(numbered) => Some(&numbered.line),
            Block::Table(table) => table.first_line(),
            Block::TableOfContents => None,
        }
    }

    pub fn last_line(&self) -> Option<&Line> {
        match self {
            Block::Table(table) => table.last_line(),
            other => other.first_line(),
        }
    }

    /// Text as it reads on the page, number included.
    pub fn display_text(&self) -> String {
        match self {
            Block::Line(line) => line.text.clone(),
            Block::Numbered(numbered) => numbered.display_text(),
            Block::Table(table) => table
                .first_line()
                .map(|line| line.text.clone())
                .unwrap_or_default(),
            Block::TableOfContents => String::new(),
        }
    }
}

impl From<Line> for Block {
    fn from(line: Line) -> Self {
        Block::Line(line)
    }
}

impl From<NumberedLine> for Block {
    fn from(numbered: NumberedLine) -> Self {
        Block::Numbered(numbered)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

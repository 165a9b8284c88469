//! Flat content: intro and wrap-up runs, tables and unnumbered paragraphs.

use statute_ir::{Block, Content, Division, DivisionKind, Frame, ParsedTable, Table};
use tracing::debug;

use crate::context::ParseContext;
use crate::outcome::{ParseOutcome, RuleId};
use crate::text::{numbers, patterns};
use crate::Parser;

/// What a content run may take besides quotations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum RunMode {
    /// Plain lines and tables indented at least `indent`.
    Continuation { indent: i32 },
    /// Quotations only.
    QuotesOnly,
}

impl<'a> Parser<'a> {
    /// Extend `contents` with the blocks that follow.
    ///
    /// Quotations are tried first wherever a block opens one. The run ends
    /// at the first block the mode does not accept, or as soon as the last
    /// item closes the enclosing quotation.
    pub(crate) fn content_run(
        &mut self,
        mut contents: Vec<Content>,
        mode: RunMode,
    ) -> ParseOutcome<Vec<Content>> {
        let start = self.cursor.position();
        while !self.ends_quote(&contents) {
            let Some(block) = self.cursor.current() else {
                break;
            };
            if self.opens_quotation_here() {
                match self.quoted_structure() {
                    ParseOutcome::ConsumedOk { value } | ParseOutcome::EmptyOk { value } => {
                        contents.push(Content::Quoted(value));
                        continue;
                    }
                    ParseOutcome::ConsumedErr {
                        error,
                        consumed_span,
                    } => {
                        return ParseOutcome::ConsumedErr {
                            error,
                            consumed_span,
                        };
                    }
                    ParseOutcome::EmptyErr { .. } => {}
                }
            }
            let RunMode::Continuation { indent } = mode else {
                break;
            };
            if !self.is_continuation(block, indent) {
                break;
            }
            let position = self.cursor.position();
            self.cursor.advance();
            let content = self.block_content(block, position);
            contents.push(content);
        }
        if self.cursor.position() > start {
            ParseOutcome::consumed_ok(contents)
        } else {
            ParseOutcome::empty_ok(contents)
        }
    }

    /// Whether `block` (the current block) continues the text of a division
    /// indented at `indent`.
    fn is_continuation(&self, block: &Block, indent: i32) -> bool {
        match block {
            Block::Table(_) => true,
            Block::Line(line) => {
                !line.is_centered()
                    && line.left_indent >= indent
                    && !patterns::is_definition(&line.text)
                    && !patterns::is_signature_opener(&line.text)
                    && !patterns::is_structural_heading(&line.text)
                    && !(line.is_bold() && self.primary_number_follows())
            }
            Block::Numbered(_) | Block::TableOfContents => false,
        }
    }

    /// The block after the current one is a primary provision's number line.
    pub(crate) fn primary_number_follows(&self) -> bool {
        self.cursor.peek(1).and_then(Block::as_numbered).is_some_and(|n| {
            numbers::primary(&n.number.text).is_some() || numbers::compound(&n.number.text).is_some()
        })
    }

    /// Wrap-up text after the children of a branch.
    pub(crate) fn wrap_up(
        &mut self,
        children: &[Division],
        indent: i32,
    ) -> ParseOutcome<Vec<Content>> {
        if children.last().is_some_and(|last| self.closes_after(last) > 0) {
            return ParseOutcome::empty_ok(Vec::new());
        }
        self.content_run(Vec::new(), RunMode::Continuation { indent })
    }

    /// Content item for a block consumed at `position`. Tables have their
    /// cells parsed.
    pub(crate) fn block_content(&mut self, block: &Block, position: usize) -> Content {
        match block {
            Block::Table(table) => Content::Table(self.parse_table(table, position)),
            other => Content::Block(other.clone()),
        }
    }

    fn parse_table(&mut self, table: &Table, position: usize) -> ParsedTable {
        let frame = self.frame();
        let mut rows = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let mut cells = Vec::with_capacity(row.cells.len());
            for cell in &row.cells {
                cells.push(self.parse_cell(&cell.blocks, frame, position));
            }
            rows.push(cells);
        }
        ParsedTable { rows }
    }

    /// Parse one cell with a parser of its own. Its diagnostics are
    /// reported at the table's position.
    fn parse_cell(&mut self, blocks: &[Block], frame: Frame, position: usize) -> Vec<Division> {
        if blocks.is_empty() {
            return Vec::new();
        }
        let mut cell = Parser::new(blocks, self.config, frame);
        cell.state.context = ParseContext::IN_TABLE;
        let divisions = cell.parse_fragment();
        self.stats.absorb(&cell.stats);
        for warning in cell.warnings {
            self.warn(warning.relocated(position));
        }
        for mut error in cell.errors {
            error.position = position;
            self.record_error(error);
        }
        debug!(position, divisions = divisions.len(), "table cell");
        divisions
    }

    /// A paragraph with no number: a quotation, a plain line or a table,
    /// followed by any quotations.
    ///
    /// Outside quotations, lines that read as structural headings are left
    /// for the rules (or the assembler) that own them.
    pub(crate) fn unnumbered_paragraph(&mut self) -> ParseOutcome<Division> {
        self.rule(RuleId::UnnumberedParagraph, 0, |p| {
            let start = p.cursor.position();
            let mut contents = Vec::new();
            if p.opens_quotation_here() {
                if let Some(quoted) = crate::try_outcome!(p, p.quoted_structure()) {
                    contents.push(Content::Quoted(quoted));
                }
            }
            if contents.is_empty() {
                let Some(block) = p.cursor.current() else {
                    return ParseOutcome::no_match(RuleId::UnnumberedParagraph, start);
                };
                let accepted = match block {
                    Block::Line(line) => {
                        p.state.in_quote() || !patterns::is_structural_heading(&line.text)
                    }
                    Block::Table(_) => true,
                    Block::Numbered(_) | Block::TableOfContents => false,
                };
                if !accepted {
                    return ParseOutcome::no_match(RuleId::UnnumberedParagraph, start);
                }
                p.cursor.advance();
                contents.push(p.block_content(block, start));
            }
            let contents = crate::chain!(p.content_run(contents, RunMode::QuotesOnly));
            let kind = DivisionKind::UnnumberedParagraph;
            ParseOutcome::consumed_ok(Division::leaf(
                kind,
                p.tag(kind),
                None,
                None,
                contents,
                p.cursor.span_from(start),
            ))
        })
    }
}

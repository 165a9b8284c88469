//! Block cursor.
//!
//! A position into the block stream with lookahead and consumption helpers.
//! The parser saves and restores the position through snapshots; the cursor
//! itself knows nothing about rules.

use statute_ir::{Block, Line, NumberedLine, Span};
use tracing::trace;

pub struct Cursor<'a> {
    blocks: &'a [Block],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(blocks: &'a [Block]) -> Self {
        Cursor { blocks, pos: 0 }
    }

    pub fn blocks(&self) -> &'a [Block] {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to `pos`. Positions past the end clamp to the end.
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos <= self.blocks.len(),
            "cursor position {} out of bounds (max {})",
            pos,
            self.blocks.len()
        );
        self.pos = pos.min(self.blocks.len());
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.blocks.len()
    }

    pub fn current(&self) -> Option<&'a Block> {
        self.blocks.get(self.pos)
    }

    /// Block `n` places ahead of the current one.
    pub fn peek(&self, n: usize) -> Option<&'a Block> {
        self.blocks.get(self.pos + n)
    }

    pub fn block_at(&self, pos: usize) -> Option<&'a Block> {
        self.blocks.get(pos)
    }

    /// The block before the current one.
    pub fn previous(&self) -> Option<&'a Block> {
        self.pos.checked_sub(1).and_then(|p| self.blocks.get(p))
    }

    pub fn current_plain_line(&self) -> Option<&'a Line> {
        self.current().and_then(Block::as_plain_line)
    }

    pub fn current_numbered(&self) -> Option<&'a NumberedLine> {
        self.current().and_then(Block::as_numbered)
    }

    /// Consume the current block.
    pub fn advance(&mut self) -> Option<&'a Block> {
        let block = self.blocks.get(self.pos)?;
        trace!(pos = self.pos, "advance");
        self.pos += 1;
        Some(block)
    }

    /// Consume the current block if `pred` accepts it.
    pub fn advance_if(&mut self, pred: impl FnOnce(&Block) -> bool) -> Option<&'a Block> {
        match self.current() {
            Some(block) if pred(block) => self.advance(),
            _ => None,
        }
    }

    /// Consume blocks while `pred` accepts them.
    pub fn advance_while(&mut self, mut pred: impl FnMut(&Block) -> bool) -> &'a [Block] {
        let start = self.pos;
        while let Some(block) = self.current() {
            if !pred(block) {
                break;
            }
            self.pos += 1;
        }
        &self.blocks[start..self.pos]
    }

    /// Span from `start` to the current position.
    pub fn span_from(&self, start: usize) -> Span {
        Span::from_positions(start, self.pos)
    }
}

#[cfg(test)]
mod tests;

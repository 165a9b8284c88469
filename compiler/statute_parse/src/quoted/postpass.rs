//! Quote mark extraction.
//!
//! Runs once over the finished tree. For every quotation, outermost first,
//! the leading frame annotation and opening mark come off the first line it
//! covers and the closing mark and trailing punctuation off the last. An
//! outer quotation takes the rightmost closing mark of a shared last line,
//! leaving the inner marks for the quotations nested inside it.
//!
//! The pass rewrites line text, so it never runs while the memo table could
//! still hand out results computed from the original text.

use statute_ir::visitor::{walk_quoted_mut, VisitorMut};
use statute_ir::{Block, Content, Division, DivisionBody, Line, NumberToken, QuotedStructure};

use crate::text::quotes::{self, ClosingMark};

/// Lift quote marks out of every quotation under `divisions`.
pub fn extract_quotes(divisions: &mut [Division]) {
    let mut pass = QuoteExtraction;
    for division in divisions {
        pass.visit_division_mut(division);
    }
}

struct QuoteExtraction;

impl VisitorMut for QuoteExtraction {
    fn visit_quoted_mut(&mut self, quoted: &mut QuotedStructure) {
        if let Some(mark) = quoted.contents.first_mut().and_then(take_opening) {
            quoted.start_quote = Some(mark.to_string());
        }
        if let Some(close) = quoted.contents.last_mut().and_then(take_closing) {
            quoted.end_quote = Some(close.mark.to_string());
            quoted.appended_text = close.appended;
        }
        walk_quoted_mut(self, quoted);
    }
}

fn take_opening(division: &mut Division) -> Option<char> {
    if let Some(mark) = division.number.as_mut().and_then(number_opening) {
        return Some(mark);
    }
    if let Some(mark) = division.heading.as_mut().and_then(line_opening) {
        return Some(mark);
    }
    match &mut division.body {
        DivisionBody::Leaf { contents } => contents.first_mut().and_then(content_opening),
        DivisionBody::Branch {
            intro, children, ..
        } => match intro.first_mut() {
            Some(first) => content_opening(first),
            None => children.first_mut().and_then(take_opening),
        },
    }
}

fn content_opening(content: &mut Content) -> Option<char> {
    match content {
        Content::Block(Block::Line(line)) => line_opening(line),
        Content::Block(Block::Numbered(numbered)) => {
            number_opening(&mut numbered.number).or_else(|| line_opening(&mut numbered.line))
        }
        Content::Block(Block::Table(_) | Block::TableOfContents) => None,
        Content::Quoted(quoted) => quoted.contents.first_mut().and_then(take_opening),
        Content::Table(table) => table
            .rows
            .iter_mut()
            .flatten()
            .find_map(|cell| cell.first_mut())
            .and_then(take_opening),
    }
}

fn number_opening(number: &mut NumberToken) -> Option<char> {
    let (mark, rest) = quotes::split_opening(&number.text)?;
    number.text = rest.to_string();
    Some(mark)
}

fn line_opening(line: &mut Line) -> Option<char> {
    let (mark, rest) = quotes::split_opening(&line.text)?;
    let rest = rest.to_string();
    line.set_text(rest);
    Some(mark)
}

/// Closing mark of the last line `division` covers: its last content if it
/// has any, otherwise its heading or number.
fn take_closing(division: &mut Division) -> Option<ClosingMark> {
    let from_body = match &mut division.body {
        DivisionBody::Leaf { contents } => contents.last_mut().map(content_closing),
        DivisionBody::Branch {
            intro,
            children,
            wrap_up,
        } => {
            if let Some(last) = wrap_up.last_mut() {
                Some(content_closing(last))
            } else if let Some(child) = children.last_mut() {
                Some(take_closing(child))
            } else {
                intro.last_mut().map(content_closing)
            }
        }
    };
    match from_body {
        Some(close) => close,
        None => division
            .heading
            .as_mut()
            .and_then(line_closing)
            .or_else(|| division.number.as_mut().and_then(number_closing)),
    }
}

fn content_closing(content: &mut Content) -> Option<ClosingMark> {
    match content {
        Content::Block(Block::Line(line)) => line_closing(line),
        Content::Block(Block::Numbered(numbered)) => {
            if numbered.line.is_blank() {
                number_closing(&mut numbered.number)
            } else {
                line_closing(&mut numbered.line)
            }
        }
        Content::Block(Block::Table(_) | Block::TableOfContents) => None,
        Content::Quoted(quoted) => quoted.contents.last_mut().and_then(take_closing),
        Content::Table(table) => table
            .rows
            .iter_mut()
            .rev()
            .flat_map(|row| row.iter_mut().rev())
            .find_map(|cell| cell.last_mut())
            .and_then(take_closing),
    }
}

fn line_closing(line: &mut Line) -> Option<ClosingMark> {
    let (close, before) = quotes::split_closing(&line.text)?;
    let before = before.trim_end().to_string();
    line.set_text(before);
    Some(close)
}

fn number_closing(number: &mut NumberToken) -> Option<ClosingMark> {
    let (close, before) = quotes::split_closing(&number.text)?;
    number.text = before.trim_end().to_string();
    Some(close)
}

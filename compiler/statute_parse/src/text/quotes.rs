//! Quote mark counting.
//!
//! Quotations open with `“` or `‘` and close with `”` or `’`. A `’` between
//! two letters or digits is an apostrophe and never closes anything.
//! Whatever follows the final closing mark (`.`, `;`, `; or`) is the
//! appended text of the quotation.

use once_cell::sync::Lazy;
use regex::Regex;
use statute_ir::Frame;

use super::compile;
use super::patterns;

static APPENDED: Lazy<Regex> =
    Lazy::new(|| compile(r"(?s)^(.*?)([.,;:]+(?:\s+(?:or|and))?)?$"));

pub fn is_start_mark(c: char) -> bool {
    matches!(c, '“' | '‘')
}

pub fn is_end_mark(c: char) -> bool {
    matches!(c, '”' | '’')
}

/// A closing mark at the end of a line and the punctuation after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClosingMark {
    pub mark: char,
    pub appended: Option<String>,
}

/// Opening marks at the very start of the line, after any annotation.
pub fn leading_starts(text: &str) -> usize {
    let text = text.trim_start();
    let (_, consumed) = Frame::read_leading_annotation(text);
    text[consumed..].chars().take_while(|c| is_start_mark(*c)).count()
}

pub fn count_starts(text: &str) -> usize {
    text.chars().filter(|c| is_start_mark(*c)).count()
}

pub fn count_ends(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    (0..chars.len())
        .filter(|&i| match chars[i] {
            '”' => true,
            '’' => !is_apostrophe(&chars, i),
            _ => false,
        })
        .count()
}

fn is_apostrophe(chars: &[char], i: usize) -> bool {
    i > 0
        && i + 1 < chars.len()
        && chars[i - 1].is_alphanumeric()
        && chars[i + 1].is_alphanumeric()
}

/// Closing marks at the end of the line, outermost (rightmost) first, and
/// the text left once they and their punctuation are removed.
pub fn trailing_closes(text: &str) -> (Vec<ClosingMark>, &str) {
    let mut closes = Vec::new();
    let mut rest = text.trim_end();
    while let Some((close, before)) = split_closing(rest) {
        closes.push(close);
        rest = before;
    }
    (closes, rest)
}

/// Remove the last closing mark and the punctuation after it.
pub fn split_closing(text: &str) -> Option<(ClosingMark, &str)> {
    let text = text.trim_end();
    let caps = APPENDED.captures(text)?;
    let body = caps.get(1)?.as_str().trim_end();
    let mark = body.chars().last().filter(|c| is_end_mark(*c))?;
    let before = &body[..body.len() - mark.len_utf8()];
    let appended = caps
        .get(2)
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty());
    Some((ClosingMark { mark, appended }, before))
}

/// Remove a leading annotation and the first opening mark.
pub fn split_opening(text: &str) -> Option<(char, &str)> {
    let text = text.trim_start();
    let (_, consumed) = Frame::read_leading_annotation(text);
    let rest = &text[consumed..];
    let mark = rest.chars().next().filter(|c| is_start_mark(*c))?;
    Some((mark, &rest[mark.len_utf8()..]))
}

/// The line opens a quote and closes it again, possibly closing enclosing
/// quotes as well.
pub fn is_single_line(text: &str) -> bool {
    leading_starts(text) > 0
        && count_ends(text) >= count_starts(text)
        && !trailing_closes(text).0.is_empty()
}

/// The line opens a quote that continues onto later lines.
pub fn opens_multi_line(text: &str) -> bool {
    leading_starts(text) > 0 && count_starts(text) > count_ends(text)
}

/// Whether `text` opens a further quotation when `claimed` of its leading
/// marks already belong to quotations opened on this line.
pub fn opens_quotation(text: &str, claimed: usize) -> bool {
    if leading_starts(text) <= claimed {
        return false;
    }
    if claimed > 0 {
        return true;
    }
    if patterns::is_definition(text) {
        return opens_multi_line(text);
    }
    is_single_line(text) || opens_multi_line(text)
}

/// How many quotation levels end with this line.
///
/// `opened_here` counts quotations that opened on this same line; their
/// leading marks are balanced by closing marks at the end. Marks that open
/// and close inside the line (a defined term, say) do not close anything.
pub fn closing_levels(text: &str, opened_here: usize) -> usize {
    let (closes, _) = trailing_closes(text);
    if closes.is_empty() {
        return 0;
    }
    let own = opened_here.min(leading_starts(text));
    let inner_pairs = count_starts(text).saturating_sub(own);
    count_ends(text)
        .saturating_sub(inner_pairs)
        .min(closes.len())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apostrophes_are_not_closing_marks() {
        assert_eq!(count_ends("the Secretary of State’s powers"), 0);
        assert_eq!(count_ends("the Ministers’ powers’"), 2);
        assert_eq!(count_ends("“text”"), 1);
    }

    #[test]
    fn test_trailing_closes_outermost_first() {
        let (closes, rest) = trailing_closes("text.’”.");
        assert_eq!(
            closes,
            vec![
                ClosingMark {
                    mark: '”',
                    appended: Some(".".to_string())
                },
                ClosingMark {
                    mark: '’',
                    appended: None
                },
            ]
        );
        assert_eq!(rest, "text.");
    }

    #[test]
    fn test_appended_conjunction() {
        let (close, before) = split_closing("(b) the register”; or").unwrap();
        assert_eq!(close.appended.as_deref(), Some("; or"));
        assert_eq!(before, "(b) the register");
    }

    #[test]
    fn test_split_opening_drops_annotation() {
        assert_eq!(split_opening("{act} “1 Text"), Some(('“', "1 Text")));
        assert_eq!(split_opening("‘(a)"), Some(('‘', "(a)")));
        assert_eq!(split_opening("(a)"), None);
    }

    #[test]
    fn test_single_and_multi_line() {
        assert!(is_single_line("“This is the amending text”."));
        assert!(!opens_multi_line("“This is the amending text”."));
        assert!(opens_multi_line("“(2A) The Minister may—"));
        assert!(!is_single_line("“A” and “B” are inserted."));
        assert!(is_single_line("“(i) the thing.”’”."));
    }

    #[test]
    fn test_definitions_do_not_open() {
        assert!(!opens_quotation("“the Act” means the Statute Act 2020;", 0));
        assert!(!opens_quotation("“the Act” means “the Statute”.", 0));
    }

    #[test]
    fn test_nested_openings_on_one_line() {
        let line = "“‘(a) text";
        assert!(opens_quotation(line, 0));
        assert!(opens_quotation(line, 1));
        assert!(!opens_quotation(line, 2));
    }

    #[test]
    fn test_closing_levels() {
        assert_eq!(closing_levels("“This is the amending text”.", 1), 1);
        assert_eq!(closing_levels("(b) the last paragraph.”", 0), 1);
        assert_eq!(closing_levels("(b) the last paragraph.’”.", 0), 2);
        assert_eq!(closing_levels("“x” means “y”.", 0), 0);
        assert_eq!(closing_levels("“x” means “y”.”", 0), 1);
        assert_eq!(closing_levels("an ordinary line.", 0), 0);
    }
}

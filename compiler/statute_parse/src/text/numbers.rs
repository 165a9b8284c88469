//! Number token classification.
//!
//! Provision numbers come in a handful of shapes: `12`, `12A.` and the
//! compound `1.—(1)` at the primary level, `(2)`/`(2A)` at the secondary
//! level, then `(a)`, `(iv)` and `(B)` for the three sub-paragraph levels.
//! Tokens are classified after stripping any leading frame annotation and
//! opening quote marks, since quoted amendments carry those on the number.

use once_cell::sync::Lazy;
use regex::Regex;
use statute_ir::Frame;

use super::compile;
use super::quotes::is_start_mark;

static PRIMARY: Lazy<Regex> = Lazy::new(|| compile(r"^(\d+)([A-Z]{0,3})\.?$"));
static COMPOUND: Lazy<Regex> =
    Lazy::new(|| compile(r"^(\d+[A-Z]{0,3}\.?)\s*[—–-]\s*(\(\d+[A-Z]{0,3}\))$"));
static PARENTHESISED: Lazy<Regex> = Lazy::new(|| compile(r"^\(([0-9A-Za-z]+)\)$"));
static DECIMAL: Lazy<Regex> = Lazy::new(|| compile(r"^(\d+)([A-Z]{0,3})$"));

/// Numbering style of a sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumberStyle {
    Decimal,
    Lower,
    Roman,
    Upper,
}

/// A number's position in its sequence.
///
/// `ordinal` is the main value (`12` for `12A`, 27 for `aa`, 4 for `iv`);
/// `suffix` orders inserted numbers (`A` = 1, `B` = 2) and is zero for plain
/// numbers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SeqValue {
    pub style: NumberStyle,
    pub ordinal: u32,
    pub suffix: u32,
}

impl SeqValue {
    pub const fn new(style: NumberStyle, ordinal: u32) -> Self {
        SeqValue {
            style,
            ordinal,
            suffix: 0,
        }
    }

    #[must_use]
    pub const fn with_suffix(mut self, suffix: u32) -> Self {
        self.suffix = suffix;
        self
    }

    /// The first value of a sequence: `1`, `a`, `i` or `A`.
    pub const fn is_first(self) -> bool {
        self.ordinal == 1 && self.suffix == 0
    }
}

/// Strip a leading `{frame}` annotation and opening quote marks.
pub fn bare(text: &str) -> &str {
    let text = text.trim();
    let (_, consumed) = Frame::read_leading_annotation(text);
    text[consumed..].trim_start_matches(is_start_mark).trim()
}

/// The text before [`bare`]'s result: annotation and opening marks.
pub fn prefix(text: &str) -> &str {
    let text = text.trim_start();
    let rest = bare(text);
    text.find(rest)
        .map_or("", |at| &text[..at])
}

/// `12`, `12.` or `12A`.
pub fn primary(text: &str) -> Option<SeqValue> {
    let caps = PRIMARY.captures(bare(text))?;
    decimal_value(caps.get(1)?.as_str(), caps.get(2).map_or("", |m| m.as_str()))
}

/// Split a compound `1.—(1)` into its primary and secondary tokens. Any
/// annotation or opening marks stay with the primary part.
pub fn compound(text: &str) -> Option<(String, String)> {
    let caps = COMPOUND.captures(bare(text))?;
    let primary = format!("{}{}", prefix(text), caps.get(1)?.as_str());
    let secondary = caps.get(2)?.as_str().to_string();
    Some((primary, secondary))
}

/// `(2)` or `(2A)`.
pub fn secondary(text: &str) -> Option<SeqValue> {
    let caps = DECIMAL.captures(parenthesised(text)?)?;
    decimal_value(caps.get(1)?.as_str(), caps.get(2).map_or("", |m| m.as_str()))
}

/// `(a)`, `(z)`, `(aa)`.
pub fn lettered(text: &str) -> Option<SeqValue> {
    let inner = parenthesised(text)?;
    if !inner.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    letters_ordinal(inner).map(|n| SeqValue::new(NumberStyle::Lower, n))
}

/// `(i)`, `(iv)`, `(xii)`.
pub fn roman(text: &str) -> Option<SeqValue> {
    let inner = parenthesised(text)?;
    if !inner.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    roman_value(inner).map(|n| SeqValue::new(NumberStyle::Roman, n))
}

/// `(A)`, `(B)`, `(AA)`.
pub fn upper(text: &str) -> Option<SeqValue> {
    let inner = parenthesised(text)?;
    if !inner.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    letters_ordinal(&inner.to_ascii_lowercase()).map(|n| SeqValue::new(NumberStyle::Upper, n))
}

/// The numeral of a grouping heading: `3`, `3A` or `IV`.
pub fn grouping(numeral: &str) -> Option<SeqValue> {
    if let Some(caps) = DECIMAL.captures(&numeral.to_ascii_uppercase()) {
        return decimal_value(caps.get(1)?.as_str(), caps.get(2).map_or("", |m| m.as_str()));
    }
    roman_value(&numeral.to_ascii_lowercase()).map(|n| SeqValue::new(NumberStyle::Roman, n))
}

fn parenthesised(text: &str) -> Option<&str> {
    let caps = PARENTHESISED.captures(bare(text))?;
    caps.get(1).map(|m| m.as_str())
}

fn decimal_value(digits: &str, suffix: &str) -> Option<SeqValue> {
    let ordinal = digits.parse().ok()?;
    let suffix = suffix
        .bytes()
        .try_fold(0u32, |acc, b| acc.checked_mul(26)?.checked_add(u32::from(b - b'A') + 1))?;
    Some(SeqValue::new(NumberStyle::Decimal, ordinal).with_suffix(suffix))
}

/// `a` = 1 .. `z` = 26, `aa` = 27 .. `zz` = 52. Mixed letters are not a
/// lettered number.
fn letters_ordinal(letters: &str) -> Option<u32> {
    let first = letters.bytes().next()?;
    if !letters.bytes().all(|b| b == first) {
        return None;
    }
    let repeat = u32::try_from(letters.len()).ok()?;
    (repeat - 1).checked_mul(26)?.checked_add(u32::from(first - b'a') + 1)
}

const ROMAN: [(u32, &str); 13] = [
    (1000, "m"),
    (900, "cm"),
    (500, "d"),
    (400, "cd"),
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

/// Value of a canonical lowercase roman numeral.
fn roman_value(numeral: &str) -> Option<u32> {
    if numeral.is_empty() || numeral.len() > 15 {
        return None;
    }
    let mut rest = numeral;
    let mut total = 0;
    for (value, symbol) in ROMAN {
        let mut repeats = 0;
        while let Some(after) = rest.strip_prefix(symbol) {
            rest = after;
            total += value;
            repeats += 1;
            if repeats > 3 || (symbol.len() == 2 && repeats > 1) {
                return None;
            }
        }
    }
    (rest.is_empty() && to_roman(total) == numeral).then_some(total)
}

fn to_roman(mut n: u32) -> String {
    let mut out = String::new();
    for (value, symbol) in ROMAN {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_primary_shapes() {
        assert_eq!(primary("12"), Some(SeqValue::new(NumberStyle::Decimal, 12)));
        assert_eq!(primary("12."), Some(SeqValue::new(NumberStyle::Decimal, 12)));
        assert_eq!(
            primary("12A"),
            Some(SeqValue::new(NumberStyle::Decimal, 12).with_suffix(1))
        );
        assert_eq!(primary("“{act}5").map(|v| v.ordinal), None);
        assert_eq!(primary("{act} “5").map(|v| v.ordinal), Some(5));
        assert_eq!(primary("(1)"), None);
    }

    #[test]
    fn test_compound_split_keeps_prefix() {
        assert_eq!(
            compound("1.—(1)"),
            Some(("1.".to_string(), "(1)".to_string()))
        );
        assert_eq!(
            compound("“4A.—(2)"),
            Some(("“4A.".to_string(), "(2)".to_string()))
        );
        assert_eq!(compound("1."), None);
    }

    #[test]
    fn test_parenthesised_levels() {
        assert_eq!(secondary("(2A)").unwrap().suffix, 1);
        assert_eq!(lettered("(aa)").unwrap().ordinal, 27);
        assert_eq!(lettered("(ab)"), None);
        assert_eq!(roman("(iv)").unwrap().ordinal, 4);
        assert_eq!(roman("(iiii)"), None);
        assert_eq!(roman("(vx)"), None);
        assert_eq!(upper("(B)").unwrap().ordinal, 2);
        assert_eq!(upper("(b)"), None);
    }

    #[test]
    fn test_ambiguous_letters() {
        // `(i)` and `(v)` read both ways; context decides.
        assert!(lettered("(i)").is_some() && roman("(i)").is_some());
        assert!(lettered("(v)").is_some() && roman("(v)").is_some());
        assert!(lettered("(iv)").is_none());
    }

    #[test]
    fn test_grouping_numerals() {
        assert_eq!(grouping("3").unwrap().ordinal, 3);
        assert_eq!(grouping("IV").unwrap(), SeqValue::new(NumberStyle::Roman, 4));
        assert_eq!(grouping("2a").unwrap().suffix, 1);
    }

    #[test]
    fn test_bare_and_prefix() {
        assert_eq!(bare("{regulations} “‘(a)"), "(a)");
        assert_eq!(prefix("{regulations} “‘(a)"), "{regulations} “‘");
        assert_eq!(prefix("(a)"), "");
    }
}

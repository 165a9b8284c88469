//! Line patterns for headings, formulas and other fixed wording.

use once_cell::sync::Lazy;
use regex::Regex;

use super::compile;

static GROUP_OF_PARTS: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^group\s+(\d+[a-z]*|[ivxlc]+)$"));
static PART: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^part\s+(\d+[a-z]*|[ivxlc]+)$"));
static CHAPTER: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^chapter\s+(\d+[a-z]*|[ivxlc]+)$"));
static SCHEDULE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^schedule(?:\s+(\d+[a-z]*))?$"));
static SCHEDULES_BANNER: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^schedules$"));
static SCHEDULE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^(?:section|sections|article|articles|regulation|regulations|rule|rules)\s+\d")
});
static EXPLANATORY_NOTE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^explanatory\s+(?:note|memorandum)\b"));
static ENACTING_FORMULA: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^(?:be it (?:therefore )?enacted\b|.*\bmakes? the following\b|.*\bhereby (?:makes?|orders?)\b)")
});
static SIGNATURE_OPENER: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^(?:signed by\b|sealed with\b|given under (?:my|our|the) hand\b|signed on behalf\b|approved by\b)")
});
static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    compile(
        r#"^[“‘"][^”’"]+[”’"](?:\s*(?:,|and|or)\s*[“‘"][^”’"]+[”’"])*,?\s+(?:means|includes|does not include|ha(?:s|ve) the (?:same )?meaning|is to be|are to be|shall be construed|refers? to)\b"#,
    )
});

/// The numeral of a `GROUP n` heading.
pub fn group_of_parts_label(text: &str) -> Option<&str> {
    label(&GROUP_OF_PARTS, text)
}

/// The numeral of a `PART n` heading.
pub fn part_label(text: &str) -> Option<&str> {
    label(&PART, text)
}

/// The numeral of a `CHAPTER n` heading.
pub fn chapter_label(text: &str) -> Option<&str> {
    label(&CHAPTER, text)
}

/// The number of a `SCHEDULE n` heading.
pub fn schedule_label(text: &str) -> Option<&str> {
    label(&SCHEDULE, text)
}

/// `SCHEDULE` or `SCHEDULE n`.
pub fn is_schedule_heading(text: &str) -> bool {
    SCHEDULE.is_match(text.trim())
}

/// The `SCHEDULES` banner that precedes the schedules of a Bill or Act.
pub fn is_schedules_banner(text: &str) -> bool {
    SCHEDULES_BANNER.is_match(text.trim())
}

/// "Section 3", "Regulations 2 and 4" and similar references under a
/// schedule heading.
pub fn is_schedule_reference(text: &str) -> bool {
    SCHEDULE_REFERENCE.is_match(text.trim())
}

pub fn is_explanatory_note(text: &str) -> bool {
    EXPLANATORY_NOTE.is_match(text.trim())
}

pub fn is_enacting_formula(text: &str) -> bool {
    ENACTING_FORMULA.is_match(text.trim())
}

pub fn is_signature_opener(text: &str) -> bool {
    SIGNATURE_OPENER.is_match(text.trim())
}

pub fn is_definition(text: &str) -> bool {
    DEFINITION.is_match(text.trim())
}

/// Headings that open a grouping, a schedule or the closing notes.
pub fn is_structural_heading(text: &str) -> bool {
    group_of_parts_label(text).is_some()
        || part_label(text).is_some()
        || chapter_label(text).is_some()
        || is_schedule_heading(text)
        || is_schedules_banner(text)
        || is_explanatory_note(text)
}

fn label<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    let caps = pattern.captures(text.trim())?;
    caps.get(1).map(|m| m.as_str())
}

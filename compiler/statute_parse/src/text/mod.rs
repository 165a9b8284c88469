//! Text-level recognisers shared by the grammar rules.
//!
//! Nothing here looks at parser state: every function takes the text of a
//! line (or a number token) and answers a question about it.

pub mod numbers;
pub mod patterns;
pub mod quotes;

use regex::Regex;

/// Compile a literal pattern.
#[expect(
    clippy::expect_used,
    reason = "only called with literal patterns, all compiled by the tests"
)]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal pattern compiles")
}

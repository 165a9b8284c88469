//! Parser configuration.

use serde::Deserialize;
use statute_ir::DocType;

/// Options controlling a parse.
///
/// Deserializable so callers can keep settings in a JSON or TOML file next
/// to the documents they convert; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Instrument type of the document being parsed.
    pub doc_type: DocType,
    /// Cache rule results by position and state.
    pub memoize: bool,
    /// Maximum division nesting before a rule is refused.
    pub max_depth: usize,
    /// Maximum quotation nesting before a quotation is refused.
    pub max_quote_depth: usize,
    /// Lift quote marks and trailing punctuation out of quoted text.
    pub extract_quotes: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            doc_type: DocType::default(),
            memoize: true,
            max_depth: 64,
            max_quote_depth: 8,
            extract_quotes: true,
        }
    }
}

impl ParserConfig {
    pub fn for_doc_type(doc_type: DocType) -> Self {
        ParserConfig {
            doc_type,
            ..ParserConfig::default()
        }
    }

    #[must_use]
    pub fn without_memo(mut self) -> Self {
        self.memoize = false;
        self
    }
}

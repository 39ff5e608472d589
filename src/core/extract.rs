//! Per-file extraction entry point.
//!
//! Dispatches on file extension: markup files go through the tokenizer and
//! block reducer, everything else through the call-style patterns. Extraction
//! is pure; catalog deduplication happens later in the merge engine.

use serde::Serialize;

use crate::core::blocks::reduce;
use crate::core::calls::extract_calls;
use crate::core::tokenizer::tokenize;

/// Where an entry was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// A `{% blocktrans %}` construct.
    Block,
    /// An inline `{% trans %}` directive.
    Inline,
    /// A gettext-style call in source text.
    Call,
}

/// One translatable string occurrence, not yet deduplicated.
///
/// Empty `plural_text` and `hint` mean "none". `text` should never be empty;
/// empty-text entries are discarded with a warning at the merge boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedEntry {
    pub text: String,
    pub plural_text: String,
    pub hint: String,
    pub group: String,
    pub origin: Origin,
}

/// Extracts all translation entries from one file's content.
///
/// `extension` is the file extension including the leading dot (`".html"`).
/// For markup extensions the content is tokenized and reduced; for all other
/// extensions the call-style patterns are applied directly.
pub fn parse_file(content: &str, extension: &str, markup_extensions: &[String]) -> Vec<ExtractedEntry> {
    if markup_extensions.iter().any(|e| e == extension) {
        reduce(&tokenize(content))
    } else {
        extract_calls(content)
    }
}

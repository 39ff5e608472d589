//! Pattern-based extraction of translation directives and calls.
//!
//! Two families of patterns live here:
//!
//! - the inline `{% trans "..." %}` directive, matched against single block
//!   tokens by the reducer when no block construct is open;
//! - gettext-style call patterns (singular and plural) matched directly
//!   against general source text, no tokenization involved.
//!
//! All captures go through [`CallMatch`], which resolves the absent-capture
//! vs. empty-string ambiguity in one place: an absent capture always means
//! the default value.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::DEFAULT_TRANSLATION_GROUP;
use crate::core::extract::{ExtractedEntry, Origin};
use crate::core::utils::strip_quotes;

/// A quoted string literal, single or double quoted, at least one character.
const QUOTED: &str = r#"(?:"[^"]+")|(?:'[^']+')"#;

static TRANS_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"\{{%\s*trans\s+(?P<text>{q})(\s+context\s+(?P<hint>{q}))?(\s+as\s+\w+)?(\s+group\s+(?P<group>{q}))?(\s+noescape)?\s*%\}}"#,
        q = QUOTED
    ))
    .unwrap()
});

static SINGULAR_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"\b(_|pgettext_lazy|gettext|pgettext|ugettext|ugettext_lazy)\(\s*(?P<text>{q})(\s*,\s*(?P<hint>{q}))?(\s*,\s*group\s*=\s*(?P<group>{q}))?\s*\)"#,
        q = QUOTED
    ))
    .unwrap()
});

static PLURAL_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"\b(_|npgettext_lazy|ngettext|npgettext|ungettext|ungettext_lazy)\(\s*(?P<text>{q})(\s*,\s*(?P<plural>{q}))(\s*,\s*(?P<count>\d+))(\s*,\s*(?P<hint>{q}))?(\s*,\s*group\s*=\s*(?P<group>{q}))?\s*\)"#,
        q = QUOTED
    ))
    .unwrap()
});

/// Typed view over one pattern match. Every field is already quote-stripped
/// and defaulted, so callers never touch raw capture groups.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CallMatch {
    text: String,
    plural_text: String,
    hint: String,
    group: String,
}

impl CallMatch {
    fn from_captures(caps: &Captures) -> Self {
        let field = |name: &str| {
            caps.name(name)
                .map(|m| strip_quotes(m.as_str()).to_string())
                .unwrap_or_default()
        };

        let group = match caps.name("group") {
            Some(m) => {
                let stripped = strip_quotes(m.as_str()).trim().to_string();
                if stripped.is_empty() {
                    DEFAULT_TRANSLATION_GROUP.to_string()
                } else {
                    stripped
                }
            }
            None => DEFAULT_TRANSLATION_GROUP.to_string(),
        };

        CallMatch {
            text: field("text"),
            plural_text: field("plural"),
            hint: field("hint"),
            group,
        }
    }

    fn into_entry(self, origin: Origin) -> ExtractedEntry {
        ExtractedEntry {
            text: self.text,
            plural_text: self.plural_text,
            hint: self.hint,
            group: self.group,
            origin,
        }
    }
}

/// Matches an inline `{% trans %}` directive against one block tag's raw text.
///
/// The `as <alias>` clause and the `noescape` marker are accepted but ignored;
/// they only affect rendering, not extraction.
pub fn match_inline_tag(raw: &str) -> Option<ExtractedEntry> {
    TRANS_TAG_REGEX
        .captures(raw)
        .map(|caps| CallMatch::from_captures(&caps).into_entry(Origin::Inline))
}

/// Extracts all gettext-style calls from general source text.
///
/// Singular-family matches are emitted before plural-family matches; this
/// ordering is incidental to pattern iteration and carries no meaning.
pub fn extract_calls(content: &str) -> Vec<ExtractedEntry> {
    let mut entries = Vec::new();

    for caps in SINGULAR_CALL_REGEX.captures_iter(content) {
        entries.push(CallMatch::from_captures(&caps).into_entry(Origin::Call));
    }

    for caps in PLURAL_CALL_REGEX.captures_iter(content) {
        entries.push(CallMatch::from_captures(&caps).into_entry(Origin::Call));
    }

    entries
}

//! Block-construct reducer.
//!
//! Walks the token stream and reassembles `{% blocktrans %}` constructs
//! (opening tag with options, body, optional `{% plural %}` body, closing tag)
//! into single [`ExtractedEntry`] values. Modeled as an explicit finite-state
//! machine with a pure transition function so each transition is testable on
//! its own.
//!
//! The reducer is deliberately tolerant: a construct that never sees its
//! closing tag is abandoned without an entry, and a stray closing tag outside
//! any construct is ignored. Source trees are not controlled by this tool, so
//! malformed markup is not an error.

use crate::core::DEFAULT_TRANSLATION_GROUP;
use crate::core::calls::match_inline_tag;
use crate::core::extract::{ExtractedEntry, Origin};
use crate::core::placeholders::rewrite_placeholders;
use crate::core::tokenizer::{Token, TokenKind};
use crate::core::utils::{collapse_whitespace, smart_split, strip_quotes};

/// Accumulation state of one open block construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBlock {
    context: Option<String>,
    group: String,
    trimmed: bool,
    body: String,
    plural: String,
}

impl OpenBlock {
    /// Parses the opening tag's space-delimited option words.
    ///
    /// Recognized options: `context <quoted>`, `group <quoted>`, `trimmed`.
    /// Unknown words (counter bindings like `count n=x`, `with` clauses) are
    /// ignored.
    fn from_start_tag(raw: &str) -> Self {
        let inner = raw
            .trim_start_matches("{%")
            .trim_end_matches("%}");
        let words = smart_split(inner);

        let value_after = |key: &str| {
            words
                .iter()
                .position(|w| w == key)
                .and_then(|i| words.get(i + 1))
                .map(|w| strip_quotes(w).to_string())
        };

        OpenBlock {
            context: value_after("context"),
            group: value_after("group").unwrap_or_else(|| DEFAULT_TRANSLATION_GROUP.to_string()),
            trimmed: words.iter().any(|w| w == "trimmed"),
            body: String::new(),
            plural: String::new(),
        }
    }

    fn append(&mut self, raw: &str, to_plural: bool) {
        let mut part = rewrite_placeholders(raw);
        if self.trimmed {
            part = collapse_whitespace(&part);
        }
        if to_plural {
            self.plural.push_str(&part);
        } else {
            self.body.push_str(&part);
        }
    }

    fn finish(self) -> ExtractedEntry {
        let (body, plural) = if self.trimmed {
            (self.body.trim().to_string(), self.plural.trim().to_string())
        } else {
            (self.body, self.plural)
        };

        ExtractedEntry {
            text: body,
            plural_text: plural,
            hint: self.context.unwrap_or_default(),
            group: self.group,
            origin: Origin::Block,
        }
    }
}

/// Reducer state. `InBody` and `InPlural` carry the open construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Outside,
    InBody(OpenBlock),
    InPlural(OpenBlock),
}

/// Pure transition function: consumes one token, yields the next state and
/// at most one extracted entry.
pub fn transition(state: State, token: &Token) -> (State, Option<ExtractedEntry>) {
    if token.kind == TokenKind::Block {
        let compact: String = token.raw.split_whitespace().collect();

        if compact.contains("{%endblocktrans") {
            return match state {
                State::InBody(block) | State::InPlural(block) => {
                    (State::Outside, Some(block.finish()))
                }
                // Stray closing tag; nothing was open.
                State::Outside => (State::Outside, None),
            };
        }

        if compact.contains("{%blocktrans") {
            // Opening a new construct abandons any construct still open.
            return (State::InBody(OpenBlock::from_start_tag(&token.raw)), None);
        }

        if compact.contains("{%plural%}") {
            return match state {
                State::InBody(block) => (State::InPlural(block), None),
                other => (other, None),
            };
        }
    }

    match state {
        State::InBody(mut block) => {
            block.append(&token.raw, false);
            (State::InBody(block), None)
        }
        State::InPlural(mut block) => {
            block.append(&token.raw, true);
            (State::InPlural(block), None)
        }
        State::Outside => {
            let entry = if token.kind == TokenKind::Block {
                match_inline_tag(&token.raw)
            } else {
                None
            };
            (State::Outside, entry)
        }
    }
}

/// Reduces a token sequence into its extracted entries, in token order.
///
/// An open construct left over at end of input emits nothing.
pub fn reduce(tokens: &[Token]) -> Vec<ExtractedEntry> {
    let mut state = State::Outside;
    let mut entries = Vec::new();

    for token in tokens {
        let (next, entry) = transition(state, token);
        state = next;
        if let Some(entry) = entry {
            entries.push(entry);
        }
    }

    entries
}

//! Markup tokenizer.
//!
//! Splits template content on the Django-style tag delimiters (`{% %}`,
//! `{{ }}`, `{# #}`) into a linear token stream. Unlike a rendering lexer the
//! raw text of block and variable tags is kept untouched (not trimmed), so the
//! block reducer can reconstruct tag contents exactly as they appear in the
//! source file.

use std::sync::LazyLock;

use regex::Regex;

/// Matches one tag of any of the three delimiter families. Tags do not span
/// newlines, matching the template language's own lexer.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\{%.*?%\}|\{\{.*?\}\}|\{\#.*?\#\})").unwrap());

const VARIABLE_TAG_START: &str = "{{";
const BLOCK_TAG_START: &str = "{%";
const COMMENT_TAG_START: &str = "{#";

/// Comments carrying this marker are kept for translator tooling; all other
/// comments are dropped at tokenization time.
const TRANSLATOR_COMMENT_MARK: &str = "Translators";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Plain text between tags.
    Text,
    /// A `{{ ... }}` variable reference.
    Variable,
    /// A `{% ... %}` block tag.
    Block,
    /// A `{# ... #}` comment with a translator marker.
    Comment,
}

/// One token of a markup file, in file order. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text of the token, delimiters included for tags.
    pub raw: String,
}

impl Token {
    fn new(kind: TokenKind, raw: &str) -> Self {
        Token {
            kind,
            raw: raw.to_string(),
        }
    }
}

/// Tokenizes markup content into an ordered token sequence.
///
/// Pure and deterministic: the same content always yields the same tokens.
/// Comments without the translator marker are dropped; everything else is
/// preserved byte-exactly.
pub fn tokenize(content: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for tag in TAG_REGEX.find_iter(content) {
        if tag.start() > cursor {
            tokens.push(Token::new(TokenKind::Text, &content[cursor..tag.start()]));
        }

        let raw = tag.as_str();
        if raw.starts_with(VARIABLE_TAG_START) {
            tokens.push(Token::new(TokenKind::Variable, raw));
        } else if raw.starts_with(BLOCK_TAG_START) {
            tokens.push(Token::new(TokenKind::Block, raw));
        } else if raw.starts_with(COMMENT_TAG_START) && raw.contains(TRANSLATOR_COMMENT_MARK) {
            tokens.push(Token::new(TokenKind::Comment, raw));
        }

        cursor = tag.end();
    }

    if cursor < content.len() {
        tokens.push(Token::new(TokenKind::Text, &content[cursor..]));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn splits_text_and_tags() {
        let tokens = tokenize("Hello {{ name }}, {% trans \"Bye\" %}!");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Text, "Hello "),
                Token::new(TokenKind::Variable, "{{ name }}"),
                Token::new(TokenKind::Text, ", "),
                Token::new(TokenKind::Block, "{% trans \"Bye\" %}"),
                Token::new(TokenKind::Text, "!"),
            ]
        );
    }

    #[test]
    fn preserves_tag_whitespace() {
        let tokens = tokenize("{%  blocktrans   trimmed  %}");
        assert_eq!(
            tokens,
            vec![Token::new(TokenKind::Block, "{%  blocktrans   trimmed  %}")]
        );
    }

    #[test]
    fn drops_plain_comments() {
        let tokens = tokenize("a{# just a note #}b");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Text, "a"),
                Token::new(TokenKind::Text, "b"),
            ]
        );
    }

    #[test]
    fn keeps_translator_comments() {
        let tokens = tokenize("{# Translators: shown on the login page #}");
        assert_eq!(
            tokens,
            vec![Token::new(
                TokenKind::Comment,
                "{# Translators: shown on the login page #}"
            )]
        );
    }

    #[test]
    fn text_only_content() {
        let tokens = tokenize("no tags here");
        assert_eq!(tokens, vec![Token::new(TokenKind::Text, "no tags here")]);
    }

    #[test]
    fn empty_content() {
        assert_eq!(tokenize(""), Vec::<Token>::new());
    }
}

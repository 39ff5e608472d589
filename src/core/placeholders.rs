//! Variable-placeholder rewriting.
//!
//! Extracted fragments may contain template variable references such as
//! `{{ name }}`. Those are rewritten into gettext-friendly named placeholders
//! (`%(name)s`) and, afterwards, literal `%` characters are doubled so the
//! result is safe to use as a formatting template. The order matters: escaping
//! runs after substitution so the `%` introduced for placeholders survives.

use std::sync::LazyLock;

use regex::Regex;

static TEMPLATE_VAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([_a-zA-Z]+)\s*\}\}").unwrap());

/// Rewrites `{{ var }}` references to `%(var)s` and escapes lone `%` signs.
pub fn rewrite_placeholders(fragment: &str) -> String {
    let substituted = TEMPLATE_VAR_REGEX.replace_all(fragment, "%(${1})s");
    escape_lone_percents(&substituted)
}

/// Doubles every `%` that is not immediately followed by `(`.
fn escape_lone_percents(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if c == '%' && chars.peek() != Some(&'(') {
            out.push('%');
        }
    }

    out
}

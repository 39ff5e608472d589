//! Small text helpers shared by the extraction modules.

/// Splits a tag's contents into words, keeping quoted strings intact.
///
/// Quotes are kept on the returned words so that option values can be
/// distinguished from bare keywords and later stripped with [`strip_quotes`].
///
/// # Examples
///
/// ```
/// use transcan::core::utils::smart_split;
///
/// let words = smart_split(r#"blocktrans context "menu label" group "public""#);
/// assert_eq!(
///     words,
///     vec!["blocktrans", "context", "\"menu label\"", "group", "\"public\""]
/// );
/// ```
pub fn smart_split(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                    current.push(c);
                } else if c.is_whitespace() {
                    if !current.is_empty() {
                        words.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push(c);
                }
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Strips one symmetric pair of surrounding quotes (`'` or `"`), if present.
pub fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Collapses every run of whitespace into a single space.
///
/// Fragment ends are not stripped here; a fragment like `"  Hi "` becomes
/// `" Hi "` so that word boundaries survive when trimmed block fragments are
/// joined. The final leading/trailing trim happens once on the joined body.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}

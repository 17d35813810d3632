//! Helpers for building XPath expressions from user supplied text

/// Quote `text` as an XPath 1.0 string literal.
///
/// XPath 1.0 has no escape sequences, so text containing both quote kinds is
/// split on `"` and stitched back together with `concat()`.
pub fn literal(text: &str) -> String {
    if !text.contains('"') {
        return format!("\"{}\"", text);
    }
    if !text.contains('\'') {
        return format!("'{}'", text);
    }

    let mut parts = Vec::new();
    for (i, chunk) in text.split('"').enumerate() {
        if i > 0 {
            parts.push("'\"'".to_string());
        }
        if !chunk.is_empty() {
            parts.push(format!("\"{}\"", chunk));
        }
    }
    format!("concat({})", parts.join(", "))
}

/// Join several expressions into one union (`a | b | c`).
pub fn combine<I, S>(expressions: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    expressions
        .into_iter()
        .map(|e| e.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Whether `key` can be used as an attribute name inside `@key`.
pub fn is_attribute_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

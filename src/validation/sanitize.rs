//! Field sanitizers
//!
//! Sanitizers transform raw values before (and regardless of) validation.

/// Trim surrounding whitespace
pub fn trim(value: &str) -> &str {
    value.trim()
}

/// Replace markup-significant characters with HTML entities
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim then escape an optional text field; absent becomes empty
pub fn text(value: Option<&str>) -> String {
    escape(trim(value.unwrap_or_default()))
}

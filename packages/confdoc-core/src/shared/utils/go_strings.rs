//! Go string literal helpers
//!
//! Struct tags and constant values arrive as Go string literals, either raw
//! (`` `...` ``) or interpreted (`"..."`).

/// Value of a raw or interpreted string literal, `None` if `raw` is neither.
pub fn unquote(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.len() < 2 {
        return None;
    }

    if raw.starts_with('`') && raw.ends_with('`') {
        // Carriage returns are discarded from raw strings
        return Some(raw[1..raw.len() - 1].replace('\r', ""));
    }

    if raw.starts_with('"') && raw.ends_with('"') {
        return unescape(&raw[1..raw.len() - 1]);
    }

    None
}

/// Resolve the escape sequences of an interpreted string body.
///
/// Returns `None` on an invalid or truncated escape.
pub fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let escaped = chars.next()?;
        let resolved = match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'v' => '\u{0b}',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'x' => hex_char(&mut chars, 2)?,
            'u' => hex_char(&mut chars, 4)?,
            'U' => hex_char(&mut chars, 8)?,
            '0'..='7' => {
                let mut value = escaped.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                char::from_u32(value)?
            }
            _ => return None,
        };
        out.push(resolved);
    }

    Some(out)
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}

/// Collapse every whitespace run (newlines included) into one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_raw() {
        assert_eq!(
            unquote(r#"`yaml:"httpAddr" conf:"required"`"#).as_deref(),
            Some(r#"yaml:"httpAddr" conf:"required""#)
        );
    }

    #[test]
    fn test_unquote_interpreted() {
        assert_eq!(unquote(r#""server""#).as_deref(), Some("server"));
        assert_eq!(unquote(r#""a\"b\\c""#).as_deref(), Some("a\"b\\c"));
        assert_eq!(unquote(r#""tab\there""#).as_deref(), Some("tab\there"));
        assert_eq!(unquote(r#""\x41é\101""#).as_deref(), Some("AéA"));
    }

    #[test]
    fn test_unquote_rejects_bad_input() {
        assert_eq!(unquote("server"), None);
        assert_eq!(unquote(r#""bad\q""#), None);
        assert_eq!(unquote(r#""trailing\""#), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("  CacheSize defines\n the size  "),
            "CacheSize defines the size"
        );
    }
}

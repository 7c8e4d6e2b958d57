//! Struct tag lexer
//!
//! Splits a raw tag (`yaml:"port" conf:"required,example=8080"`) into its
//! `key:"value"` pairs, following the conventional struct tag syntax.

use super::error::{TagError, TagResult};
use super::types::SubTag;
use crate::shared::utils::unquote;

/// Split a tag into sub-tags, in source order.
pub fn lex_struct_tag(raw: &str) -> TagResult<Vec<SubTag>> {
    let bytes = raw.as_bytes();
    let mut subtags = Vec::new();
    let mut pos = 0;

    loop {
        while pos < bytes.len() && bytes[pos] == b' ' {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }

        let key_start = pos;
        while pos < bytes.len() && is_key_byte(bytes[pos]) {
            pos += 1;
        }
        if pos == key_start {
            return Err(TagError::malformed(pos, "expected a key"));
        }
        if pos >= bytes.len() || bytes[pos] != b':' {
            return Err(TagError::malformed(pos, "expected ':' after key"));
        }
        let key = &raw[key_start..pos];
        pos += 1;

        if pos >= bytes.len() || bytes[pos] != b'"' {
            return Err(TagError::malformed(pos, "expected '\"' to open the value"));
        }
        let value_start = pos;
        pos += 1;
        while pos < bytes.len() && bytes[pos] != b'"' {
            if bytes[pos] == b'\\' {
                pos += 1;
            }
            pos += 1;
        }
        if pos >= bytes.len() {
            return Err(TagError::malformed(value_start, "unterminated value"));
        }
        pos += 1;

        let value = unquote(&raw[value_start..pos])
            .ok_or_else(|| TagError::malformed(value_start, "invalid escape in value"))?;

        subtags.push(SubTag {
            key: key.to_string(),
            value,
        });
    }

    Ok(subtags)
}

fn is_key_byte(b: u8) -> bool {
    b > b' ' && b != b':' && b != b'"' && b != 0x7f
}

/// Split on commas outside double quotes.
pub fn split_attributes(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

/// Remove one layer of matching `"` or `'` quotes.
pub fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

//! Second-chance parsing for results files that strict JSON rejects.
//!
//! Bare `NaN`, `Infinity` and `-Infinity` tokens, and numbers too large for
//! an `f64`, are rewritten into marker strings before parsing and turned back
//! into non-finite floats afterwards. Markers start with a NUL, which a real
//! string can only contain through a `\u0000` escape; such strings get a
//! second NUL so the two never collide.

use crate::core::{non_finite_literal, FieldValue, Record};
use serde_json::Value;

const MARKER: char = '\u{0}';
const MARKER_ESCAPE: &[u8] = b"\\u0000";

const NON_FINITE_TOKENS: [(&[u8], f64); 3] = [
    (b"-Infinity", f64::NEG_INFINITY),
    (b"Infinity", f64::INFINITY),
    (b"NaN", f64::NAN),
];

/// Parse `text` with non-finite numbers marked. `None` when the text has no
/// non-finite numbers or still is not JSON.
pub fn parse_marked(text: &str) -> Option<Value> {
    let marked = mark_non_finite(text)?;
    serde_json::from_str(&marked).ok()
}

/// Turn a value from [`parse_marked`] into a record; only objects are records.
pub fn unmark_record(value: Value) -> Option<Record> {
    match value {
        Value::Object(fields) => Some(
            fields
                .into_iter()
                .map(|(name, value)| (unmark_text(name), unmark_field(value)))
                .collect(),
        ),
        _ => None,
    }
}

/// Rewrite non-finite tokens outside strings into marker strings. `None`
/// when there is nothing to rewrite.
pub fn mark_non_finite(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() + 16);
    let mut rewritten = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'"' {
            let end = string_end(bytes, i);
            out.push(b'"');
            if bytes[i + 1..].starts_with(MARKER_ESCAPE) {
                out.extend_from_slice(MARKER_ESCAPE);
            }
            out.extend_from_slice(&bytes[i + 1..end]);
            i = end;
        } else if let Some((len, value)) = non_finite_token(&bytes[i..]) {
            push_marker(&mut out, value);
            rewritten += 1;
            i += len;
        } else if b == b'-' || b.is_ascii_digit() {
            let len = bytes[i..]
                .iter()
                .position(|c| !is_number_byte(*c))
                .unwrap_or(bytes.len() - i);
            let token = &bytes[i..i + len];
            match overflowing_number(token) {
                Some(value) => {
                    push_marker(&mut out, value);
                    rewritten += 1;
                }
                None => out.extend_from_slice(token),
            }
            i += len;
        } else {
            out.push(b);
            i += 1;
        }
    }

    if rewritten == 0 {
        return None;
    }
    // only ASCII was inserted, at ASCII boundaries
    String::from_utf8(out).ok()
}

/// Index just past the closing quote of the string starting at `start`.
fn string_end(bytes: &[u8], start: usize) -> usize {
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

fn non_finite_token(rest: &[u8]) -> Option<(usize, f64)> {
    NON_FINITE_TOKENS.iter().find_map(|&(literal, value)| {
        let bounded = rest.starts_with(literal)
            && !rest
                .get(literal.len())
                .is_some_and(|c| c.is_ascii_alphanumeric() || *c == b'_');
        bounded.then_some((literal.len(), value))
    })
}

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E')
}

/// A numeric literal that only an infinite `f64` can hold, e.g. `1e400`.
fn overflowing_number(token: &[u8]) -> Option<f64> {
    let value: f64 = std::str::from_utf8(token).ok()?.parse().ok()?;
    value.is_infinite().then_some(value)
}

fn push_marker(out: &mut Vec<u8>, value: f64) {
    out.push(b'"');
    out.extend_from_slice(MARKER_ESCAPE);
    out.extend_from_slice(non_finite_literal(value).as_bytes());
    out.push(b'"');
}

enum Unmarked {
    Text(String),
    NonFinite(f64),
}

fn unmark(text: String) -> Unmarked {
    let Some(rest) = text.strip_prefix(MARKER) else {
        return Unmarked::Text(text);
    };
    if rest.starts_with(MARKER) {
        return Unmarked::Text(rest.to_string());
    }

    let value = NON_FINITE_TOKENS
        .iter()
        .find(|(literal, _)| rest.as_bytes() == *literal)
        .map(|&(_, value)| value);
    match value {
        Some(value) => Unmarked::NonFinite(value),
        None => Unmarked::Text(text),
    }
}

fn unmark_text(text: String) -> String {
    match unmark(text) {
        Unmarked::Text(text) => text,
        Unmarked::NonFinite(value) => non_finite_literal(value).to_string(),
    }
}

fn unmark_field(value: Value) -> FieldValue {
    match value {
        Value::String(text) => match unmark(text) {
            Unmarked::Text(text) => FieldValue::Json(Value::String(text)),
            Unmarked::NonFinite(value) => FieldValue::NonFinite(value),
        },
        other => FieldValue::Json(unmark_nested(other)),
    }
}

/// Nested non-finite numbers have no JSON form and stay as their literal text.
fn unmark_nested(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(unmark_text(text)),
        Value::Array(items) => Value::Array(items.into_iter().map(unmark_nested).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(name, value)| (unmark_text(name), unmark_nested(value)))
                .collect(),
        ),
        other => other,
    }
}

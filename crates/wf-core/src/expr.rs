//! Compile-time knowledge about embedded expressions.
//!
//! Expressions inside `dynamic` nodes are opaque source text written in the
//! target language. The only thing the core can tell about them is whether
//! they are a literal, whose evaluated result is known at compile time, or a
//! plain identifier path that a renderer can look up in its bindings.

use crate::node::Literal;

/// Parse `src` as a literal expression.
///
/// Accepts double-quoted strings (escapes `\\ \" \n \t \r \0`), decimal
/// integers that fit in an `i64`, finite decimal floats containing a `.` or
/// an exponent, and `true`/`false`. Anything else is not a literal.
pub fn parse_literal(src: &str) -> Option<Literal> {
    let src = src.trim();
    match src {
        "true" => return Some(Literal::Bool(true)),
        "false" => return Some(Literal::Bool(false)),
        _ => {}
    }
    if let Some(body) = src.strip_prefix('"') {
        return parse_string(body).map(Literal::Text);
    }
    parse_number(src)
}

fn parse_string(body: &str) -> Option<String> {
    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return chars.as_str().is_empty().then_some(text),
            '\\' => text.push(match chars.next()? {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '0' => '\0',
                '\\' => '\\',
                '"' => '"',
                _ => return None,
            }),
            c => text.push(c),
        }
    }
    None
}

fn parse_number(src: &str) -> Option<Literal> {
    let digits = src.strip_prefix('-').unwrap_or(src);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        return src.parse().ok().map(Literal::Int);
    }
    let float_like = digits
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !float_like {
        return None;
    }
    src.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Literal::Float)
}

/// Whether `src` is a dotted identifier path such as `user.name`.
pub fn is_identifier(src: &str) -> bool {
    let src = src.trim();
    if matches!(src, "true" | "false") {
        return false;
    }
    !src.is_empty()
        && src.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Source text of `literal` as an expression; inverse of [`parse_literal`].
pub fn literal_source(literal: &Literal) -> String {
    match literal {
        Literal::Text(text) => {
            let mut src = String::with_capacity(text.len() + 2);
            src.push('"');
            for c in text.chars() {
                match c {
                    '"' => src.push_str("\\\""),
                    '\\' => src.push_str("\\\\"),
                    '\n' => src.push_str("\\n"),
                    '\t' => src.push_str("\\t"),
                    '\r' => src.push_str("\\r"),
                    '\0' => src.push_str("\\0"),
                    c => src.push(c),
                }
            }
            src.push('"');
            src
        }
        // Debug keeps a `.0` or an exponent, so the source stays a float.
        Literal::Float(value) => format!("{:?}", value),
        other => other.to_string(),
    }
}

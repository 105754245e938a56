//! Text forms for the command line: hex dumps, value display, and typed values read
//! from plain strings according to a format.

use crate::args::ArgumentError;
use crate::codec::CodecError;
use crate::directive::{ArgKind, Directive};
use crate::parser::Scanner;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DumpError {
    #[error("hex input has an odd number of digits ({0})")]
    OddLength(usize),
    #[error("invalid hex digit {ch:?} at offset {offset}")]
    InvalidDigit { ch: char, offset: usize },
}

/// Lowercase hex, bytes separated by a space.
pub fn hex_string(b: &[u8]) -> String {
    b.iter().map(|x| format!("{:02x}", x)).collect::<Vec<_>>().join(" ")
}

/// Parse hex digits, ignoring ASCII whitespace anywhere.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, DumpError> {
    let mut digits = Vec::with_capacity(s.len());
    for (offset, ch) in s.char_indices() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        let d = ch.to_digit(16).ok_or(DumpError::InvalidDigit { ch, offset })?;
        digits.push(d as u8);
    }
    if digits.len() % 2 != 0 {
        return Err(DumpError::OddLength(digits.len()));
    }
    Ok(digits.chunks(2).map(|p| (p[0] << 4) | p[1]).collect())
}

/// Numbers as plain decimal; chars and byte strings quoted with non-printables escaped.
pub fn format_value(v: &Value) -> String {
    match v {
        Value::I8(x) => x.to_string(),
        Value::U8(x) => x.to_string(),
        Value::I16(x) => x.to_string(),
        Value::U16(x) => x.to_string(),
        Value::I32(x) => x.to_string(),
        Value::U32(x) => x.to_string(),
        Value::I64(x) => x.to_string(),
        Value::U64(x) => x.to_string(),
        Value::Float(x) => x.to_string(),
        Value::Double(x) => x.to_string(),
        Value::Char(c) => format!("'{}'", std::slice::from_ref(c).escape_ascii()),
        Value::Bytes(b) => format!("\"{}\"", b.escape_ascii()),
    }
}

fn parse_signed(text: &str) -> Option<i64> {
    let t = text.trim();
    match t.strip_prefix('-') {
        Some(rest) => parse_unsigned(rest).and_then(|u| 0i64.checked_sub_unsigned(u)),
        None => parse_unsigned(t.strip_prefix('+').unwrap_or(t))
            .and_then(|u| i64::try_from(u).ok()),
    }
}

fn parse_unsigned(text: &str) -> Option<u64> {
    let t = text.trim();
    match t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => t.parse().ok(),
    }
}

/// Read one value per argument-consuming directive of `format` from `texts`.
///
/// Integers accept decimal or `0x` hex, floats anything `f64::from_str` does. Strings
/// and chars are taken verbatim. `i0`/`I0` still consume a text so positions line up.
pub fn values_from_text<S: AsRef<str>>(
    format: &str,
    texts: &[S],
) -> Result<Vec<Value>, CodecError> {
    let mut out = Vec::new();
    for d in Scanner::new(format) {
        let d = d?;
        let kind = match d.arg_kind() {
            Some(k) => k,
            None => continue,
        };
        let ordinal = out.len() + 1;
        let text = texts
            .get(out.len())
            .map(AsRef::as_ref)
            .ok_or(ArgumentError::Missing { ordinal })?;
        let parse_err = |expected| ArgumentError::Parse {
            ordinal,
            text: text.to_string(),
            expected,
        };
        let v = match (kind, d) {
            (ArgKind::Char | ArgKind::String, _) => Value::from(text),
            (ArgKind::Skip, _) => Value::U64(0),
            (ArgKind::Number, Directive::Int { signed: true, .. }) => {
                Value::I64(parse_signed(text).ok_or_else(|| parse_err("integer"))?)
            }
            (ArgKind::Number, Directive::Int { signed: false, .. }) => {
                Value::U64(parse_unsigned(text).ok_or_else(|| parse_err("unsigned integer"))?)
            }
            (ArgKind::Number, _) => {
                Value::Double(text.trim().parse().map_err(|_| parse_err("number"))?)
            }
        };
        out.push(v);
    }
    Ok(out)
}

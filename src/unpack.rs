//! Unpack driver: format string + byte buffer into values and a next position.
//!
//! Scanning stops as soon as the cursor reaches the end of the data, even if directives
//! remain. A format that describes more than the buffer holds therefore returns fewer
//! values instead of failing, which is what makes a trailing size-less `s` usable as
//! "the rest". Directives past that point are never scanned, malformed or not.

use crate::args::ArgumentError;
use crate::codec::{decode_uint, sign_extend, CodecError, Config};
use crate::directive::{Directive, Endianness};
use crate::parser::Scanner;
use crate::value::Value;
use log::{debug, trace};

/// Per-call unpack state over a borrowed buffer.
pub struct Unpacker<'a> {
    data: &'a [u8],
    pos: usize,
    order: Endianness,
    config: Config,
    values: Vec<Value>,
}

impl<'a> Unpacker<'a> {
    /// `pos` is a zero-based byte offset.
    pub fn new(data: &'a [u8], pos: usize, config: Config) -> Self {
        Unpacker {
            data,
            pos,
            order: Endianness::native(),
            config,
            values: Vec::new(),
        }
    }

    /// Returns the one-based next position and the produced values.
    pub fn run(mut self, format: &str) -> Result<(usize, Vec<Value>), CodecError> {
        let mut scanner = Scanner::with_config(format, &self.config);
        while self.pos < self.data.len() {
            let d = match scanner.next() {
                Some(d) => d?,
                None => break,
            };
            trace!("unpack '{}' at {} ({:?})", d.code(), self.pos, self.order);
            self.apply(&d)?;
        }
        debug!("unpacked {} value(s), next position {}", self.values.len(), self.pos + 1);
        Ok((self.pos + 1, self.values))
    }

    fn take(&mut self, n: usize, code: char) -> Result<&'a [u8], CodecError> {
        let data = self.data;
        if data.len().saturating_sub(self.pos) < n {
            return Err(CodecError::OutOfData {
                code,
                ordinal: self.values.len() + 1,
            });
        }
        let bytes = &data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn apply(&mut self, d: &Directive) -> Result<(), CodecError> {
        let code = d.code();
        let value = match *d {
            Directive::Endian(order) => {
                self.order = order;
                return Ok(());
            }
            Directive::Padding { size, .. } => {
                self.take(size, code)?;
                return Ok(());
            }
            Directive::Char => Value::Char(self.take(1, code)?[0]),
            Directive::Int { signed, size: 0, .. } => {
                if signed {
                    Value::I64(0)
                } else {
                    Value::U64(0)
                }
            }
            Directive::Int { size, .. } => {
                let raw = decode_uint(self.take(size, code)?, self.order);
                match code {
                    'b' => Value::I8(raw as u8 as i8),
                    'B' => Value::U8(raw as u8),
                    'h' | 'l' => Value::I16(raw as u16 as i16),
                    'H' | 'L' => Value::U16(raw as u16),
                    'i' => Value::I64(sign_extend(raw, size)),
                    _ => Value::U64(raw),
                }
            }
            Directive::Float => {
                let raw = decode_uint(self.take(4, code)?, self.order);
                Value::Float(f32::from_bits(raw as u32))
            }
            Directive::Double => {
                let raw = decode_uint(self.take(8, code)?, self.order);
                Value::Double(f64::from_bits(raw))
            }
            Directive::ZeroTerminated => {
                let data = self.data;
                let rest = &data[self.pos..];
                let n = rest.iter().position(|&b| b == 0).ok_or(CodecError::OutOfData {
                    code,
                    ordinal: self.values.len() + 1,
                })?;
                self.pos += n + 1;
                Value::Bytes(rest[..n].to_vec())
            }
            Directive::LengthPrefixed { size } => {
                let len = decode_uint(self.take(size, code)?, self.order) as usize;
                Value::Bytes(self.take(len, code)?.to_vec())
            }
            Directive::Fixed { size } => {
                let n = size.unwrap_or(self.data.len() - self.pos);
                Value::Bytes(self.take(n, code)?.to_vec())
            }
        };
        self.values.push(value);
        Ok(())
    }
}

/// Unpack `data` according to `format`, starting at the one-based position `start`
/// (default 1). Returns the one-based position after the last consumed byte, and the values.
///
/// ```
/// use binpacker::{unpack, Value};
///
/// let (next, values) = unpack("z", b"hi\0", None)?;
/// assert_eq!(next, 4);
/// assert_eq!(values, vec![Value::from("hi")]);
/// # Ok::<(), binpacker::CodecError>(())
/// ```
pub fn unpack(
    format: &str,
    data: &[u8],
    start: Option<usize>,
) -> Result<(usize, Vec<Value>), CodecError> {
    unpack_with(&Config::default(), format, data, start)
}

pub fn unpack_with(
    config: &Config,
    format: &str,
    data: &[u8],
    start: Option<usize>,
) -> Result<(usize, Vec<Value>), CodecError> {
    let start = start.unwrap_or(1);
    if start == 0 {
        return Err(ArgumentError::StartPosition(start).into());
    }
    Unpacker::new(data, start - 1, *config).run(format)
}

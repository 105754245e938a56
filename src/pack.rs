//! Pack driver: format string + arguments into a byte buffer.

use crate::args::Arguments;
use crate::codec::{encode_uint, truncate_len, CodecError, Config, FormatError, LengthPrefixPolicy};
use crate::directive::{Directive, Endianness};
use crate::parser::Scanner;
use log::{debug, trace};

/// Per-call pack state: current byte order, next argument, output so far.
pub struct Packer<'a, A: Arguments + ?Sized> {
    args: &'a A,
    config: Config,
    order: Endianness,
    next_arg: usize,
    out: Vec<u8>,
}

impl<'a, A: Arguments + ?Sized> Packer<'a, A> {
    pub fn new(args: &'a A, config: Config) -> Self {
        Packer {
            args,
            config,
            order: Endianness::native(),
            next_arg: 0,
            out: Vec::new(),
        }
    }

    /// Run every directive of `format`. On error the partial buffer is dropped.
    pub fn run(mut self, format: &str) -> Result<Vec<u8>, CodecError> {
        for d in Scanner::with_config(format, &self.config) {
            let d = d?;
            trace!("pack '{}' at {} ({:?})", d.code(), self.out.len(), self.order);
            self.apply(&d)?;
        }
        debug!("packed {} byte(s) from {} argument(s)", self.out.len(), self.next_arg);
        Ok(self.out)
    }

    fn take_arg(&mut self) -> usize {
        let i = self.next_arg;
        self.next_arg += 1;
        i
    }

    fn apply(&mut self, d: &Directive) -> Result<(), CodecError> {
        let args = self.args;
        match *d {
            Directive::Endian(order) => self.order = order,
            Directive::Char => {
                let s = args.string(self.take_arg())?;
                self.out.push(s.first().copied().unwrap_or(0));
            }
            Directive::Int { size: 0, .. } => {
                self.take_arg();
            }
            Directive::Int { size, .. } => {
                let bits = args.bits(self.take_arg())?;
                encode_uint(&mut self.out, bits, size, self.order);
            }
            Directive::Float => {
                let x = args.float(self.take_arg())? as f32;
                encode_uint(&mut self.out, x.to_bits() as u64, 4, self.order);
            }
            Directive::Double => {
                let x = args.float(self.take_arg())?;
                encode_uint(&mut self.out, x.to_bits(), 8, self.order);
            }
            Directive::ZeroTerminated => {
                let s = args.string(self.take_arg())?;
                self.out.extend_from_slice(s);
                self.out.push(0);
            }
            Directive::LengthPrefixed { size } => {
                let s = args.string(self.take_arg())?;
                let len = truncate_len(s.len(), size);
                if len != s.len() && self.config.length_prefix == LengthPrefixPolicy::Reject {
                    return Err(CodecError::LengthOverflow { len: s.len(), size });
                }
                encode_uint(&mut self.out, len as u64, size, self.order);
                self.out.extend_from_slice(&s[..len]);
            }
            Directive::Fixed { size } => {
                let s = args.string(self.take_arg())?;
                let n = size.unwrap_or(s.len());
                let keep = n.min(s.len());
                let end = self
                    .out
                    .len()
                    .checked_add(n)
                    .ok_or(FormatError::FixedTooLong { size: n, max: self.config.max_fixed })?;
                self.out.extend_from_slice(&s[..keep]);
                self.out.resize(end, 0);
            }
            Directive::Padding { size, fill } => {
                let end = self
                    .out
                    .len()
                    .checked_add(size)
                    .ok_or(FormatError::PaddingTooLong { size, max: self.config.max_padding })?;
                self.out.resize(end, fill);
            }
        }
        Ok(())
    }
}

/// Pack `args` according to `format` with the default [`Config`].
///
/// ```
/// use binpacker::{pack, Value};
///
/// let bytes = pack(">Hz", &[Value::from(258u16), Value::from("hi")])?;
/// assert_eq!(bytes, b"\x01\x02hi\0");
/// # Ok::<(), binpacker::CodecError>(())
/// ```
pub fn pack<A: Arguments + ?Sized>(format: &str, args: &A) -> Result<Vec<u8>, CodecError> {
    pack_with(&Config::default(), format, args)
}

pub fn pack_with<A: Arguments + ?Sized>(
    config: &Config,
    format: &str,
    args: &A,
) -> Result<Vec<u8>, CodecError> {
    Packer::new(args, *config).run(format)
}

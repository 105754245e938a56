//! Byte-level numeric codec and the error type shared by every operation.
//!
//! Integers of 1 to 8 bytes go through an 8-byte native-order scratch buffer that is
//! reversed when the requested order differs from the host's. Narrow widths keep the
//! low-order bytes in both orders, so packing `0x1234_5678` as `I2` gives the same
//! bytes as packing `0x5678`.

use crate::args::ArgumentError;
use crate::directive::Endianness;
use byteorder::{ByteOrder, NativeEndian};

/// Upper bound on `x` padding, matching the scratch buffer size padding was written from.
pub const DEFAULT_MAX_PADDING: usize = 8192;
/// Upper bound on a sized `s` field.
pub const DEFAULT_MAX_FIXED: usize = 1 << 24;
/// Widest `i`/`I` integer, in bytes.
pub const MAX_INT_SIZE: usize = 8;
/// Widest `p` length prefix, in bytes.
pub const MAX_PREFIX_SIZE: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Format: {0}")]
    Format(#[from] FormatError),
    #[error("hit end of data while reading '{code}' ({ordinal})")]
    OutOfData { code: char, ordinal: usize },
    #[error("'p{size}': length {len} does not fit in {size} byte(s)")]
    LengthOverflow { len: usize, size: usize },
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// Malformed or unsupported directive. Raised before the directive touches any byte.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("invalid format specifier '{found}' ({}) at offset {offset}", code_point(.found))]
    InvalidSpecifier { found: char, offset: usize },
    #[error("'{code}{size}': {} is too wide (max {max})", width_noun(.code))]
    TooWide { code: char, size: usize, max: usize },
    #[error("'x{size}': padding is too long (max {max})")]
    PaddingTooLong { size: usize, max: usize },
    #[error("'s{size}': fixed string is too long (max {max})")]
    FixedTooLong { size: usize, max: usize },
    #[error("'x' fill value {fill} out of range (0..=255)")]
    FillOutOfRange { fill: usize },
    #[error("'x': missing fill value after ',' at offset {offset}")]
    MissingFill { offset: usize },
    #[error("'{code}': size at offset {offset} overflows")]
    NumberOverflow { code: char, offset: usize },
}

fn code_point(c: &char) -> String {
    format!("{:#04x}", *c as u32)
}

fn width_noun(code: &char) -> &'static str {
    if *code == 'p' {
        "int"
    } else {
        "size"
    }
}

/// What to do when a `p` payload is longer than its prefix can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPrefixPolicy {
    /// Keep `len mod 2^(8N)` bytes of payload and write that length.
    #[default]
    Truncate,
    /// Fail with [`CodecError::LengthOverflow`].
    Reject,
}

/// Per-call limits and policies. The plain [`pack`](crate::pack())/[`unpack`](crate::unpack())
/// entry points use [`Config::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub max_padding: usize,
    pub max_fixed: usize,
    pub length_prefix: LengthPrefixPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_padding: DEFAULT_MAX_PADDING,
            max_fixed: DEFAULT_MAX_FIXED,
            length_prefix: LengthPrefixPolicy::Truncate,
        }
    }
}

/// Append the low `size` bytes of `bits` in `order`. `size` must be at most 8.
pub fn encode_uint(out: &mut Vec<u8>, bits: u64, size: usize, order: Endianness) {
    debug_assert!(size <= MAX_INT_SIZE);
    let mut scratch = [0u8; 8];
    NativeEndian::write_u64(&mut scratch, bits);
    if !order.is_native() {
        scratch.reverse();
    }
    match order {
        Endianness::Big => out.extend_from_slice(&scratch[8 - size..]),
        Endianness::Little => out.extend_from_slice(&scratch[..size]),
    }
}

/// Read `bytes` (at most 8) as an unsigned integer in `order`.
pub fn decode_uint(bytes: &[u8], order: Endianness) -> u64 {
    let size = bytes.len();
    debug_assert!(size <= MAX_INT_SIZE);
    let mut scratch = [0u8; 8];
    match order {
        Endianness::Big => scratch[8 - size..].copy_from_slice(bytes),
        Endianness::Little => scratch[..size].copy_from_slice(bytes),
    }
    if !order.is_native() {
        scratch.reverse();
    }
    NativeEndian::read_u64(&scratch)
}

/// Sign-extend the low `size` bytes of `raw`.
pub fn sign_extend(raw: u64, size: usize) -> i64 {
    if size == 0 || size >= MAX_INT_SIZE {
        return raw as i64;
    }
    let shift = 64 - size as u32 * 8;
    ((raw << shift) as i64) >> shift
}

/// `len mod 2^(8 * size)`.
pub fn truncate_len(len: usize, size: usize) -> usize {
    if size >= std::mem::size_of::<usize>() {
        len
    } else {
        len & ((1usize << (size * 8)) - 1)
    }
}

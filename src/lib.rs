//! # binpacker: format-string driven binary struct codec
//!
//! A compact format string describes a sequence of typed fields. [`pack`] turns a list of
//! [`Value`]s into bytes following that layout; [`unpack`] reads bytes back into values and
//! reports the one-based position after the last byte it consumed, so a scan over one buffer
//! can be resumed with another call.
//!
//! ## Format characters
//!
//! | Directive | Meaning |
//! |-----------|---------|
//! | `<` `>` `=` | little, big, native byte order for the directives that follow |
//! | ` ` | ignored |
//! | `c` | one raw byte (a one-character string) |
//! | `b` / `B` | signed / unsigned byte |
//! | `h` / `H` | signed / unsigned 2-byte integer |
//! | `l` / `L` | signed / unsigned 2-byte integer (legacy width) |
//! | `i[N]` / `I[N]` | signed / unsigned N-byte integer, N in 0..=8, default 4 |
//! | `f` / `d` | IEEE-754 single / double |
//! | `z` | zero-terminated string |
//! | `p[N]` | string prefixed by an N-byte length, N in 0..=4, default 2 |
//! | `s[N]` | fixed-length string; without N packs the whole input / unpacks to the end |
//! | `x[N[,V]]` | N bytes of value V (default N=1, V=0); skipped on unpack |
//!
//! Byte order starts native on every call and changes only for later directives. No
//! alignment padding is ever inserted.
//!
//! ## Example
//!
//! ```
//! use binpacker::{pack, unpack, Value};
//!
//! let values = vec![Value::from(7u8), Value::from(-2i64), Value::from("id")];
//! let bytes = pack("<B i3 p1", &values)?;
//! assert_eq!(bytes, [7, 0xfe, 0xff, 0xff, 2, b'i', b'd']);
//!
//! let (next, out) = unpack("<B i3 p1", &bytes, None)?;
//! assert_eq!(next, bytes.len() + 1);
//! assert_eq!(out, vec![Value::U8(7), Value::I64(-2), Value::from("id")]);
//! # Ok::<(), binpacker::CodecError>(())
//! ```

pub mod args;
pub mod codec;
pub mod directive;
pub mod dump;
pub mod extent;
pub mod pack;
pub mod parser;
pub mod records;
pub mod unpack;
pub mod value;

pub use args::{ArgumentError, Arguments};
pub use codec::{CodecError, Config, FormatError, LengthPrefixPolicy};
pub use directive::{Directive, Endianness};
pub use extent::fixed_size;
pub use pack::{pack, pack_with, Packer};
pub use parser::{parse, Scanner};
pub use records::{unpack_records, unpack_records_with, Record};
pub use unpack::{unpack, unpack_with, Unpacker};
pub use value::Value;

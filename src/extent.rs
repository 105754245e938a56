//! Static extent of a format string.

use crate::codec::{CodecError, FormatError};
use crate::parser::Scanner;

/// Number of bytes `format` packs to when that does not depend on the values.
///
/// `None` as soon as a `z`, a `p` or a size-less `s` appears. Malformed directives
/// are still reported even after that point, and so is a total that overflows `usize`.
pub fn fixed_size(format: &str) -> Result<Option<usize>, CodecError> {
    let mut scanner = Scanner::new(format);
    let mut total = Some(0usize);
    while let Some(d) = scanner.next() {
        let d = d?;
        total = match (total, d.fixed_size()) {
            (Some(t), Some(n)) => Some(t.checked_add(n).ok_or(FormatError::NumberOverflow {
                code: d.code(),
                offset: scanner.offset(),
            })?),
            _ => None,
        };
    }
    Ok(total)
}

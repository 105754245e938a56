//! Argument access for [`pack`](crate::pack()).
//!
//! The packer never indexes the caller's values directly; it asks an [`Arguments`]
//! implementation for argument `i` as a number or as a string and propagates whatever
//! that request fails with. Slices and vectors of [`Value`] implement it out of the box.

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("bad argument #{ordinal}: value expected, got no value")]
    Missing { ordinal: usize },
    #[error("bad argument #{ordinal}: {expected} expected, got {found}")]
    Type {
        ordinal: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("bad argument #{ordinal}: cannot read {text:?} as {expected}")]
    Parse {
        ordinal: usize,
        text: String,
        expected: &'static str,
    },
    #[error("start position must be 1 or greater, got {0}")]
    StartPosition(usize),
}

/// Source of pack inputs. `index` is zero-based; errors report it one-based.
pub trait Arguments {
    fn get(&self, index: usize) -> Option<&Value>;

    /// Argument `index` as a number.
    fn number(&self, index: usize) -> Result<&Value, ArgumentError> {
        let v = self.get(index).ok_or(ArgumentError::Missing { ordinal: index + 1 })?;
        if v.is_number() {
            Ok(v)
        } else {
            Err(ArgumentError::Type {
                ordinal: index + 1,
                expected: "number",
                found: v.kind(),
            })
        }
    }

    /// Two's-complement bits of argument `index`, for the integer codes.
    fn bits(&self, index: usize) -> Result<u64, ArgumentError> {
        let v = self.number(index)?;
        v.to_bits().ok_or(ArgumentError::Type {
            ordinal: index + 1,
            expected: "number",
            found: v.kind(),
        })
    }

    /// Argument `index` as a float, for `f` and `d`.
    fn float(&self, index: usize) -> Result<f64, ArgumentError> {
        let v = self.number(index)?;
        v.as_f64().ok_or(ArgumentError::Type {
            ordinal: index + 1,
            expected: "number",
            found: v.kind(),
        })
    }

    /// Argument `index` as a byte string. Numbers are not converted.
    fn string(&self, index: usize) -> Result<&[u8], ArgumentError> {
        let v = self.get(index).ok_or(ArgumentError::Missing { ordinal: index + 1 })?;
        v.as_bytes().ok_or(ArgumentError::Type {
            ordinal: index + 1,
            expected: "string",
            found: v.kind(),
        })
    }
}

impl Arguments for [Value] {
    fn get(&self, index: usize) -> Option<&Value> {
        <[Value]>::get(self, index)
    }
}

impl Arguments for Vec<Value> {
    fn get(&self, index: usize) -> Option<&Value> {
        self.as_slice().get(index)
    }
}

impl<const N: usize> Arguments for [Value; N] {
    fn get(&self, index: usize) -> Option<&Value> {
        self.as_slice().get(index)
    }
}

//! Runtime values flowing in and out of the codec.

/// A single packed or unpacked value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    Float(f32),
    Double(f64),
    /// One raw byte (`c`).
    Char(u8),
    /// Byte string (`z`, `p`, `s`). Not required to be UTF-8.
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_number(&self) -> bool {
        !matches!(self, Value::Char(_) | Value::Bytes(_))
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U8(x) => Some(*x as u64),
            Value::U16(x) => Some(*x as u64),
            Value::U32(x) => Some(*x as u64),
            Value::U64(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x as f64),
            Value::Double(x) => Some(*x),
            _ => self.integer_bits().map(|(bits, signed)| {
                if signed {
                    bits as i64 as f64
                } else {
                    bits as f64
                }
            }),
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            Value::Char(c) => Some(std::slice::from_ref(c)),
            _ => None,
        }
    }

    /// Two's-complement bits of a numeric value, ready for narrowing.
    /// Floats are truncated toward zero (saturating).
    pub fn to_bits(&self) -> Option<u64> {
        match self {
            Value::Float(x) => Some(float_to_bits(*x as f64)),
            Value::Double(x) => Some(float_to_bits(*x)),
            _ => self.integer_bits().map(|(bits, _)| bits),
        }
    }

    /// Short name of the variant kind, used in argument errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Char(_) | Value::Bytes(_) => "string",
            _ => "number",
        }
    }

    fn integer_bits(&self) -> Option<(u64, bool)> {
        match self {
            Value::I8(x) => Some((*x as i64 as u64, true)),
            Value::I16(x) => Some((*x as i64 as u64, true)),
            Value::I32(x) => Some((*x as i64 as u64, true)),
            Value::I64(x) => Some((*x as u64, true)),
            _ => self.as_u64().map(|x| (x, false)),
        }
    }
}

fn float_to_bits(x: f64) -> u64 {
    if x < 0.0 {
        x as i64 as u64
    } else {
        x as u64
    }
}

macro_rules! impl_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(x: $t) -> Self {
                    Value::$variant(x)
                }
            }
        )*
    };
}

impl_from! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => Float,
    f64 => Double,
    Vec<u8> => Bytes,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bytes(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<char> for Value {
    /// Non-ASCII characters keep only their first UTF-8 byte.
    fn from(c: char) -> Self {
        let mut buf = [0u8; 4];
        Value::Char(c.encode_utf8(&mut buf).as_bytes()[0])
    }
}

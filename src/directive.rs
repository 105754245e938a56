//! Parsed form of a format string: one [`Directive`] per type code or control character.

/// Byte order for multi-byte fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// Byte order of the target this crate was compiled for (`=`).
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }

    pub fn is_native(self) -> bool {
        self == Self::native()
    }
}

impl Default for Endianness {
    fn default() -> Self {
        Self::native()
    }
}

/// What a directive takes from the argument list when packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Number,
    Char,
    String,
    /// `i0` / `I0`: the slot is consumed but never read.
    Skip,
}

/// One unit of a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `<`, `>` or `=`.
    Endian(Endianness),
    /// `c`
    Char,
    /// `b B h H l L i I`. `size` is in bytes, 0..=8.
    Int { code: char, signed: bool, size: usize },
    /// `f`
    Float,
    /// `d`
    Double,
    /// `z`
    ZeroTerminated,
    /// `p[N]`: N-byte unsigned length, then payload.
    LengthPrefixed { size: usize },
    /// `s[N]`: fixed N bytes, or the whole input / rest of data when absent.
    Fixed { size: Option<usize> },
    /// `x[N[,V]]`
    Padding { size: usize, fill: u8 },
}

impl Directive {
    /// Format character this directive was parsed from. `=` reports as `<` or `>`
    /// depending on the target.
    pub fn code(&self) -> char {
        match self {
            Directive::Endian(Endianness::Little) => '<',
            Directive::Endian(Endianness::Big) => '>',
            Directive::Char => 'c',
            Directive::Int { code, .. } => *code,
            Directive::Float => 'f',
            Directive::Double => 'd',
            Directive::ZeroTerminated => 'z',
            Directive::LengthPrefixed { .. } => 'p',
            Directive::Fixed { .. } => 's',
            Directive::Padding { .. } => 'x',
        }
    }

    /// Argument consumed by pack, if any.
    pub fn arg_kind(&self) -> Option<ArgKind> {
        match self {
            Directive::Endian(_) | Directive::Padding { .. } => None,
            Directive::Char => Some(ArgKind::Char),
            Directive::Int { size: 0, .. } => Some(ArgKind::Skip),
            Directive::Int { .. } | Directive::Float | Directive::Double => Some(ArgKind::Number),
            Directive::ZeroTerminated
            | Directive::LengthPrefixed { .. }
            | Directive::Fixed { .. } => Some(ArgKind::String),
        }
    }

    /// Whether unpack yields a value for this directive.
    pub fn produces_value(&self) -> bool {
        !matches!(self, Directive::Endian(_) | Directive::Padding { .. })
    }

    /// Encoded size in bytes when it does not depend on the data.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Directive::Endian(_) => Some(0),
            Directive::Char => Some(1),
            Directive::Int { size, .. } => Some(*size),
            Directive::Float => Some(4),
            Directive::Double => Some(8),
            Directive::Fixed { size } => *size,
            Directive::Padding { size, .. } => Some(*size),
            Directive::ZeroTerminated | Directive::LengthPrefixed { .. } => None,
        }
    }
}

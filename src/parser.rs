//! Format string scanner.
//!
//! Directives are produced lazily, one per call, so a driver can stop early (unpack does
//! once the data runs out) without ever looking at the rest of the string. Each size
//! suffix is a greedy run of ASCII digits directly after the type code; there is no sign
//! and no whitespace allowed in between.

use crate::codec::{CodecError, Config, FormatError, MAX_INT_SIZE, MAX_PREFIX_SIZE};
use crate::directive::{Directive, Endianness};

/// Lazy directive iterator over a format string. Stops after the first error.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    format: &'a str,
    pos: usize,
    max_padding: usize,
    max_fixed: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(format: &'a str) -> Self {
        Self::with_config(format, &Config::default())
    }

    /// Scanner enforcing the `x` and `s` size limits of `config`.
    pub fn with_config(format: &'a str, config: &Config) -> Self {
        Scanner {
            format,
            pos: 0,
            max_padding: config.max_padding,
            max_fixed: config.max_fixed,
        }
    }

    /// Byte offset of the next unscanned character.
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn peek_byte(&self) -> Option<u8> {
        self.format.as_bytes().get(self.pos).copied()
    }

    /// Greedy decimal run; `None` when no digit follows.
    fn read_number(&mut self, code: char) -> Result<Option<usize>, FormatError> {
        let start = self.pos;
        let mut n: usize = 0;
        while let Some(b) = self.peek_byte().filter(u8::is_ascii_digit) {
            n = n
                .checked_mul(10)
                .and_then(|n| n.checked_add((b - b'0') as usize))
                .ok_or(FormatError::NumberOverflow { code, offset: start })?;
            self.pos += 1;
        }
        Ok((self.pos > start).then_some(n))
    }

    fn scan(&mut self) -> Result<Option<Directive>, FormatError> {
        loop {
            let start = self.pos;
            let c = match self.format[start..].chars().next() {
                Some(c) => c,
                None => return Ok(None),
            };
            self.pos += c.len_utf8();
            let d = match c {
                ' ' => continue,
                '<' => Directive::Endian(Endianness::Little),
                '>' => Directive::Endian(Endianness::Big),
                '=' => Directive::Endian(Endianness::native()),
                'c' => Directive::Char,
                'b' | 'B' => Directive::Int { code: c, signed: c == 'b', size: 1 },
                'h' | 'H' => Directive::Int { code: c, signed: c == 'h', size: 2 },
                // Legacy alias: two bytes, not the platform long.
                'l' | 'L' => Directive::Int { code: c, signed: c == 'l', size: 2 },
                'i' | 'I' => {
                    let size = self.read_number(c)?.unwrap_or(4);
                    if size > MAX_INT_SIZE {
                        return Err(FormatError::TooWide { code: c, size, max: MAX_INT_SIZE });
                    }
                    Directive::Int { code: c, signed: c == 'i', size }
                }
                'f' => Directive::Float,
                'd' => Directive::Double,
                'z' => Directive::ZeroTerminated,
                'p' => {
                    let size = self.read_number(c)?.unwrap_or(2);
                    if size > MAX_PREFIX_SIZE {
                        return Err(FormatError::TooWide { code: c, size, max: MAX_PREFIX_SIZE });
                    }
                    Directive::LengthPrefixed { size }
                }
                's' => {
                    let size = self.read_number(c)?;
                    if let Some(size) = size.filter(|&n| n > self.max_fixed) {
                        return Err(FormatError::FixedTooLong { size, max: self.max_fixed });
                    }
                    Directive::Fixed { size }
                }
                'x' => {
                    let size = self.read_number(c)?.unwrap_or(1);
                    if size > self.max_padding {
                        return Err(FormatError::PaddingTooLong { size, max: self.max_padding });
                    }
                    let mut fill = 0;
                    if self.peek_byte() == Some(b',') {
                        self.pos += 1;
                        let v = self
                            .read_number(c)?
                            .ok_or(FormatError::MissingFill { offset: self.pos - 1 })?;
                        fill = u8::try_from(v)
                            .map_err(|_| FormatError::FillOutOfRange { fill: v })?;
                    }
                    Directive::Padding { size, fill }
                }
                found => return Err(FormatError::InvalidSpecifier { found, offset: start }),
            };
            return Ok(Some(d));
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Directive, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        let r = self.scan().transpose();
        if matches!(r, Some(Err(_))) {
            self.pos = self.format.len();
        }
        r
    }
}

/// Scan a whole format string up front.
pub fn parse(format: &str) -> Result<Vec<Directive>, CodecError> {
    Scanner::new(format)
        .collect::<Result<Vec<_>, _>>()
        .map_err(CodecError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DEFAULT_MAX_FIXED, DEFAULT_MAX_PADDING};

    fn one(fmt: &str) -> Directive {
        let v = parse(fmt).expect("parse");
        assert_eq!(v.len(), 1, "{:?}", v);
        v[0]
    }

    fn format_err(fmt: &str) -> FormatError {
        match parse(fmt) {
            Err(CodecError::Format(e)) => e,
            other => panic!("expected format error for {:?}, got {:?}", fmt, other),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(one("i"), Directive::Int { code: 'i', signed: true, size: 4 });
        assert_eq!(one("I"), Directive::Int { code: 'I', signed: false, size: 4 });
        assert_eq!(one("p"), Directive::LengthPrefixed { size: 2 });
        assert_eq!(one("s"), Directive::Fixed { size: None });
        assert_eq!(one("x"), Directive::Padding { size: 1, fill: 0 });
    }

    #[test]
    fn legacy_long_is_two_bytes() {
        assert_eq!(one("l"), Directive::Int { code: 'l', signed: true, size: 2 });
        assert_eq!(one("L"), Directive::Int { code: 'L', signed: false, size: 2 });
    }

    #[test]
    fn greedy_digit_run() {
        assert_eq!(one("s12"), Directive::Fixed { size: Some(12) });
        assert_eq!(one("I08"), Directive::Int { code: 'I', signed: false, size: 8 });
        assert_eq!(one("s0"), Directive::Fixed { size: Some(0) });
    }

    #[test]
    fn fixed_size_codes_take_no_suffix() {
        // "b2" is a byte followed by an invalid '2'.
        assert_eq!(
            format_err("b2"),
            FormatError::InvalidSpecifier { found: '2', offset: 1 }
        );
    }

    #[test]
    fn padding_fill() {
        assert_eq!(one("x4,65"), Directive::Padding { size: 4, fill: 65 });
        assert_eq!(one("x,7"), Directive::Padding { size: 1, fill: 7 });
        assert_eq!(format_err("x2,"), FormatError::MissingFill { offset: 2 });
        assert_eq!(format_err("x2,256"), FormatError::FillOutOfRange { fill: 256 });
    }

    #[test]
    fn spaces_and_endianness() {
        let v = parse(" < h > H = ").expect("parse");
        assert_eq!(
            v,
            vec![
                Directive::Endian(Endianness::Little),
                Directive::Int { code: 'h', signed: true, size: 2 },
                Directive::Endian(Endianness::Big),
                Directive::Int { code: 'H', signed: false, size: 2 },
                Directive::Endian(Endianness::native()),
            ]
        );
    }

    #[test]
    fn width_limits() {
        assert_eq!(format_err("i9"), FormatError::TooWide { code: 'i', size: 9, max: 8 });
        assert_eq!(format_err("p5"), FormatError::TooWide { code: 'p', size: 5, max: 4 });
        assert!(parse("I8p4").is_ok());
        assert_eq!(
            format_err("x8193"),
            FormatError::PaddingTooLong { size: 8193, max: DEFAULT_MAX_PADDING }
        );
    }

    #[test]
    fn overflowing_size() {
        assert_eq!(
            format_err("s99999999999999999999999"),
            FormatError::NumberOverflow { code: 's', offset: 1 }
        );
    }

    #[test]
    fn fixed_string_limit() {
        let over = DEFAULT_MAX_FIXED + 1;
        assert_eq!(
            format_err(&format!("s{}", over)),
            FormatError::FixedTooLong { size: over, max: DEFAULT_MAX_FIXED }
        );
        assert!(parse(&format!("s{}", DEFAULT_MAX_FIXED)).is_ok());
        assert_eq!(one("s"), Directive::Fixed { size: None });
    }

    #[test]
    fn unknown_character_reports_offset() {
        assert_eq!(format_err("<hq"), FormatError::InvalidSpecifier { found: 'q', offset: 2 });
        assert_eq!(format_err("hé"), FormatError::InvalidSpecifier { found: 'é', offset: 1 });
    }

    #[test]
    fn scanner_stops_after_error() {
        let mut s = Scanner::new("bQb");
        assert!(matches!(s.next(), Some(Ok(Directive::Int { code: 'b', .. }))));
        assert!(matches!(s.next(), Some(Err(_))));
        assert!(s.next().is_none());
    }

    #[test]
    fn custom_limits() {
        let cfg = Config {
            max_padding: 8,
            max_fixed: 4,
            ..Config::default()
        };
        let mut s = Scanner::with_config("x16", &cfg);
        assert_eq!(s.next(), Some(Err(FormatError::PaddingTooLong { size: 16, max: 8 })));
        let mut s = Scanner::with_config("s4 s5", &cfg);
        assert_eq!(s.next(), Some(Ok(Directive::Fixed { size: Some(4) })));
        assert_eq!(s.next(), Some(Err(FormatError::FixedTooLong { size: 5, max: 4 })));
    }
}

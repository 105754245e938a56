//! Format string tests: grammar, defaults, errors, static size, and text-driven packing.

use binpacker::dump::{format_value, hex_string, values_from_text};
use binpacker::{
    fixed_size, pack, parse, unpack, unpack_records, CodecError, Directive, Endianness,
    FormatError, Scanner, Value,
};

// ==================== Syntax: valid formats ====================

#[test]
fn parse_empty_format() {
    assert!(parse("").expect("empty format can parse").is_empty());
    assert!(parse("   ").expect("spaces only").is_empty());
}

#[test]
fn parse_every_code() {
    let d = parse("<>=cbBhHlLiIfdzpsx").expect("parse");
    let codes: String = d.iter().map(Directive::code).collect();
    // '=' reports as the native order's character.
    let native = if Endianness::native() == Endianness::Little { '<' } else { '>' };
    assert_eq!(codes, format!("<>{}cbBhHlLiIfdzpsx", native));
}

#[test]
fn parse_sizes() {
    let d = parse("i1 I8 p1 p4 s32 x16,255").expect("parse");
    assert_eq!(
        d,
        vec![
            Directive::Int { code: 'i', signed: true, size: 1 },
            Directive::Int { code: 'I', signed: false, size: 8 },
            Directive::LengthPrefixed { size: 1 },
            Directive::LengthPrefixed { size: 4 },
            Directive::Fixed { size: Some(32) },
            Directive::Padding { size: 16, fill: 255 },
        ]
    );
}

#[test]
fn zero_sizes_are_valid() {
    let d = parse("i0 I0 p0 s0 x0").expect("parse");
    assert_eq!(d.len(), 5);
    assert!(d.iter().all(|d| d.fixed_size().unwrap_or(0) == 0));
}

#[test]
fn value_producing_directives() {
    let d = parse("<cBzx2s").expect("parse");
    let producing: Vec<char> = d
        .iter()
        .filter(|d| d.produces_value())
        .map(Directive::code)
        .collect();
    assert_eq!(producing, vec!['c', 'B', 'z', 's']);
}

// ==================== Syntax: invalid formats ====================

fn first_error(fmt: &str) -> FormatError {
    match parse(fmt) {
        Err(CodecError::Format(e)) => e,
        other => panic!("{:?}: expected format error, got {:?}", fmt, other),
    }
}

#[test]
fn reject_unknown_codes() {
    for (fmt, found, offset) in [
        ("q", 'q', 0),
        ("B!", '!', 1),
        ("X", 'X', 0),
        ("\t", '\t', 0),
        ("b-1", '-', 1),
    ] {
        assert_eq!(first_error(fmt), FormatError::InvalidSpecifier { found, offset }, "{:?}", fmt);
    }
}

#[test]
fn reject_space_between_code_and_size() {
    // "s 4" is a read-to-end 's', a space, then a stray '4'.
    assert_eq!(first_error("s 4"), FormatError::InvalidSpecifier { found: '4', offset: 2 });
}

#[test]
fn reject_alignment_directives() {
    assert_eq!(first_error("!4"), FormatError::InvalidSpecifier { found: '!', offset: 0 });
    assert_eq!(first_error("BX4"), FormatError::InvalidSpecifier { found: 'X', offset: 1 });
}

#[test]
fn scanner_is_lazy() {
    let mut s = Scanner::new("B q");
    assert_eq!(s.next(), Some(Ok(Directive::Int { code: 'B', signed: false, size: 1 })));
    assert_eq!(s.offset(), 1);
    assert!(matches!(s.next(), Some(Err(FormatError::InvalidSpecifier { found: 'q', offset: 2 }))));
}

#[test]
fn error_display_names_character_and_value() {
    let err = pack("<Hw", &[Value::U16(1)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Format: invalid format specifier 'w' (0x77) at offset 2"
    );
}

// ==================== Static size ====================

#[test]
fn fixed_size_matches_packed_length() {
    let fmt = "<b h I3 d s4 x2,1 c";
    let values = vec![
        Value::I8(1),
        Value::I16(2),
        Value::U32(3),
        Value::Double(4.0),
        Value::from("four"),
        Value::from("c"),
    ];
    let bytes = pack(fmt, &values).expect("pack");
    assert_eq!(fixed_size(fmt).unwrap(), Some(bytes.len()));
}

#[test]
fn fixed_size_variable_and_errors() {
    assert_eq!(fixed_size("B z").unwrap(), None);
    assert!(matches!(fixed_size("I9"), Err(CodecError::Format(FormatError::TooWide { .. }))));
}

// ==================== Text values and records ====================

#[test]
fn pack_from_text_arguments() {
    let fmt = ">H i2 z f";
    let values = values_from_text(fmt, &["0x0102", "-2", "ok", "0.5"]).expect("values");
    let bytes = pack(fmt, &values).expect("pack");
    assert_eq!(hex_string(&bytes), "01 02 ff fe 6f 6b 00 3f 00 00 00");
    let (_, out) = unpack(fmt, &bytes, None).expect("unpack");
    let shown: Vec<String> = out.iter().map(format_value).collect();
    assert_eq!(shown, vec!["258", "-2", "\"ok\"", "0.5"]);
}

#[test]
fn records_over_packed_buffer() {
    let mut data = Vec::new();
    for (id, name) in [(1u8, "one"), (2, "two"), (3, "three")] {
        data.extend(pack("B p1", &[Value::U8(id), Value::from(name)]).expect("pack"));
    }
    let recs = unpack_records("B p1", &data).expect("records");
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[2].values, vec![Value::U8(3), Value::from("three")]);
    assert_eq!(recs[2].byte_range, (10, data.len()));
}

//! Repeated records: unpack the same format back to back until the buffer is exhausted.
//!
//! Each pass resumes at the next position returned by the previous one. A pass that
//! consumes nothing ends the scan (e.g. a format made only of control characters).

use crate::codec::{CodecError, Config};
use crate::unpack::unpack_with;
use crate::value::Value;

/// One decoded record and where it lay in the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub values: Vec<Value>,
    /// Zero-based, half-open.
    pub byte_range: (usize, usize),
}

pub fn unpack_records(format: &str, data: &[u8]) -> Result<Vec<Record>, CodecError> {
    unpack_records_with(&Config::default(), format, data)
}

pub fn unpack_records_with(
    config: &Config,
    format: &str,
    data: &[u8],
) -> Result<Vec<Record>, CodecError> {
    let mut records = Vec::new();
    let mut offset = 0;
    while offset < data.len() {
        let (next, values) = unpack_with(config, format, data, Some(offset + 1))?;
        let end = next - 1;
        if end == offset {
            break;
        }
        records.push(Record {
            values,
            byte_range: (offset, end),
        });
        offset = end;
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_fixed_records() {
        let data = [1, 0, 2, 0, 3, 0];
        let recs = unpack_records("<H", &data).expect("records");
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[2].values, vec![Value::U16(3)]);
        assert_eq!(recs[1].byte_range, (2, 4));
    }

    #[test]
    fn variable_length_records() {
        let recs = unpack_records("Bz", b"\x01ab\0\x02\0").expect("records");
        assert_eq!(
            recs,
            vec![
                Record {
                    values: vec![Value::U8(1), Value::from("ab")],
                    byte_range: (0, 4),
                },
                Record {
                    values: vec![Value::U8(2), Value::from("")],
                    byte_range: (4, 6),
                },
            ]
        );
    }

    #[test]
    fn trailing_partial_record_is_truncated() {
        // Last record has its byte but the data ends before the 'z'.
        let recs = unpack_records("Bz", b"\x01a\0\x02").expect("records");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].values, vec![Value::U8(2)]);
    }

    #[test]
    fn control_only_format_stops() {
        assert!(unpack_records("<>", b"abc").expect("records").is_empty());
    }

    #[test]
    fn errors_propagate() {
        assert!(matches!(
            unpack_records("I4", &[0, 0, 0, 0, 1]),
            Err(CodecError::OutOfData { code: 'I', ordinal: 1 })
        ));
    }
}

//! Benchmark: pack and unpack a mixed record (numerics of every width, each string form,
//! padding), plus a records scan over a buffer of many such records.

use binpacker::{pack, unpack, unpack_records, Value};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const RECORD: &str = "<B h I3 >i8 f d x2,255 z p1 s8";

fn record_values(id: u8) -> Vec<Value> {
    vec![
        Value::U8(id),
        Value::I16(-1200),
        Value::U32(0x00AB_CDEF),
        Value::I64(-42),
        Value::Float(1.5),
        Value::Double(2.25),
        Value::from("sensor"),
        Value::from("payload bytes"),
        Value::from("fixed"),
    ]
}

fn bench_pack(c: &mut Criterion) {
    let values = record_values(7);
    c.bench_function("pack record", |b| {
        b.iter(|| pack(black_box(RECORD), black_box(&values)).expect("pack"))
    });
}

fn bench_unpack(c: &mut Criterion) {
    let bytes = pack(RECORD, &record_values(7)).expect("pack");
    c.bench_function("unpack record", |b| {
        b.iter(|| unpack(black_box(RECORD), black_box(&bytes), None).expect("unpack"))
    });
}

fn bench_records(c: &mut Criterion) {
    let mut buf = Vec::new();
    for id in 0..=255u8 {
        buf.extend(pack(RECORD, &record_values(id)).expect("pack"));
    }
    c.bench_function("unpack_records x256", |b| {
        b.iter(|| unpack_records(black_box(RECORD), black_box(&buf)).expect("records"))
    });
}

criterion_group!(benches, bench_pack, bench_unpack, bench_records);
criterion_main!(benches);

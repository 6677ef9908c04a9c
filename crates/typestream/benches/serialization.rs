// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serialization Throughput Benchmark
//!
//! Measures encode/decode cost for:
//! - Fixed-width scalars through a memory-backed stream
//! - Length-prefixed strings (narrow vs UTF-8)
//! - Tag-framed object writes (exact-type strings)

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box as bb;
use typestream::Serializer;

fn bench_scalar_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_writes");

    for count in [64usize, 1024, 16384] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut writer = Serializer::in_memory();
                for i in 0..count {
                    writer.write_i64(bb(i as i64)).expect("write");
                    writer.write_f64(bb(i as f64 * 0.5)).expect("write");
                }
                bb(writer.into_bytes().expect("into_bytes"))
            });
        });
    }
    group.finish();
}

fn bench_string_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_round_trip");
    let text = "the quick brown fox jumps over the lazy dog".repeat(8);

    group.bench_function("utf8", |b| {
        b.iter(|| {
            let mut writer = Serializer::in_memory();
            writer.write_string(Some(bb(text.as_str()))).expect("write");
            let mut reader = Serializer::from_bytes(writer.into_bytes().expect("into_bytes"));
            bb(reader.read_string().expect("read"))
        });
    });

    group.bench_function("narrow", |b| {
        b.iter(|| {
            let mut writer = Serializer::in_memory();
            writer.write_string8(Some(bb(text.as_str()))).expect("write");
            let mut reader = Serializer::from_bytes(writer.into_bytes().expect("into_bytes"));
            bb(reader.read_string8().expect("read"))
        });
    });
    group.finish();
}

fn bench_object_round_trip(c: &mut Criterion) {
    let text = String::from("tagged payload for the object protocol");

    c.bench_function("object_round_trip_string", |b| {
        b.iter(|| {
            let mut writer = Serializer::in_memory();
            writer.write_object_of(Some(bb(&text))).expect("write");
            let mut reader = Serializer::from_bytes(writer.into_bytes().expect("into_bytes"));
            bb(reader.read_object("String").expect("read"))
        });
    });
}

criterion_group!(
    benches,
    bench_scalar_writes,
    bench_string_round_trip,
    bench_object_round_trip
);
criterion_main!(benches);

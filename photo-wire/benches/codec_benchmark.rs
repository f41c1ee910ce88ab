// SPDX-License-Identifier: MIT
//! Benchmark for the room photo codec and envelope

use criterion::{criterion_group, criterion_main, Criterion};
use photo_wire::{compress, decompress, Envelope};
use std::hint::black_box;

fn create_test_document() -> Vec<u8> {
    // Roughly the size of a photo carrying a full plane budget
    let mut json = String::from(r#"{"planes":["#);
    for i in 0..289 {
        if i > 0 {
            json.push(',');
        }
        json.push_str(&format!(
            r#"{{"color":{},"z":-350,"cornerPoints":[{{"x":3,"y":3}},{{"x":0,"y":3}},{{"x":3,"y":0}},{{"x":0,"y":0}}],"texCols":[],"masks":[],"bottomAligned":false,"type":"pixel_art_plane"}}"#,
            i * 4099
        ));
    }
    json.push_str(r#"],"sprites":[],"modifiers":{},"filters":[],"roomid":1}"#);
    json.into_bytes()
}

fn benchmark_compress(c: &mut Criterion) {
    let document = create_test_document();

    c.bench_function("zlib_compress", |b| {
        b.iter(|| compress(black_box(&document)).unwrap())
    });
}

fn benchmark_decompress(c: &mut Criterion) {
    let compressed = compress(&create_test_document()).unwrap();

    c.bench_function("zlib_decompress", |b| {
        b.iter(|| decompress(black_box(&compressed)).unwrap())
    });
}

fn benchmark_envelope(c: &mut Criterion) {
    let compressed = compress(&create_test_document()).unwrap();
    let packet = photo_wire::frame(&compressed).unwrap();

    c.bench_function("envelope_parse_rebuild", |b| {
        b.iter(|| {
            let envelope = Envelope::parse(black_box(&packet), 0).unwrap();
            envelope.rebuild(envelope.payload()).unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_compress,
    benchmark_decompress,
    benchmark_envelope
);
criterion_main!(benches);

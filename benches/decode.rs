//! Benchmark: document decoding throughput
//!
//! Measures the full decode of a synthetic document with a few hundred
//! entities, and the embedded base64 path under both codec policies.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quickgltf::{CodecPolicy, Loader, Options};
use serde_json::json;

fn synthetic_document(entities: usize) -> Vec<u8> {
    let buffers: Vec<_> = (0..entities)
        .map(|i| json!({ "byteLength": 256, "uri": format!("chunk_{i}.bin") }))
        .collect();
    let views: Vec<_> = (0..entities)
        .map(|i| json!({ "buffer": i, "byteLength": 256, "byteOffset": 0 }))
        .collect();
    let accessors: Vec<_> = (0..entities)
        .map(|i| json!({ "componentType": 5126, "type": "VEC3", "count": 21, "bufferView": i }))
        .collect();
    let nodes: Vec<_> = (0..entities).map(|_| json!({ "mesh": 0 })).collect();

    serde_json::to_vec(&json!({
        "asset": { "version": "2.0" },
        "buffers": buffers,
        "bufferViews": views,
        "accessors": accessors,
        "meshes": [
            { "primitives": [ { "attributes": { "POSITION": 0, "NORMAL": 1 }, "indices": 2 } ] },
        ],
        "nodes": nodes,
        "scenes": [ { "nodes": [0] } ],
    }))
    .unwrap()
}

fn decode_benchmark(c: &mut Criterion) {
    let loader = Loader::new();
    let document = synthetic_document(256);

    c.bench_function("decode_256_entities", |b| {
        b.iter(|| {
            let mut gltf = loader
                .load_bytes(black_box(&document), ".", Options::default())
                .unwrap();
            gltf.parse_all().unwrap();
            black_box(gltf.into_asset().unwrap())
        })
    });
}

fn codec_benchmark(c: &mut Criterion) {
    let loader = Loader::new();
    let payload = "QUJD".repeat(256);
    let document = serde_json::to_vec(&json!({
        "asset": { "version": "2.0" },
        "buffers": [
            { "byteLength": 768, "uri": format!("data:application/octet-stream;base64,{payload}") },
        ],
    }))
    .unwrap();

    let mut group = c.benchmark_group("embedded_base64");
    for (name, policy) in [
        ("accelerated", CodecPolicy::Accelerated),
        ("scalar", CodecPolicy::Scalar),
    ] {
        let options = Options {
            codec_policy: policy,
            ..Options::default()
        };
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut gltf = loader
                    .load_bytes(black_box(&document), ".", options)
                    .unwrap();
                gltf.parse_buffers().unwrap();
                black_box(gltf.into_asset().unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, decode_benchmark, codec_benchmark);
criterion_main!(benches);

//! Throughput benchmarks for the streaming ZIP encoder.
//!
//! Compares `Stored` against `Deflate` across a few entry sizes, driving the
//! encoder to completion through a `tokio::runtime::Runtime` the same way a
//! real caller would pull it.

use archstream::{zip_entry, zip_stream, DeduplicationPolicy};
use archstream_domain::value_objects::CompressionMethod;
use archstream_domain::{BufferSource, ChunkSource};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

fn entry_payload(size_kb: usize) -> Vec<u8> {
    vec![b'x'; size_kb * 1024]
}

async fn drain(mut source: impl ChunkSource) -> usize {
    let mut total = 0;
    while let Some(chunk) = source.next_chunk().await.unwrap() {
        total += chunk.len();
    }
    total
}

fn bench_encode(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let mut group = c.benchmark_group("zip_stream_encode");

    for size_kb in [64, 512, 4096] {
        for method in [CompressionMethod::Stored, CompressionMethod::Deflate] {
            let id = BenchmarkId::new(format!("{method:?}"), size_kb);
            group.bench_with_input(id, &size_kb, |b, &size_kb| {
                b.iter(|| {
                    let entries = vec![zip_entry("payload.bin", BufferSource::new(entry_payload(size_kb)))];
                    let archive = zip_stream(entries, DeduplicationPolicy::default(), method);
                    black_box(runtime.block_on(drain(archive)))
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);

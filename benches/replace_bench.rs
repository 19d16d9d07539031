//! Benchmarks for replacers.
//!
//! Run with:
//!     cargo bench

use std::io::Read;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use replacers::{Ledger, Replacer, StreamConfig, StringRules, TransformReader, replace_all, transform_bytes};

fn bench_replacer(c: &mut Criterion) {
    let mut group = c.benchmark_group("replacer");

    for size in [64 * 1024, 1024 * 1024, 10 * 1024 * 1024] {
        // Deterministic text with a match roughly every 40 bytes
        let data: Vec<u8> = b"the quick brown fox jumps over the lazy dog "
            .iter()
            .copied()
            .cycle()
            .take(size)
            .collect();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(format!("text_{}kb", size / 1024), &data, |b, data| {
            b.iter(|| {
                let mut replacer = Replacer::from_text("fox", "cat");
                black_box(transform_bytes(&mut replacer, black_box(data)).len())
            });
        });

        // No matches at all (pure copy with memmem scanning)
        let zeros = vec![0u8; size];
        group.bench_with_input(format!("zeros_{}kb", size / 1024), &zeros, |b, data| {
            b.iter(|| {
                let mut replacer = Replacer::from_text("fox", "cat");
                black_box(transform_bytes(&mut replacer, black_box(data)).len())
            });
        });
    }

    group.finish();
}

fn bench_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunking");
    let size = 1024 * 1024; // 1 MB
    let data: Vec<u8> = b"abcabcabd".iter().copied().cycle().take(size).collect();
    group.throughput(Throughput::Bytes(size as u64));

    // Small buffers force many boundary carries
    for buffer in [16, 256, 4096, 64 * 1024] {
        let config = StreamConfig::new(buffer, buffer).unwrap();
        group.bench_function(format!("reader_{}b", buffer), |b| {
            b.iter(|| {
                let mut reader =
                    TransformReader::with_config(&data[..], Replacer::from_text("abd", "X"), config).unwrap();
                let mut out = Vec::with_capacity(size);
                reader.read_to_end(&mut out).unwrap();
                black_box(out.len())
            });
        });
    }

    group.bench_function("with_ledger", |b| {
        b.iter(|| {
            let mut replacer = Replacer::with_ledger(&b"abd"[..], &b"X"[..], Ledger::new());
            black_box(transform_bytes(&mut replacer, black_box(&data)).len())
        });
    });

    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    let size = 1024 * 1024;
    let data: Vec<u8> = b"Hello, World! ".iter().copied().cycle().take(size).collect();
    group.throughput(Throughput::Bytes(size as u64));

    for stages in [1, 4, 16] {
        let mut rules = StringRules::new();
        rules.add("Hello", "Hi").add("World", "Gophers");
        for i in 2..stages {
            rules.add(format!("rule{}", i), "-");
        }

        group.bench_function(format!("stages_{}", stages), |b| {
            b.iter(|| {
                let mut chain = replace_all(&rules);
                black_box(transform_bytes(&mut chain, black_box(&data)).len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_replacer, bench_chunking, bench_chain);
criterion_main!(benches);

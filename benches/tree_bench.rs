//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use arborist::{AvlTree, Frequencies, HuffmanTree, MoveSequence, SegmentTree};

fn benchmark_avl(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl");
    for n in [100u32, 1_000, 10_000] {
        let keys: Vec<String> = (1..=n).map(|i| format!("{i:->30}")).collect();

        group.bench_with_input(BenchmarkId::new("insert_remove", n), &keys, |b, keys| {
            b.iter(|| {
                let mut avl = AvlTree::new();
                for (value, key) in keys.iter().enumerate() {
                    let _ = avl.insert(key.as_str(), value as i64);
                }
                for key in keys.iter().rev() {
                    black_box(avl.remove(key));
                }
            });
        });
    }
    group.finish();
}

fn benchmark_huffman(c: &mut Criterion) {
    let text = "it was the best of times it was the worst of times".repeat(50);
    let frequencies = Frequencies::from_lowercase(&text);

    c.bench_function("huffman_build_and_encode", |b| {
        b.iter(|| {
            let tree = HuffmanTree::from_frequencies(black_box(&frequencies)).unwrap();
            black_box(tree.codes());
        });
    });
}

fn benchmark_segment(c: &mut Criterion) {
    let moves: Vec<f64> = (1..2_000)
        .map(|i| if i % 3 == 0 { -f64::from(i) * 0.9 } else { f64::from(i % 17) + 0.5 })
        .collect();
    let seq = MoveSequence::new(moves);
    let points = seq.coordinates();

    c.bench_function("segment_build", |b| {
        b.iter(|| black_box(SegmentTree::build(black_box(&points)).unwrap()));
    });
    c.bench_function("car_traversal", |b| {
        b.iter(|| black_box(seq.max_crossings().unwrap()));
    });
}

criterion_group!(benches, benchmark_avl, benchmark_huffman, benchmark_segment);
criterion_main!(benches);

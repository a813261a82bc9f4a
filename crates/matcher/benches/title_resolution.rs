//! Benchmarks for fuzzy title resolution
//!
//! Run with: cargo bench --package matcher
//!
//! Uses a synthetic catalog so the benchmark runs without artifacts.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matcher::{scorer, FuzzyResolver};

const WORDS: [&str; 12] = [
    "dark", "knight", "return", "space", "love", "story", "night", "city",
    "last", "kingdom", "shadow", "river",
];

fn synthetic_titles(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "The {} {} {}",
                WORDS[i % WORDS.len()],
                WORDS[(i / WORDS.len()) % WORDS.len()],
                i
            )
        })
        .collect()
}

fn bench_resolve_typo(c: &mut Criterion) {
    let titles = synthetic_titles(5000);
    let resolver = FuzzyResolver::new();

    c.bench_function("resolve_typo_5000_titles", |b| {
        b.iter(|| {
            let found = resolver.resolve(
                black_box("the drak knigth 1234"),
                titles.iter().map(String::as_str),
            );
            black_box(found)
        })
    });
}

fn bench_weighted_ratio(c: &mut Criterion) {
    c.bench_function("weighted_ratio_partial", |b| {
        b.iter(|| {
            black_box(scorer::score(
                black_box("matrix"),
                black_box("The Matrix Reloaded"),
            ))
        })
    });
}

criterion_group!(benches, bench_resolve_typo, bench_weighted_ratio);
criterion_main!(benches);

//! Benchmarks for similarity ranking
//!
//! Run with: cargo bench --package ranker
//!
//! Builds a dense synthetic catalog so no artifacts are needed.

use catalog::{Catalog, CatalogItem, CatalogKind, SimilarityMatrix};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ranker::{SimilarityRanker, LIST_LIMIT};

fn synthetic_catalog(size: usize) -> Catalog {
    let items = (0..size)
        .map(|i| CatalogItem {
            id: i as u32,
            // Every tenth title repeats so deduplication has work to do
            title: format!("Title {}", i % (size - size / 10)),
            poster_path: None,
            premiere_date: None,
        })
        .collect();

    let rows = (0..size)
        .map(|i| {
            (0..size)
                .map(|j| if i == j { 1.0 } else { ((i * 31 + j * 17) % 997) as f32 / 997.0 })
                .collect()
        })
        .collect();

    Catalog::new(
        CatalogKind::Movie,
        items,
        SimilarityMatrix::from_rows(rows).expect("synthetic matrix is square"),
    )
    .expect("synthetic catalog is aligned")
}

fn bench_rank_list(c: &mut Criterion) {
    let catalog = synthetic_catalog(2000);
    let ranker = SimilarityRanker::new();
    let seed_title = catalog.items()[42].title.clone();

    c.bench_function("rank_2000_items_limit_30", |b| {
        b.iter(|| {
            let ranked = ranker
                .rank(&catalog, black_box(42), &seed_title, black_box(LIST_LIMIT))
                .unwrap();
            black_box(ranked.len())
        })
    });
}

criterion_group!(benches, bench_rank_list);
criterion_main!(benches);

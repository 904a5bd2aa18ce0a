use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use index::PrefixIndex;

fn catalog(size: usize) -> Vec<(String, String)> {
    (0..size)
        .map(|i| (format!("title number {i}"), i.to_string()))
        .collect()
}

fn bench_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidates");

    for size in [1_000usize, 10_000, 100_000] {
        let titles = catalog(size);
        let index = PrefixIndex::from_titles(titles.iter().map(|(t, id)| (t.as_str(), id.clone())));
        let query = format!("title number {} (film)", size / 2);

        group.bench_with_input(BenchmarkId::new("trie", size), &query, |b, q| {
            b.iter(|| index.candidates(black_box(q)).len())
        });
        group.bench_with_input(BenchmarkId::new("linear_scan", size), &query, |b, q| {
            b.iter(|| {
                titles
                    .iter()
                    .filter(|(title, _)| black_box(q).starts_with(title.as_str()))
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_candidates);
criterion_main!(benches);

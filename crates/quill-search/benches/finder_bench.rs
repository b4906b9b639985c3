use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quill_search::{find, Pattern};

fn generate_text(size: usize) -> String {
    let words = [
        "the ", "quick ", "brown ", "fox ", "jumps ", "over ", "lazy ", "dog ",
        "article ", "comment ", "author ", "body ", "title ", "search ",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.push_str(words[i % words.len()]);
        i += 1;
    }
    text.truncate(size);
    text
}

fn bench_occurrences(c: &mut Criterion) {
    let text = generate_text(100_000);
    let mut group = c.benchmark_group("occurrences");

    for pattern in ["fox", "the quick", "aaaa"] {
        let compiled = Pattern::new(pattern).unwrap();
        group.bench_with_input(BenchmarkId::new("pattern", pattern), &compiled, |b, p| {
            b.iter(|| p.occurrences(black_box(&text)).count())
        });
    }
    group.finish();
}

fn bench_periodic_body(c: &mut Criterion) {
    let text = "a".repeat(100_000);
    let pattern = Pattern::new("aaaaaaaa").unwrap();

    c.bench_function("periodic_overlap", |b| {
        b.iter(|| pattern.occurrences(black_box(&text)).count())
    });
}

fn bench_corpus(c: &mut Criterion) {
    let mut group = c.benchmark_group("corpus");

    for articles in [10, 100, 1_000] {
        let corpus: Vec<(i64, String)> = (0..articles)
            .map(|i| (i as i64, generate_text(2_000)))
            .collect();
        group.bench_with_input(BenchmarkId::new("articles", articles), &corpus, |b, corpus| {
            b.iter(|| find(black_box("lazy dog"), corpus.iter().map(|(id, s)| (*id, s.as_str()))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_occurrences, bench_periodic_body, bench_corpus);
criterion_main!(benches);

//! Benchmarks for cached vs. uncached formula evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use exprcalc::{EngineOptions, ExprParser};
use std::collections::HashMap;

/// Builds a formula summing `terms` products of two variables.
fn formula(terms: usize) -> String {
    (0..terms)
        .map(|i| format!("(a{i}*b{i}-{i})"))
        .collect::<Vec<_>>()
        .join("+")
}

fn bindings(terms: usize) -> HashMap<String, f64> {
    (0..terms)
        .flat_map(|i| [(format!("a{i}"), i as f64), (format!("b{i}"), 2.0)])
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for terms in [1, 8, 64] {
        let expr = formula(terms);
        let vars = bindings(terms);

        let cached = ExprParser::new();
        group.bench_with_input(BenchmarkId::new("cached", terms), &expr, |b, expr| {
            b.iter(|| cached.evaluate(black_box(expr), &vars).unwrap())
        });

        let uncached = ExprParser::with_options(EngineOptions {
            use_cache: false,
            ..Default::default()
        });
        group.bench_with_input(BenchmarkId::new("uncached", terms), &expr, |b, expr| {
            b.iter(|| uncached.evaluate(black_box(expr), &vars).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);

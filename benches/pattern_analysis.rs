//! Criterion benchmarks for ledger bookkeeping, pattern analysis and the
//! prediction rule table.
//!
//! Run with:
//! ```bash
//! cargo bench
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use samsara::domain::models::{Category, KarmaRegistry, KarmicEntry};
use samsara::services::{KarmicLedger, KarmicPredictor, PatternAnalyzer};
use uuid::Uuid;

fn synthetic_entries(n: usize) -> Vec<KarmicEntry> {
    let start = Utc::now();
    let categories = [
        Category::Compassion,
        Category::Violence,
        Category::Greed,
        Category::Wisdom,
        Category::Healing,
    ];
    (0..n)
        .map(|i| KarmicEntry {
            id: Uuid::new_v4(),
            action_id: "BENCH".to_string(),
            karma_value: if i % 3 == 0 { -20.0 } else { 15.0 },
            category: categories[i % categories.len()],
            description: String::new(),
            context: HashMap::new(),
            timestamp: start + Duration::seconds(i as i64),
            life_id: Uuid::nil(),
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzer/analyze");
    let analyzer = PatternAnalyzer::new();

    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("entries", n), &n, |b, &n| {
            let entries = synthetic_entries(n);
            b.iter(|| analyzer.analyze(&entries));
        });
    }

    group.finish();
}

fn bench_prediction_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("predictor/rules");
    let predictor = KarmicPredictor::with_seed(99);

    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("entries", n), &n, |b, &n| {
            let entries = synthetic_entries(n);
            b.iter(|| predictor.predictions(&entries));
        });
    }

    group.finish();
}

fn bench_record_action(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger/record");
    let registry = Arc::new(KarmaRegistry::builtin());

    for &n in &[10usize, 100, 500] {
        group.bench_with_input(BenchmarkId::new("actions", n), &n, |b, &n| {
            b.iter_batched(
                || KarmicLedger::new(Arc::clone(&registry)),
                |mut ledger| {
                    for i in 0..n {
                        let action = if i % 2 == 0 { "DONATE" } else { "STEAL" };
                        ledger.record_action(action, HashMap::new()).unwrap();
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let registry = Arc::new(KarmaRegistry::builtin());
    let mut ledger = KarmicLedger::new(registry);
    for i in 0..200 {
        let action = if i % 2 == 0 { "HEAL" } else { "LIE" };
        ledger.record_action(action, HashMap::new()).unwrap();
    }

    c.bench_function("ledger/stats", |b| b.iter(|| ledger.stats()));
}

criterion_group!(
    benches,
    bench_analyze,
    bench_prediction_rules,
    bench_record_action,
    bench_stats,
);
criterion_main!(benches);

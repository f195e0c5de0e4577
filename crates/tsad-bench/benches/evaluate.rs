// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tsad_bench::{burst_labels, jittered_prediction};
use tsad_core::Label;
use tsad_eval::{evaluate, evaluate_batch, EvaluationConfig};

fn benchmark_evaluate(c: &mut Criterion) {
    let config = EvaluationConfig::default();
    let y_true = burst_labels(100_000, 150, 32, 42);
    let y_pred = jittered_prediction(&y_true, 3, 256, 43);

    c.bench_function("evaluate_n1e5", |b| {
        b.iter(|| {
            evaluate(black_box(&y_true), black_box(&y_pred), &config)
                .expect("evaluation should succeed")
        })
    });

    let pairs: Vec<(Vec<Label>, Vec<Label>)> = (0..32u64)
        .map(|seed| {
            let truth = burst_labels(20_000, 120, 24, seed);
            let predicted = jittered_prediction(&truth, 2, 64, seed ^ 0xabcd);
            (truth, predicted)
        })
        .collect();

    c.bench_function("evaluate_batch_32x2e4", |b| {
        b.iter(|| evaluate_batch(black_box(&pairs), &config))
    });
}

criterion_group!(benches, benchmark_evaluate);
criterion_main!(benches);

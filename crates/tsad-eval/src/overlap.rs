// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use tsad_core::{positional_bias, positional_bias_sum, AnomalyRange, BiasType};

/// Bias-weighted fraction of `real` covered by `overlap_set`.
///
/// Position `i` in `1..=anomaly_length` maps to absolute index
/// `real.start + i - 1`. Weights are summed as integers before the single
/// division, so full coverage is exactly `1.0` for every bias shape.
pub fn overlap_size(
    real: &AnomalyRange,
    overlap_set: &BTreeSet<usize>,
    anomaly_length: usize,
    bias: BiasType,
) -> f64 {
    if anomaly_length == 0 {
        return 0.0;
    }

    let last = real.start.saturating_add(anomaly_length - 1);
    let covered = overlap_set
        .range(real.start..=last)
        .map(|&index| u128::from(positional_bias(index - real.start + 1, anomaly_length, bias)))
        .sum::<u128>();
    weighted_fraction(covered, anomaly_length, bias)
}

fn weighted_fraction(covered: u128, anomaly_length: usize, bias: BiasType) -> f64 {
    let total = positional_bias_sum(1, anomaly_length, anomaly_length, bias);
    covered as f64 / total as f64
}

/// `1.0` when any predicted range shares an index with `real`, else `0.0`.
pub fn existence_reward(real: &AnomalyRange, predicted: &[AnomalyRange]) -> f64 {
    if predicted.iter().any(|candidate| candidate.intersects(real)) {
        1.0
    } else {
        0.0
    }
}

/// Fragmentation penalty: `1/k` when `k > 1` predicted ranges hit `real`.
pub fn cardinality_factor(real: &AnomalyRange, predicted: &[AnomalyRange]) -> f64 {
    let hits = predicted
        .iter()
        .filter(|candidate| candidate.intersects(real))
        .count();
    if hits <= 1 {
        1.0
    } else {
        1.0 / hits as f64
    }
}

/// Parts of `real` covered by `predicted`, sorted and merged so that no two
/// spans overlap or touch.
pub fn covered_spans(real: &AnomalyRange, predicted: &[AnomalyRange]) -> Vec<AnomalyRange> {
    let mut shared: Vec<AnomalyRange> = predicted
        .iter()
        .filter_map(|candidate| real.intersection(candidate))
        .filter(|span| !span.is_empty())
        .collect();
    shared.sort_unstable();

    let mut merged: Vec<AnomalyRange> = Vec::with_capacity(shared.len());
    for span in shared {
        match merged.last_mut() {
            Some(previous) if span.start <= previous.end.saturating_add(1) => {
                previous.end = previous.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Bias-weighted coverage of `real` by `predicted`, scaled by the
/// cardinality factor. Zero when nothing intersects.
pub fn overlap_reward(real: &AnomalyRange, predicted: &[AnomalyRange], bias: BiasType) -> f64 {
    let spans = covered_spans(real, predicted);
    let anomaly_length = real.len();
    if spans.is_empty() || anomaly_length == 0 {
        return 0.0;
    }

    let covered = spans
        .iter()
        .map(|span| {
            positional_bias_sum(
                span.start - real.start + 1,
                span.end - real.start + 1,
                anomaly_length,
                bias,
            )
        })
        .sum::<u128>();
    weighted_fraction(covered, anomaly_length, bias) * cardinality_factor(real, predicted)
}

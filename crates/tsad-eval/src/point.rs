// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::soft::harmonic_mean;
use tsad_core::{validate_same_len, Label, TsadError};

/// Strict sample-by-sample confusion counts over scored positions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointMetrics {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_negatives: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Point-wise precision/recall/F1 with zero tolerance.
///
/// Positions where either side is `Unscored` are skipped. Empty
/// denominators yield `0.0`.
pub fn point_metrics(y_true: &[Label], y_pred: &[Label]) -> Result<PointMetrics, TsadError> {
    validate_same_len(y_true, y_pred)?;

    let mut metrics = PointMetrics::default();
    for (truth, pred) in y_true.iter().zip(y_pred) {
        match (truth, pred) {
            (Label::Unscored, _) | (_, Label::Unscored) => {}
            (Label::Positive, Label::Positive) => metrics.true_positives += 1,
            (Label::Negative, Label::Positive) => metrics.false_positives += 1,
            (Label::Positive, Label::Negative) => metrics.false_negatives += 1,
            (Label::Negative, Label::Negative) => metrics.true_negatives += 1,
        }
    }

    metrics.precision = rate(
        metrics.true_positives,
        metrics.true_positives + metrics.false_positives,
    );
    metrics.recall = rate(
        metrics.true_positives,
        metrics.true_positives + metrics.false_negatives,
    );
    metrics.f1 = harmonic_mean(metrics.precision, metrics.recall);
    Ok(metrics)
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

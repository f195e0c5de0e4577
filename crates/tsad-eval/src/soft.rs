// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use tsad_core::{validate_same_len, Label, TsadError};

/// Score plus the match breakdown behind it.
///
/// `unmatched` holds false alarms for precision and missed anomalies for
/// recall. Redundant detections (extra alarms next to an already matched
/// anomaly) are not part of either score.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoftScore {
    pub score: f64,
    pub exact_matches: usize,
    pub near_matches: usize,
    pub unmatched: usize,
}

impl SoftScore {
    fn from_counts(exact_matches: usize, near_matches: usize, unmatched: usize) -> Self {
        let matched = exact_matches + near_matches;
        let denominator = matched + unmatched;
        let score = if denominator == 0 {
            1.0
        } else {
            matched as f64 / denominator as f64
        };
        Self {
            score,
            exact_matches,
            near_matches,
            unmatched,
        }
    }

    pub fn as_tuple(&self) -> (f64, usize, usize, usize) {
        (
            self.score,
            self.exact_matches,
            self.near_matches,
            self.unmatched,
        )
    }
}

/// One-to-one tolerance matching between true and predicted positives.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SoftMatching {
    pub exact_matches: usize,
    pub near_matches: usize,
    pub false_alarms: usize,
    pub redundant_detections: usize,
    pub missed: usize,
}

impl SoftMatching {
    pub fn precision(&self) -> SoftScore {
        SoftScore::from_counts(self.exact_matches, self.near_matches, self.false_alarms)
    }

    pub fn recall(&self) -> SoftScore {
        SoftScore::from_counts(self.exact_matches, self.near_matches, self.missed)
    }

    pub fn f1(&self) -> f64 {
        harmonic_mean(self.precision().score, self.recall().score)
    }
}

/// Matches predicted positives to true positives within `detection_range`.
///
/// Predictions are visited in increasing index order; each takes the
/// nearest still-unmatched true positive within tolerance, ties going to
/// the earlier index. A zero-distance pairing is an exact match. Samples
/// marked `Unscored` on either side never take part.
pub fn soft_match(
    y_true: &[Label],
    y_pred: &[Label],
    detection_range: usize,
) -> Result<SoftMatching, TsadError> {
    validate_same_len(y_true, y_pred)?;
    let truth = scored_positives(y_true, y_pred);
    let predicted = scored_positives(y_pred, y_true);

    let mut open: BTreeSet<usize> = truth.iter().copied().collect();
    let mut exact_matches = 0usize;
    let mut near_matches = 0usize;
    let mut false_alarms = 0usize;
    let mut redundant_detections = 0usize;
    for pred in predicted {
        match nearest_open(&open, pred, detection_range) {
            Some(matched) => {
                open.remove(&matched);
                if matched == pred {
                    exact_matches += 1;
                } else {
                    near_matches += 1;
                }
            }
            None if nearest_distance(pred, &truth) <= detection_range => {
                redundant_detections += 1;
            }
            None => false_alarms += 1,
        }
    }

    Ok(SoftMatching {
        exact_matches,
        near_matches,
        false_alarms,
        redundant_detections,
        missed: open.len(),
    })
}

/// Share of predicted positives justified by a true positive within
/// `detection_range`. Vacuously `1.0` when nothing counts.
pub fn soft_precision(
    y_true: &[Label],
    y_pred: &[Label],
    detection_range: usize,
) -> Result<SoftScore, TsadError> {
    Ok(soft_match(y_true, y_pred, detection_range)?.precision())
}

/// Share of true positives detected within `detection_range`. Vacuously
/// `1.0` when there are no true positives.
pub fn soft_recall(
    y_true: &[Label],
    y_pred: &[Label],
    detection_range: usize,
) -> Result<SoftScore, TsadError> {
    Ok(soft_match(y_true, y_pred, detection_range)?.recall())
}

/// Harmonic mean of [`soft_precision`] and [`soft_recall`].
pub fn soft_f1(
    y_true: &[Label],
    y_pred: &[Label],
    detection_range: usize,
) -> Result<f64, TsadError> {
    let precision = soft_precision(y_true, y_pred, detection_range)?.score;
    let recall = soft_recall(y_true, y_pred, detection_range)?.score;
    Ok(harmonic_mean(precision, recall))
}

pub(crate) fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

pub(crate) fn scored_positives(labels: &[Label], other: &[Label]) -> Vec<usize> {
    labels
        .iter()
        .zip(other)
        .enumerate()
        .filter_map(|(idx, (label, counterpart))| {
            (label.is_positive() && counterpart.is_scored()).then_some(idx)
        })
        .collect()
}

fn nearest_open(open: &BTreeSet<usize>, point: usize, tolerance: usize) -> Option<usize> {
    let below = open
        .range(point.saturating_sub(tolerance)..=point)
        .next_back()
        .copied();
    let above = open
        .range(point..=point.saturating_add(tolerance))
        .next()
        .copied();
    match (below, above) {
        (Some(low), Some(high)) if high - point < point - low => Some(high),
        (Some(low), _) => Some(low),
        (None, high) => high,
    }
}

pub(crate) fn nearest_distance(point: usize, sorted_points: &[usize]) -> usize {
    let insertion = sorted_points.partition_point(|&candidate| candidate < point);
    let mut best = usize::MAX;
    if insertion < sorted_points.len() {
        best = best.min(point.abs_diff(sorted_points[insertion]));
    }
    if insertion > 0 {
        best = best.min(point.abs_diff(sorted_points[insertion - 1]));
    }
    best
}

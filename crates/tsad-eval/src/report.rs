// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::EvaluationConfig;
use crate::delay::{ctt, ttc};
use crate::point::{point_metrics, PointMetrics};
use crate::range::{range_scores, RangeScores};
use crate::soft::{soft_match, SoftScore};
use tsad_core::{extract_anomaly_ranges, validate_same_len, AnomalyRange, Label, TsadError};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Pair of label sequences masked to the positions both sides score.
///
/// Indices are preserved: a position unscored on either side becomes
/// `Unscored` on both, so it breaks runs and never takes part in matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredWindow {
    y_true: Vec<Label>,
    y_pred: Vec<Label>,
    unscored: usize,
}

impl ScoredWindow {
    pub fn new(y_true: &[Label], y_pred: &[Label]) -> Result<Self, TsadError> {
        validate_same_len(y_true, y_pred)?;
        let mut unscored = 0usize;
        let (y_true, y_pred): (Vec<Label>, Vec<Label>) = y_true
            .iter()
            .zip(y_pred)
            .map(|(&truth, &pred)| {
                if truth.is_scored() && pred.is_scored() {
                    (truth, pred)
                } else {
                    unscored += 1;
                    (Label::Unscored, Label::Unscored)
                }
            })
            .unzip();
        Ok(Self {
            y_true,
            y_pred,
            unscored,
        })
    }

    pub fn y_true(&self) -> &[Label] {
        &self.y_true
    }

    pub fn y_pred(&self) -> &[Label] {
        &self.y_pred
    }

    pub fn n(&self) -> usize {
        self.y_true.len()
    }

    pub fn unscored(&self) -> usize {
        self.unscored
    }

    pub fn scored(&self) -> usize {
        self.y_true.len() - self.unscored
    }
}

/// Every metric of one evaluation run, plus the settings that produced it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationReport {
    pub n: usize,
    pub unscored: usize,
    pub true_ranges: Vec<AnomalyRange>,
    pub predicted_ranges: Vec<AnomalyRange>,
    pub point: PointMetrics,
    pub soft_precision: SoftScore,
    pub soft_recall: SoftScore,
    pub soft_f1: f64,
    pub redundant_detections: usize,
    pub range: RangeScores,
    pub ctt: f64,
    pub ttc: f64,
    pub config: EvaluationConfig,
}

/// Scores `y_pred` against `y_true` with every metric family.
///
/// Positions unscored on either side are masked on both before ranges are
/// extracted; range indices refer to the input sequences.
pub fn evaluate(
    y_true: &[Label],
    y_pred: &[Label],
    config: &EvaluationConfig,
) -> Result<EvaluationReport, TsadError> {
    config.validate()?;
    let window = ScoredWindow::new(y_true, y_pred)?;
    let (truth, pred) = (window.y_true(), window.y_pred());

    let true_ranges = extract_anomaly_ranges(truth);
    let predicted_ranges = extract_anomaly_ranges(pred);
    tracing::debug!(
        n = window.n(),
        unscored = window.unscored(),
        true_ranges = true_ranges.len(),
        predicted_ranges = predicted_ranges.len(),
        "scored window prepared"
    );

    let point = point_metrics(truth, pred)?;
    let matching = soft_match(truth, pred, config.detection_range)?;
    tracing::debug!(
        exact = matching.exact_matches,
        near = matching.near_matches,
        false_alarms = matching.false_alarms,
        redundant = matching.redundant_detections,
        missed = matching.missed,
        detection_range = config.detection_range,
        "soft matching done"
    );

    let range = range_scores(&true_ranges, &predicted_ranges, config.alpha, config.bias)?;
    let ctt = ctt(truth, pred, config.delay_sign)?;
    let ttc = ttc(truth, pred, config.delay_sign)?;

    Ok(EvaluationReport {
        n: window.n(),
        unscored: window.unscored(),
        true_ranges,
        predicted_ranges,
        point,
        soft_precision: matching.precision(),
        soft_recall: matching.recall(),
        soft_f1: matching.f1(),
        redundant_detections: matching.redundant_detections,
        range,
        ctt,
        ttc,
        config: *config,
    })
}

/// Evaluates independent `(y_true, y_pred)` pairs; results keep input order.
pub fn evaluate_batch<T, P>(
    pairs: &[(T, P)],
    config: &EvaluationConfig,
) -> Vec<Result<EvaluationReport, TsadError>>
where
    T: AsRef<[Label]> + Sync,
    P: AsRef<[Label]> + Sync,
{
    tracing::debug!(pairs = pairs.len(), "evaluating batch");

    #[cfg(feature = "rayon")]
    {
        pairs
            .par_iter()
            .map(|(y_true, y_pred)| evaluate(y_true.as_ref(), y_pred.as_ref(), config))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        pairs
            .iter()
            .map(|(y_true, y_pred)| evaluate(y_true.as_ref(), y_pred.as_ref(), config))
            .collect()
    }
}

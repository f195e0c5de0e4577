// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::overlap::{existence_reward, overlap_reward};
use crate::soft::harmonic_mean;
use tsad_core::{AnomalyRange, BiasType, TsadError};

/// Range-level recall, precision and F1 computed with one parameter set.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeScores {
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
}

/// Mean over real ranges of `alpha * existence + (1 - alpha) * overlap`.
///
/// Returns `0.0` when there are no real ranges.
pub fn recall_t(
    real: &[AnomalyRange],
    predicted: &[AnomalyRange],
    alpha: f64,
    bias: BiasType,
) -> Result<f64, TsadError> {
    validate_alpha(alpha)?;
    if real.is_empty() {
        return Ok(0.0);
    }

    let total = real
        .iter()
        .map(|range| {
            alpha * existence_reward(range, predicted)
                + (1.0 - alpha) * overlap_reward(range, predicted, bias)
        })
        .sum::<f64>();
    Ok(total / real.len() as f64)
}

/// Mean over predicted ranges of their bias-weighted overlap with `real`.
///
/// Returns `0.0` when either side is empty.
pub fn precision_t(real: &[AnomalyRange], predicted: &[AnomalyRange], bias: BiasType) -> f64 {
    if real.is_empty() || predicted.is_empty() {
        return 0.0;
    }

    let total = predicted
        .iter()
        .map(|range| overlap_reward(range, real, bias))
        .sum::<f64>();
    total / predicted.len() as f64
}

/// Harmonic mean of [`recall_t`] and [`precision_t`]; `0.0` when both are 0.
pub fn f1_t(
    real: &[AnomalyRange],
    predicted: &[AnomalyRange],
    alpha: f64,
    bias: BiasType,
) -> Result<f64, TsadError> {
    Ok(range_scores(real, predicted, alpha, bias)?.f1)
}

pub fn range_scores(
    real: &[AnomalyRange],
    predicted: &[AnomalyRange],
    alpha: f64,
    bias: BiasType,
) -> Result<RangeScores, TsadError> {
    let recall = recall_t(real, predicted, alpha, bias)?;
    let precision = precision_t(real, predicted, bias);
    Ok(RangeScores {
        recall,
        precision,
        f1: harmonic_mean(recall, precision),
    })
}

pub(crate) fn validate_alpha(alpha: f64) -> Result<(), TsadError> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(TsadError::invalid_input(format!(
            "alpha must be finite and within [0, 1]; got alpha={alpha}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{f1_t, precision_t, range_scores, recall_t};
    use tsad_core::{AnomalyRange, BiasType};

    fn rs(pairs: &[(usize, usize)]) -> Vec<AnomalyRange> {
        pairs.iter().copied().map(AnomalyRange::from).collect()
    }

    fn assert_approx_eq(actual: f64, expected: f64) {
        let delta = (actual - expected).abs();
        assert!(
            delta <= 1e-12,
            "expected {expected}, got {actual} (delta={delta})"
        );
    }

    fn recall(
        real: &[(usize, usize)],
        predicted: &[(usize, usize)],
        alpha: f64,
        bias: BiasType,
    ) -> f64 {
        recall_t(&rs(real), &rs(predicted), alpha, bias).expect("recall_t should compute")
    }

    #[test]
    fn recall_t_rewards_existence_and_overlap() {
        assert_approx_eq(recall(&[(10, 20)], &[(10, 20)], 0.5, BiasType::Flat), 1.0);

        let partial = recall(&[(10, 20)], &[(15, 25)], 0.5, BiasType::Flat);
        assert!(partial > 0.0 && partial < 1.0);
        assert_approx_eq(partial, 0.5 + 0.5 * 6.0 / 11.0);

        assert_approx_eq(recall(&[(10, 20)], &[(21, 30)], 0.5, BiasType::Flat), 0.0);

        let two = recall(&[(10, 20), (30, 40)], &[(15, 25), (35, 45)], 0.5, BiasType::Flat);
        assert!(two > 0.0 && two < 1.0);
    }

    #[test]
    fn recall_t_alpha_interpolates_between_existence_and_overlap() {
        assert_approx_eq(recall(&[(10, 20)], &[(21, 30)], 1.0, BiasType::Flat), 0.0);
        assert_approx_eq(recall(&[(10, 20)], &[(15, 25)], 1.0, BiasType::Flat), 1.0);

        let overlap_only = recall(&[(10, 20)], &[(15, 25)], 0.0, BiasType::Flat);
        assert!(overlap_only > 0.0 && overlap_only < 1.0);
    }

    #[test]
    fn recall_t_bias_shifts_credit_toward_covered_positions() {
        let front = recall(&[(10, 20)], &[(10, 15)], 0.5, BiasType::Front);
        assert!(front > recall(&[(10, 20)], &[(10, 15)], 0.5, BiasType::Flat));

        let back = recall(&[(10, 20)], &[(15, 20)], 0.5, BiasType::Back);
        assert!(back > recall(&[(10, 20)], &[(15, 20)], 0.5, BiasType::Flat));
    }

    #[test]
    fn recall_t_is_zero_without_real_ranges() {
        assert_eq!(recall(&[], &[(1, 4)], 0.5, BiasType::Flat), 0.0);
    }

    #[test]
    fn recall_t_rejects_alpha_outside_unit_interval() {
        for alpha in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = recall_t(&rs(&[(1, 2)]), &rs(&[(1, 2)]), alpha, BiasType::Flat)
                .expect_err("alpha outside [0, 1] should fail");
            assert!(err.to_string().contains("alpha must be finite"));
        }
    }

    #[test]
    fn precision_t_scores_each_prediction() {
        let real = rs(&[(10, 20), (30, 40), (50, 60)]);
        let predicted = rs(&[(15, 25), (35, 45), (55, 65)]);
        for bias in [BiasType::Front, BiasType::Back, BiasType::Middle] {
            assert!(precision_t(&real, &predicted, bias) > 0.0);
        }

        assert_eq!(precision_t(&real, &rs(&[(70, 80)]), BiasType::Flat), 0.0);
        assert!(precision_t(&real, &rs(&[(15, 25), (70, 80)]), BiasType::Flat) > 0.0);
        assert!(precision_t(&real, &rs(&[(10, 15), (32, 38), (52, 57)]), BiasType::Flat) > 0.0);
        assert_approx_eq(
            precision_t(&real, &rs(&[(10, 15), (32, 38), (52, 57)]), BiasType::Flat),
            1.0,
        );
    }

    #[test]
    fn precision_t_is_zero_when_either_side_is_empty() {
        let real = rs(&[(10, 20), (30, 40), (50, 60)]);
        assert_eq!(precision_t(&real, &[], BiasType::Flat), 0.0);
        assert_eq!(precision_t(&[], &real, BiasType::Flat), 0.0);
    }

    #[test]
    fn f1_t_is_harmonic_mean_of_recall_and_precision() {
        let real = rs(&[(10, 20), (30, 40), (50, 60)]);
        let scenarios = [
            rs(&[(15, 25), (35, 45), (55, 65)]),
            rs(&[(70, 80)]),
            rs(&[(15, 25), (70, 80)]),
            rs(&[(10, 15), (32, 38), (52, 57)]),
            Vec::new(),
        ];

        for predicted in &scenarios {
            for bias in BiasType::ALL {
                let recall_score = recall_t(&real, predicted, 0.5, bias).expect("recall");
                let precision_score = precision_t(&real, predicted, bias);
                let expected = if recall_score + precision_score != 0.0 {
                    2.0 * (recall_score * precision_score) / (recall_score + precision_score)
                } else {
                    0.0
                };
                assert_eq!(f1_t(&real, predicted, 0.5, bias).expect("f1"), expected);
            }
        }

        let empty_real = f1_t(&[], &scenarios[0], 0.5, BiasType::Flat).expect("f1");
        assert_eq!(empty_real, 0.0);
    }

    #[test]
    fn range_scores_bundle_all_three_metrics() {
        let scores = range_scores(&rs(&[(10, 20)]), &rs(&[(10, 20)]), 0.3, BiasType::Middle)
            .expect("scores should compute");
        assert_approx_eq(scores.recall, 1.0);
        assert_approx_eq(scores.precision, 1.0);
        assert_approx_eq(scores.f1, 1.0);
    }
}

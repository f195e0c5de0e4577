// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Timing offsets between alarms and true anomaly points.
//!
//! `ctt` looks from each alarm to its closest true anomaly, `ttc` from each
//! true anomaly to its closest alarm. An offset is always "counterpart index
//! minus own index", so a positive `ctt` means alarms fire before the
//! anomaly they are closest to, and a negative `ttc` means anomalies are
//! preceded by their closest alarm.

use crate::soft::scored_positives;
use tsad_core::{validate_same_len, Label, TsadError};

/// `ctt` when the ground truth holds no anomaly, with or without alarms.
pub const CTT_NO_TRUTH: f64 = f64::INFINITY;
/// `ctt` when anomalies exist but no alarm was raised.
pub const CTT_NO_TRIGGERS: f64 = 0.0;
/// `ttc` when no alarm was raised, with or without anomalies.
pub const TTC_NO_TRIGGERS: f64 = f64::INFINITY;
/// `ttc` when alarms exist but the ground truth holds no anomaly.
pub const TTC_NO_TRUTH: f64 = 0.0;

/// Whether offsets keep their direction or are averaged as magnitudes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DelaySign {
    #[default]
    Signed,
    Absolute,
}

/// Mean offset from every alarm to its closest true anomaly point.
pub fn ctt(y_true: &[Label], y_pred: &[Label], sign: DelaySign) -> Result<f64, TsadError> {
    validate_same_len(y_true, y_pred)?;
    let truth = scored_positives(y_true, y_pred);
    let triggers = scored_positives(y_pred, y_true);

    if truth.is_empty() {
        return Ok(CTT_NO_TRUTH);
    }
    if triggers.is_empty() {
        return Ok(CTT_NO_TRIGGERS);
    }
    Ok(mean_offset(&triggers, &truth, sign))
}

/// Mean offset from every true anomaly point to its closest alarm.
pub fn ttc(y_true: &[Label], y_pred: &[Label], sign: DelaySign) -> Result<f64, TsadError> {
    validate_same_len(y_true, y_pred)?;
    let truth = scored_positives(y_true, y_pred);
    let triggers = scored_positives(y_pred, y_true);

    if triggers.is_empty() {
        return Ok(TTC_NO_TRIGGERS);
    }
    if truth.is_empty() {
        return Ok(TTC_NO_TRUTH);
    }
    Ok(mean_offset(&truth, &triggers, sign))
}

fn mean_offset(origins: &[usize], targets: &[usize], sign: DelaySign) -> f64 {
    let total = origins
        .iter()
        .map(|&origin| {
            let offset = nearest_offset(origin, targets);
            match sign {
                DelaySign::Signed => offset,
                DelaySign::Absolute => offset.abs(),
            }
        })
        .sum::<i128>();
    total as f64 / origins.len() as f64
}

/// Signed offset to the closest element of a non-empty sorted slice; ties
/// resolve to the earlier element.
fn nearest_offset(point: usize, sorted_points: &[usize]) -> i128 {
    let insertion = sorted_points.partition_point(|&candidate| candidate < point);
    let nearest = match (
        insertion.checked_sub(1).map(|idx| sorted_points[idx]),
        sorted_points.get(insertion).copied(),
    ) {
        (Some(low), Some(high)) if high - point < point - low => high,
        (Some(low), _) => low,
        (None, Some(high)) => high,
        (None, None) => point,
    };
    nearest as i128 - point as i128
}

#[cfg(test)]
mod tests {
    use super::{ctt, ttc, DelaySign, CTT_NO_TRUTH, TTC_NO_TRIGGERS};
    use tsad_core::{labels_from_i64, Label};

    fn with_positives(n: usize, positives: &[usize]) -> Vec<Label> {
        let mut labels = vec![Label::Negative; n];
        for &idx in positives {
            labels[idx] = Label::Positive;
        }
        labels
    }

    #[test]
    fn ctt_matches_reference_offsets() {
        let y = with_positives(10, &[3, 7]);
        let cases: [(&[usize], f64); 6] = [
            (&[3, 7], 0.0),
            (&[3], 0.0),
            (&[3, 7, 8], -1.0 / 3.0),
            (&[3, 7, 9], -2.0 / 3.0),
            (&[0], 3.0),
            (&[4, 8], -1.0),
        ];
        for (positives, expected) in cases {
            let p = with_positives(10, positives);
            let value = ctt(&y, &p, DelaySign::Signed).expect("ctt should compute");
            assert_eq!(value, expected, "predicted={positives:?}");
        }
    }

    #[test]
    fn ttc_matches_reference_offsets() {
        let y = with_positives(10, &[3, 7]);
        let cases: [(&[usize], f64); 6] = [
            (&[3, 7], 0.0),
            (&[3], -2.0),
            (&[3, 7, 8], 0.0),
            (&[3, 7, 9], 0.0),
            (&[0], -5.0),
            (&[4, 8], 1.0),
        ];
        for (positives, expected) in cases {
            let p = with_positives(10, positives);
            let value = ttc(&y, &p, DelaySign::Signed).expect("ttc should compute");
            assert_eq!(value, expected, "predicted={positives:?}");
        }
    }

    #[test]
    fn empty_sides_follow_separate_conventions() {
        let no_truth = with_positives(10, &[]);
        let alarms = with_positives(10, &[4, 8]);
        let silent = with_positives(10, &[]);
        let single = with_positives(10, &[2]);

        assert_eq!(ctt(&no_truth, &alarms, DelaySign::Signed), Ok(f64::INFINITY));
        assert_eq!(ctt(&no_truth, &silent, DelaySign::Signed), Ok(CTT_NO_TRUTH));
        assert_eq!(ctt(&single, &silent, DelaySign::Signed), Ok(0.0));

        assert_eq!(ttc(&no_truth, &alarms, DelaySign::Signed), Ok(0.0));
        assert_eq!(ttc(&no_truth, &silent, DelaySign::Signed), Ok(TTC_NO_TRIGGERS));
        assert_eq!(ttc(&single, &silent, DelaySign::Signed), Ok(f64::INFINITY));
    }

    #[test]
    fn absolute_mode_averages_magnitudes() {
        let y = with_positives(10, &[3, 7]);
        let p = with_positives(10, &[2, 8]);
        assert_eq!(ctt(&y, &p, DelaySign::Signed), Ok(0.0));
        assert_eq!(ctt(&y, &p, DelaySign::Absolute), Ok(1.0));
        assert_eq!(ttc(&y, &p, DelaySign::Absolute), Ok(1.0));
    }

    #[test]
    fn equidistant_counterparts_resolve_to_the_earlier_index() {
        let y = with_positives(10, &[2, 6]);
        let p = with_positives(10, &[4]);
        assert_eq!(ctt(&y, &p, DelaySign::Signed), Ok(-2.0));
    }

    #[test]
    fn unscored_prefix_is_ignored() {
        let y = labels_from_i64(&[1, 1, 0, 1, 0]).expect("valid labels");
        let p = labels_from_i64(&[-1, -1, 0, 1, 0]).expect("valid labels");
        assert_eq!(ctt(&y, &p, DelaySign::Signed), Ok(0.0));
        assert_eq!(ttc(&y, &p, DelaySign::Signed), Ok(0.0));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = ttc(&[Label::Positive; 2], &[Label::Positive; 3], DelaySign::Signed)
            .expect_err("length mismatch should fail");
        assert!(err.to_string().contains("must share n"));
    }
}

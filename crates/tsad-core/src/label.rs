// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::TsadError;

/// Per-sample label of a ground-truth or predicted sequence.
///
/// Numerically `0`, `1` and `-1`. `Unscored` marks samples a predictor did
/// not evaluate (typically its warm-up window); they are never positives.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "i8")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Label {
    #[default]
    Negative,
    Positive,
    Unscored,
}

impl Label {
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }

    pub fn is_scored(self) -> bool {
        !matches!(self, Self::Unscored)
    }

    /// Builds a scored label from a boolean flag.
    pub fn from_flag(positive: bool) -> Self {
        if positive {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl From<Label> for i8 {
    fn from(label: Label) -> Self {
        match label {
            Label::Negative => 0,
            Label::Positive => 1,
            Label::Unscored => -1,
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = TsadError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Negative),
            1 => Ok(Self::Positive),
            -1 => Ok(Self::Unscored),
            other => Err(TsadError::invalid_input(format!(
                "labels must be 0, 1 or -1; got {other}"
            ))),
        }
    }
}

impl TryFrom<f64> for Label {
    type Error = TsadError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Self::Negative)
        } else if value == 1.0 {
            Ok(Self::Positive)
        } else if value == -1.0 {
            Ok(Self::Unscored)
        } else {
            Err(TsadError::invalid_input(format!(
                "labels must be 0, 1 or -1; got {value}"
            )))
        }
    }
}

/// Converts a numeric label array (as produced by numpy-style tooling).
pub fn labels_from_f64(values: &[f64]) -> Result<Vec<Label>, TsadError> {
    values
        .iter()
        .enumerate()
        .map(|(idx, &value)| {
            Label::try_from(value).map_err(|_| {
                TsadError::invalid_input(format!(
                    "labels must be 0, 1 or -1; labels[{idx}]={value}"
                ))
            })
        })
        .collect()
}

/// Converts an integer label array.
pub fn labels_from_i64(values: &[i64]) -> Result<Vec<Label>, TsadError> {
    values
        .iter()
        .enumerate()
        .map(|(idx, &value)| {
            Label::try_from(value).map_err(|_| {
                TsadError::invalid_input(format!(
                    "labels must be 0, 1 or -1; labels[{idx}]={value}"
                ))
            })
        })
        .collect()
}

/// Positions holding [`Label::Positive`], in increasing order.
pub fn positive_indices(labels: &[Label]) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter_map(|(idx, label)| label.is_positive().then_some(idx))
        .collect()
}

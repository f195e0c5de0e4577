// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::{Label, TsadError};
use std::fmt;
use std::ops::RangeInclusive;

/// Closed index interval `[start, end]` of an anomaly.
///
/// Ranges extracted from a label sequence are maximal and never touch each
/// other. Ranges supplied directly by callers carry no such guarantee, but
/// `start <= end` is always a precondition of the metrics.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RangePair", into = "RangePair")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnomalyRange {
    pub start: usize,
    pub end: usize,
}

impl AnomalyRange {
    /// Constructs a validated range.
    pub fn new(start: usize, end: usize) -> Result<Self, TsadError> {
        if start > end {
            return Err(TsadError::invalid_input(format!(
                "anomaly range requires start <= end; got start={start}, end={end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Single-index range `[index, index]`.
    pub fn point(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// Number of indices covered; zero only for malformed ranges.
    pub fn len(&self) -> usize {
        self.end
            .checked_add(1)
            .map_or(usize::MAX, |past_end| past_end.saturating_sub(self.start))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// True when both ranges share at least one index.
    pub fn intersects(&self, other: &AnomalyRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Indices shared with `other`, if any.
    pub fn intersection(&self, other: &AnomalyRange) -> Option<AnomalyRange> {
        self.intersects(other).then(|| AnomalyRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl From<(usize, usize)> for AnomalyRange {
    /// Unchecked conversion; see [`AnomalyRange::new`] for the validated form.
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<AnomalyRange> for (usize, usize) {
    fn from(range: AnomalyRange) -> Self {
        (range.start, range.end)
    }
}

/// Wire form of a range: a two-element `[start, end]` array.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RangePair(usize, usize);

#[cfg(feature = "serde")]
impl TryFrom<RangePair> for AnomalyRange {
    type Error = TsadError;

    fn try_from(RangePair(start, end): RangePair) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

#[cfg(feature = "serde")]
impl From<AnomalyRange> for RangePair {
    fn from(range: AnomalyRange) -> Self {
        RangePair(range.start, range.end)
    }
}

impl fmt::Display for AnomalyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Splits a label sequence into maximal runs of positive samples.
///
/// Both `Negative` and `Unscored` samples terminate a run.
pub fn extract_anomaly_ranges(labels: &[Label]) -> Vec<AnomalyRange> {
    let mut ranges = Vec::new();
    let mut run_start: Option<usize> = None;

    for (idx, label) in labels.iter().enumerate() {
        match (label.is_positive(), run_start) {
            (true, None) => run_start = Some(idx),
            (false, Some(start)) => {
                ranges.push(AnomalyRange {
                    start,
                    end: idx - 1,
                });
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        ranges.push(AnomalyRange {
            start,
            end: labels.len() - 1,
        });
    }

    ranges
}

// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Scoring for anomaly detectors: tolerance-based point metrics, range
//! recall/precision with positional bias, and detection-delay offsets.

pub mod config;
pub mod delay;
pub mod overlap;
pub mod point;
pub mod range;
pub mod report;
pub mod soft;

pub use config::{EvaluationConfig, DEFAULT_ALPHA, DEFAULT_DETECTION_RANGE};
pub use delay::{ctt, ttc, DelaySign, CTT_NO_TRIGGERS, CTT_NO_TRUTH, TTC_NO_TRIGGERS, TTC_NO_TRUTH};
pub use overlap::{
    cardinality_factor, covered_spans, existence_reward, overlap_reward, overlap_size,
};
pub use point::{point_metrics, PointMetrics};
pub use range::{f1_t, precision_t, range_scores, recall_t, RangeScores};
pub use report::{evaluate, evaluate_batch, EvaluationReport, ScoredWindow};
pub use soft::{soft_f1, soft_match, soft_precision, soft_recall, SoftMatching, SoftScore};

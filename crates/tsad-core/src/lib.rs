// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Shared vocabulary for range-aware anomaly scoring: three-state labels,
//! closed anomaly ranges and positional bias weights.

pub mod bias;
pub mod error;
pub mod label;
pub mod range;

pub use bias::{positional_bias, positional_bias_sum, BiasType};
pub use error::{validate_same_len, TsadError};
pub use label::{labels_from_f64, labels_from_i64, positive_indices, Label};
pub use range::{extract_anomaly_ranges, AnomalyRange};

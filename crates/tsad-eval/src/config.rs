// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::delay::DelaySign;
use crate::range::validate_alpha;
use tsad_core::{BiasType, TsadError};

pub const DEFAULT_DETECTION_RANGE: usize = 3;
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Tuning parameters shared by every metric of an evaluation run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvaluationConfig {
    /// Tolerance window, in samples, for soft point matching.
    pub detection_range: usize,
    /// Weight of the existence reward in range recall.
    pub alpha: f64,
    pub bias: BiasType,
    pub delay_sign: DelaySign,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            detection_range: DEFAULT_DETECTION_RANGE,
            alpha: DEFAULT_ALPHA,
            bias: BiasType::Flat,
            delay_sign: DelaySign::Signed,
        }
    }
}

impl EvaluationConfig {
    pub fn with_detection_range(mut self, detection_range: usize) -> Self {
        self.detection_range = detection_range;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_bias(mut self, bias: BiasType) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_delay_sign(mut self, delay_sign: DelaySign) -> Self {
        self.delay_sign = delay_sign;
        self
    }

    pub fn validate(&self) -> Result<(), TsadError> {
        validate_alpha(self.alpha)
    }
}

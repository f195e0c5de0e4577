// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised by tsad scoring APIs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TsadError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TsadError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Stable machine-readable code for this error class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

/// Fails unless both label sequences have the same length.
pub fn validate_same_len<A, B>(y_true: &[A], y_pred: &[B]) -> Result<usize, TsadError> {
    if y_true.len() != y_pred.len() {
        return Err(TsadError::invalid_input(format!(
            "y_true and y_pred must share n; got true_n={}, pred_n={}",
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(y_true.len())
}

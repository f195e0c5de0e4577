// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Deterministic label generators shared by the benches.

use tsad_core::Label;

fn lcg_next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

/// Sparse anomaly bursts: each position starts a burst with probability
/// `1 / burst_every`, bursts last up to `max_burst` samples.
pub fn burst_labels(n: usize, burst_every: u64, max_burst: usize, seed: u64) -> Vec<Label> {
    let mut labels = vec![Label::Negative; n];
    let mut state = seed;
    let mut idx = 0usize;
    while idx < n {
        if lcg_next(&mut state) % burst_every.max(1) == 0 {
            let len = 1 + (lcg_next(&mut state) as usize) % max_burst.max(1);
            for label in labels.iter_mut().skip(idx).take(len) {
                *label = Label::Positive;
            }
            idx += len;
        }
        idx += 1;
    }
    labels
}

/// Copy of `labels` with every burst shifted by up to `max_shift` samples
/// and an unscored warm-up prefix.
pub fn jittered_prediction(
    labels: &[Label],
    max_shift: usize,
    warmup: usize,
    seed: u64,
) -> Vec<Label> {
    let n = labels.len();
    let mut predicted = vec![Label::Negative; n];
    let mut state = seed;
    for (idx, label) in labels.iter().enumerate() {
        if label.is_positive() {
            let shift = (lcg_next(&mut state) as usize) % (max_shift + 1);
            let target = if lcg_next(&mut state) & 1 == 0 {
                idx.saturating_sub(shift)
            } else {
                (idx + shift).min(n.saturating_sub(1))
            };
            predicted[target] = Label::Positive;
        }
    }
    for label in predicted.iter_mut().take(warmup) {
        *label = Label::Unscored;
    }
    predicted
}

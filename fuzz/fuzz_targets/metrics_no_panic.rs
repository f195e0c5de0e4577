// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_main]

#[path = "common.rs"]
mod common;

use libfuzzer_sys::fuzz_target;
use tsad_core::{BiasType, Label};
use tsad_eval::{evaluate, DelaySign, EvaluationConfig};

fn decode_label(bits: u8) -> Label {
    match bits % 5 {
        0 | 1 => Label::Negative,
        2 | 3 => Label::Positive,
        _ => Label::Unscored,
    }
}

fn in_unit_interval(value: f64) -> bool {
    (0.0..=1.0 + 1e-9).contains(&value)
}

fuzz_target!(|data: &[u8]| {
    let mut cursor = common::ByteCursor::new(data);
    let config = EvaluationConfig {
        detection_range: common::bounded(cursor.next_u8(), 0, 16),
        alpha: f64::from(cursor.next_u8()) / 255.0,
        bias: BiasType::ALL[usize::from(cursor.next_u8()) % BiasType::ALL.len()],
        delay_sign: if cursor.next_u8() & 1 == 0 {
            DelaySign::Signed
        } else {
            DelaySign::Absolute
        },
    };

    let (y_true, y_pred): (Vec<Label>, Vec<Label>) = cursor
        .remaining()
        .iter()
        .map(|&byte| (decode_label(byte & 0x0f), decode_label(byte >> 4)))
        .unzip();

    let report = evaluate(&y_true, &y_pred, &config).expect("equal-length labels must evaluate");

    for score in [
        report.point.precision,
        report.point.recall,
        report.point.f1,
        report.soft_precision.score,
        report.soft_recall.score,
        report.soft_f1,
        report.range.recall,
        report.range.precision,
        report.range.f1,
    ] {
        assert!(in_unit_interval(score), "score {score} outside [0, 1]");
    }
    assert!(!report.ctt.is_nan());
    assert!(!report.ttc.is_nan());
    assert_eq!(report.n, y_true.len());
});

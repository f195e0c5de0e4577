// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::process;

fn main() {
    if let Err(err) = tsad_cli::run() {
        tsad_cli::emit_structured_error(&err);
        process::exit(1);
    }
}

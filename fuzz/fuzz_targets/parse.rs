//! Fuzz target for the parser under all four bound/termination modes.
//!
//! This fuzzer feeds arbitrary byte sequences to the parser, checking for
//! panics, crashes, stack exhaustion or hangs.

#![no_main]

use jsontree::{parse_with_opts, InputBound, ParseOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    for bound in [InputBound::Length, InputBound::NulTerminated] {
        for require_termination in [false, true] {
            let opts = ParseOptions {
                bound,
                require_termination,
                ..ParseOptions::default()
            };
            let _ = parse_with_opts(data, &opts);
        }
    }
});

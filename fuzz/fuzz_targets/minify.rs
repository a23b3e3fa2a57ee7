//! Fuzz target for in-place minify.
//!
//! Checks that minify never grows its input and that minified JSON parses
//! to the same tree as the original.

#![no_main]

use jsontree::{compare, minify_bytes, parse_with_opts, KeyCase, ParseOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let mut minified = data.to_vec();
    minify_bytes(&mut minified);
    assert!(minified.len() <= data.len());

    let opts = ParseOptions {
        require_termination: true,
        ..ParseOptions::default()
    };
    // Only comment-free input is guaranteed to keep its meaning.
    if data.contains(&b'/') {
        return;
    }
    if let (Ok(before), Ok(after)) = (
        parse_with_opts(data, &opts),
        parse_with_opts(&minified, &opts),
    ) {
        assert!(compare(&before.node, &after.node, KeyCase::Sensitive));
    }
});

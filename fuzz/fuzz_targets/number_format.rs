//! Fuzz target for number formatting.
//!
//! Every finite double must print as text that parses back to the same bits
//! (up to the sign of zero). Non-finite values must print as null.

#![no_main]

use jsontree::parse;
use jsontree::print::fuzz_format_number;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 8]| {
    let value = f64::from_le_bytes(data);
    let text = fuzz_format_number(value);

    if !value.is_finite() {
        assert_eq!(text, "null");
        return;
    }
    let parsed = parse(&text).expect("formatted number parses");
    assert_eq!(parsed.as_f64(), Some(value), "{text}");
});

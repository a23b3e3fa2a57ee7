//! Fuzz target for print/parse round trips.
//!
//! Any input that parses must print, reparse to the same printed text in both
//! layouts, and fit a preallocated buffer of exactly the printed length.

#![no_main]

use jsontree::{parse, parse_bytes, print, print_preallocated, print_unformatted, Format};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(node) = parse_bytes(data) else {
        return;
    };

    // Overflowing numbers parse as infinities and print as null, so compare
    // printed text rather than trees.
    let compact = print_unformatted(&node).expect("parsed tree prints");
    let reparsed = parse(&compact).expect("printed text parses");
    assert_eq!(print_unformatted(&reparsed).expect("reprint"), compact);

    let pretty = print(&node).expect("parsed tree prints pretty");
    let reparsed = parse(&pretty).expect("pretty text parses");
    assert_eq!(print_unformatted(&reparsed).expect("reprint"), compact);

    let mut buffer = vec![0u8; compact.len()];
    let written = print_preallocated(&node, &mut buffer, Format::Compact).expect("exact fit");
    assert_eq!(&buffer[..written], compact.as_bytes());
    let short = &mut buffer[..compact.len() - 1];
    assert!(print_preallocated(&node, short, Format::Compact).is_err());
});

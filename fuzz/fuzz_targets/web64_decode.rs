#![no_main]
use intruder_core::codec::{decode, encode};
use libfuzzer_sys::fuzz_target;

// Arbitrary host input: must never panic, and anything accepted re-encodes
// to the same bytes.
fuzz_target!(|data: &[u8]| {
    if let Ok(bytes) = decode(data) {
        assert_eq!(decode(encode(&bytes)).unwrap(), bytes);
    }
});

#![no_main]
use intruder_core::codec::{decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = encode(data);
    assert!(!text.contains('='));
    let decoded = decode(&text).expect("encoder output must decode");
    assert_eq!(data, decoded.as_slice());
});

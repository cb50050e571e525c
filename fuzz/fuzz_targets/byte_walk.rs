#![no_main]
use intruder_core::{ByteSequencer, IntruderError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Keep passes short; cost is 255 * len * len.
    let buffer = &data[..data.len().min(8)];
    let mut seq = ByteSequencer::new();
    let mut emitted = 0usize;

    loop {
        match seq.step(buffer) {
            Ok(step) => {
                emitted += 1;
                let changed = step
                    .output
                    .iter()
                    .zip(buffer)
                    .filter(|(a, b)| a != b)
                    .count();
                assert_eq!(changed, 1);
                if !step.has_more {
                    break;
                }
            }
            Err(IntruderError::PositionOutOfRange { .. }) => {
                assert!(buffer.is_empty());
                return;
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(emitted, ByteSequencer::variant_count(buffer.len()));
    assert_eq!(seq.step(buffer).unwrap_err(), IntruderError::Exhausted);
});

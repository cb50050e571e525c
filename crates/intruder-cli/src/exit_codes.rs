//! Exit codes for the `intruder` binary.
//! These codes are part of the CLI contract.

use intruder_core::IntruderError;

pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 2; // Bad flags, config file or environment
pub const DECODE_ERROR: i32 = 3; // Base value is not valid base64url
pub const EXHAUSTED: i32 = 4; // Generator ran past its last payload

/// Exit code for a failed command.
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<IntruderError>() {
        Some(IntruderError::Decode { .. }) => DECODE_ERROR,
        Some(IntruderError::Exhausted | IntruderError::PositionOutOfRange { .. }) => EXHAUSTED,
        Some(IntruderError::Config { .. }) | None => CONFIG_ERROR,
    }
}

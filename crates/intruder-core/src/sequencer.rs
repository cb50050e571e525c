//! Per-byte mutation sequencer.
//!
//! Walks a decoded buffer one position at a time and, at each position,
//! adds every non-zero amount (1..=255, mod 256) to that byte. A buffer of
//! length N yields exactly `255 * N` variants in row-major order, each one
//! differing from the input in a single byte.

use tracing::{debug, trace};

use crate::error::{IntruderError, IntruderResult};

/// Mutation amounts per position. Amount 256 (== 0) would reproduce the
/// original byte and is never emitted.
pub const MAX_OFFSET: u16 = 255;

/// Iteration state carried between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PayloadState {
    /// Index of the byte currently being mutated.
    pub base_position: usize,
    /// Amount applied by the last step at `base_position`, 0 right after a
    /// reset or a position advance.
    pub mutation_offset: u16,
    /// Set once every position has been walked.
    pub done: bool,
}

/// Output of a single [`ByteSequencer::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub has_more: bool,
    pub output: Vec<u8>,
}

/// Stateful byte walker. The buffer itself is not retained; callers hand
/// in a freshly decoded buffer on every step.
#[derive(Debug, Clone, Default)]
pub struct ByteSequencer {
    state: PayloadState,
}

impl ByteSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of variants for a buffer of `len` bytes.
    pub fn variant_count(len: usize) -> usize {
        len.saturating_mul(usize::from(MAX_OFFSET))
    }

    pub fn state(&self) -> PayloadState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.done
    }

    /// Rewind to position 0, offset 0.
    pub fn reset(&mut self) {
        self.state = PayloadState::default();
        debug!("sequencer reset");
    }

    /// Emit the next variant of `buffer`.
    pub fn step(&mut self, buffer: &[u8]) -> IntruderResult<Step> {
        if self.state.done {
            return Err(IntruderError::Exhausted);
        }

        let position = self.state.base_position;
        if position >= buffer.len() {
            return Err(IntruderError::PositionOutOfRange {
                position,
                len: buffer.len(),
            });
        }

        self.state.mutation_offset += 1;
        let amount = self.state.mutation_offset;
        // amount <= 255, so the truncation is exact
        let output = munge_byte(buffer, position, |b| b.wrapping_add(amount as u8));
        trace!(position, amount, "mutated byte");

        if self.state.mutation_offset == MAX_OFFSET {
            self.state.mutation_offset = 0;
            self.state.base_position += 1;
        }
        if self.state.base_position == buffer.len() {
            self.state.done = true;
            debug!(len = buffer.len(), "sequencer exhausted");
        }

        Ok(Step {
            has_more: !self.state.done,
            output,
        })
    }
}

/// Copy of `value` with the byte at `position` replaced by `f(byte)`.
///
/// # Panics
///
/// Panics if `position` is out of bounds.
pub fn munge_byte(value: &[u8], position: usize, f: impl FnOnce(u8) -> u8) -> Vec<u8> {
    let mut out = value.to_vec();
    out[position] = f(out[position]);
    out
}

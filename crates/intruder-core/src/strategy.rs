//! Mutation strategies.
//!
//! A strategy owns the three customisation points of a generator: how the
//! host's base value is decoded, how a payload is produced from it, and how
//! the result is encoded again. [`ByteWalk`] is the stock strategy.

use crate::codec::{PayloadCodec, Web64};
use crate::error::IntruderResult;
use crate::sequencer::{ByteSequencer, Step};

pub trait PayloadStrategy: Send {
    /// Host base value to processing input.
    fn decode(&self, value: &[u8]) -> IntruderResult<Vec<u8>>;

    /// Produce the next payload from a decoded value.
    fn process(&mut self, value: &[u8]) -> IntruderResult<Step>;

    /// Processed payload to host value.
    fn encode(&self, value: &[u8]) -> Vec<u8>;

    /// Return to the start of the sequence.
    fn reset(&mut self);
}

/// Decode, walk every byte through its 255 alternate values, encode.
#[derive(Debug, Clone, Default)]
pub struct ByteWalk<C = Web64> {
    codec: C,
    sequencer: ByteSequencer,
}

impl ByteWalk<Web64> {
    pub fn web64() -> Self {
        Self::with_codec(Web64)
    }
}

impl<C: PayloadCodec> ByteWalk<C> {
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            sequencer: ByteSequencer::new(),
        }
    }

    pub fn sequencer(&self) -> &ByteSequencer {
        &self.sequencer
    }
}

impl<C: PayloadCodec + Send> PayloadStrategy for ByteWalk<C> {
    fn decode(&self, value: &[u8]) -> IntruderResult<Vec<u8>> {
        self.codec.decode(value)
    }

    fn process(&mut self, value: &[u8]) -> IntruderResult<Step> {
        self.sequencer.step(value)
    }

    fn encode(&self, value: &[u8]) -> Vec<u8> {
        self.codec.encode(value)
    }

    fn reset(&mut self) {
        self.sequencer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Identity;

    #[test]
    fn test_byte_walk_web64_pipeline() {
        let mut walk = ByteWalk::web64();
        let decoded = walk.decode(b"QQ").unwrap();
        assert_eq!(decoded, b"A");
        let step = walk.process(&decoded).unwrap();
        assert_eq!(walk.encode(&step.output), b"Qg");
    }

    #[test]
    fn test_byte_walk_identity() {
        let mut walk = ByteWalk::with_codec(Identity);
        let decoded = walk.decode(b"xy").unwrap();
        let step = walk.process(&decoded).unwrap();
        assert_eq!(walk.encode(&step.output), b"yy");
    }

    #[test]
    fn test_reset_delegates_to_sequencer() {
        let mut walk = ByteWalk::web64();
        walk.process(b"z").unwrap();
        walk.reset();
        assert_eq!(walk.sequencer().state().mutation_offset, 0);
    }
}

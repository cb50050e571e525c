//! Payload codecs.
//!
//! A codec sits on both sides of a mutation strategy: the host's base value
//! is decoded before processing and the processed bytes are encoded before
//! they go back to the host.
//!
//! - [`Web64`]: URL-safe base64 (`-`/`_` alphabet) with padding stripped
//! - [`Identity`]: pass-through, for strategies that work on raw values

use std::fmt;
use std::str::FromStr;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{IntruderError, IntruderResult};

/// Base64 block size in encoded characters.
const BLOCK: usize = 4;

/// URL-safe alphabet, never emits `=`, and on decode expects the canonical
/// padding that [`repad`] restores.
const WEB64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
        .with_decode_allow_trailing_bits(true),
);

/// Encode bytes as unpadded base64url text.
pub fn encode(bytes: &[u8]) -> String {
    WEB64.encode(bytes)
}

/// Decode unpadded (or padded) base64url text.
pub fn decode(text: impl AsRef<[u8]>) -> IntruderResult<Vec<u8>> {
    let padded = repad(text.as_ref())?;
    WEB64
        .decode(&padded)
        .map_err(|e| IntruderError::decode(format!("invalid base64url: {}", e)))
}

/// Restore `=` padding so the length is a multiple of four.
///
/// Padding already present is stripped first. A remainder of one character
/// can never come out of an encoder and is rejected.
pub fn repad(text: &[u8]) -> IntruderResult<Vec<u8>> {
    let end = text
        .iter()
        .rposition(|&b| b != b'=')
        .map_or(0, |idx| idx + 1);
    let body = &text[..end];

    let pad = match body.len() % BLOCK {
        0 => 0,
        1 => {
            return Err(IntruderError::decode(format!(
                "invalid base64url length {}",
                body.len()
            )))
        }
        rem => BLOCK - rem,
    };

    let mut padded = Vec::with_capacity(body.len() + pad);
    padded.extend_from_slice(body);
    padded.resize(body.len() + pad, b'=');
    Ok(padded)
}

/// Reversible transform between host values and strategy input.
pub trait PayloadCodec {
    /// Short name used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Host value to raw bytes.
    fn decode(&self, value: &[u8]) -> IntruderResult<Vec<u8>>;

    /// Raw bytes to host value.
    fn encode(&self, value: &[u8]) -> Vec<u8>;
}

/// Base64url codec without padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Web64;

impl PayloadCodec for Web64 {
    fn name(&self) -> &'static str {
        "web64"
    }

    fn decode(&self, value: &[u8]) -> IntruderResult<Vec<u8>> {
        decode(value)
    }

    fn encode(&self, value: &[u8]) -> Vec<u8> {
        encode(value).into_bytes()
    }
}

/// Pass-through codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl PayloadCodec for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn decode(&self, value: &[u8]) -> IntruderResult<Vec<u8>> {
        Ok(value.to_vec())
    }

    fn encode(&self, value: &[u8]) -> Vec<u8> {
        value.to_vec()
    }
}

impl PayloadCodec for Box<dyn PayloadCodec + Send> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decode(&self, value: &[u8]) -> IntruderResult<Vec<u8>> {
        (**self).decode(value)
    }

    fn encode(&self, value: &[u8]) -> Vec<u8> {
        (**self).encode(value)
    }
}

/// Codec selector for configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    #[default]
    Web64,
    Identity,
}

impl CodecKind {
    pub fn build(self) -> Box<dyn PayloadCodec + Send> {
        match self {
            Self::Web64 => Box::new(Web64),
            Self::Identity => Box::new(Identity),
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Web64 => f.write_str("web64"),
            Self::Identity => f.write_str("identity"),
        }
    }
}

impl FromStr for CodecKind {
    type Err = IntruderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web64" | "base64url" => Ok(Self::Web64),
            "identity" | "raw" => Ok(Self::Identity),
            other => Err(IntruderError::config(format!("unknown codec: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_strips_padding() {
        assert_eq!(encode(b"\x00\x01\x02"), "AAEC");
        assert_eq!(encode(b"A"), "QQ");
        assert_eq!(encode(b"AB"), "QUI");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn test_encode_uses_url_safe_alphabet() {
        // 0xfb 0xff encodes to "+/8=" in the standard alphabet
        assert_eq!(encode(&[0xfb, 0xff]), "-_8");
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode("AAEC").unwrap(), b"\x00\x01\x02");
        assert_eq!(decode("QQ").unwrap(), b"A");
        assert_eq!(decode("QUI").unwrap(), b"AB");
        assert_eq!(decode("-_8").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_accepts_existing_padding() {
        assert_eq!(decode("QQ==").unwrap(), b"A");
        assert_eq!(decode("QUI=").unwrap(), b"AB");
    }

    #[test]
    fn test_repad_to_block_multiple() {
        assert_eq!(repad(b"QQ").unwrap(), b"QQ==");
        assert_eq!(repad(b"QUI").unwrap(), b"QUI=");
        assert_eq!(repad(b"QUFB").unwrap(), b"QUFB");
        assert_eq!(repad(b"QUFBQQ").unwrap(), b"QUFBQQ==");
        assert_eq!(repad(b"====").unwrap(), b"");
    }

    #[test]
    fn test_repad_rejects_impossible_length() {
        let err = repad(b"QUFBQ").unwrap_err();
        assert!(matches!(err, IntruderError::Decode { .. }));
    }

    #[test]
    fn test_decode_rejects_standard_alphabet() {
        assert!(matches!(
            decode("+/8").unwrap_err(),
            IntruderError::Decode { .. }
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("QQ!!").is_err());
        assert!(decode("Q Q").is_err());
    }

    #[test]
    fn test_identity_is_pass_through() {
        let codec = Identity;
        assert_eq!(codec.decode(b"any=thing").unwrap(), b"any=thing");
        assert_eq!(codec.encode(&[0, 255]), vec![0, 255]);
    }

    #[test]
    fn test_codec_kind_parse() {
        assert_eq!("web64".parse::<CodecKind>().unwrap(), CodecKind::Web64);
        assert_eq!("RAW".parse::<CodecKind>().unwrap(), CodecKind::Identity);
        assert!("rot13".parse::<CodecKind>().is_err());
        assert_eq!(CodecKind::Web64.build().name(), "web64");
    }
}

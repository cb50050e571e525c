//! Per-byte mutation payload generator for Intruder-style attack hosts.
//!
//! The host hands in a base64url base value, the generator decodes it,
//! bumps exactly one byte and encodes the result again. Every byte is
//! walked through all 255 alternate values, so a base value that decodes to
//! N bytes yields `255 * N` payloads.
//!
//! # Quick Start
//!
//! ```
//! use intruder_core::{AttackContext, Extension, ExtensionConfig, HostRegistry, HttpService};
//!
//! let mut host = HostRegistry::new();
//! Extension::register(&mut host, &ExtensionConfig::default()).unwrap();
//!
//! let attack = AttackContext::new(Vec::new(), HttpService::new("example.test", 443, "https"));
//! let mut generator = host.create_generator("My Generator", &attack).unwrap();
//!
//! // "QQ" is base64url for "A"; the first payload is "B"
//! assert_eq!(generator.next_payload(b"QQ").unwrap(), b"Qg");
//! assert!(generator.has_more_payloads());
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod extension;
pub mod generator;
pub mod sequencer;
pub mod strategy;

pub use codec::{CodecKind, Identity, PayloadCodec, Web64};
pub use config::{ExtensionConfig, TextMode};
pub use error::{IntruderError, IntruderResult};
pub use extension::{ByteWalkFactory, ExtenderCallbacks, Extension, GeneratorFactory, HostRegistry};
pub use generator::{AttackContext, HttpService, PayloadGenerator};
pub use sequencer::{munge_byte, ByteSequencer, PayloadState, Step, MAX_OFFSET};
pub use strategy::{ByteWalk, PayloadStrategy};

//! Host-facing payload generator.
//!
//! One [`PayloadGenerator`] exists per attack. The host asks
//! [`has_more_payloads`](PayloadGenerator::has_more_payloads) before every
//! [`next_payload`](PayloadGenerator::next_payload) and may rewind with
//! [`reset_payloads`](PayloadGenerator::reset_payloads). Calls are strictly
//! sequential; nothing here is shared between attacks.

use tracing::debug;

use crate::config::TextMode;
use crate::error::{IntruderError, IntruderResult};
use crate::strategy::PayloadStrategy;

/// Target service of an attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpService {
    pub host: String,
    pub port: u16,
    pub protocol: String,
}

impl HttpService {
    pub fn new(host: impl Into<String>, port: u16, protocol: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: protocol.into(),
        }
    }
}

/// What the host knows about the attack a generator is created for.
/// Informational only; mutation never reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackContext {
    pub request_template: Vec<u8>,
    pub service: HttpService,
}

impl AttackContext {
    pub fn new(request_template: impl Into<Vec<u8>>, service: HttpService) -> Self {
        Self {
            request_template: request_template.into(),
            service,
        }
    }
}

pub struct PayloadGenerator {
    strategy: Box<dyn PayloadStrategy>,
    context: AttackContext,
    text_mode: TextMode,
    more_payloads: bool,
}

impl std::fmt::Debug for PayloadGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadGenerator")
            .field("context", &self.context)
            .field("text_mode", &self.text_mode)
            .field("more_payloads", &self.more_payloads)
            .finish_non_exhaustive()
    }
}

impl PayloadGenerator {
    pub fn new(
        strategy: Box<dyn PayloadStrategy>,
        context: AttackContext,
        text_mode: TextMode,
    ) -> Self {
        let mut generator = Self {
            strategy,
            context,
            text_mode,
            more_payloads: true,
        };
        generator.reset_payloads();
        generator
    }

    pub fn has_more_payloads(&self) -> bool {
        self.more_payloads
    }

    /// Decode `base_value`, produce one payload, encode it.
    ///
    /// Errors are returned to the host as-is; no fallback payload is
    /// substituted.
    pub fn next_payload(&mut self, base_value: &[u8]) -> IntruderResult<Vec<u8>> {
        if !self.more_payloads {
            return Err(IntruderError::Exhausted);
        }
        if self.text_mode == TextMode::Utf8 {
            std::str::from_utf8(base_value)
                .map_err(|e| IntruderError::decode(format!("base value is not UTF-8: {}", e)))?;
        }

        let decoded = self.strategy.decode(base_value)?;
        let step = self.strategy.process(&decoded)?;
        self.more_payloads = step.has_more;
        if !step.has_more {
            debug!(host = %self.context.service.host, "payloads exhausted");
        }
        Ok(self.strategy.encode(&step.output))
    }

    pub fn reset_payloads(&mut self) {
        self.strategy.reset();
        self.more_payloads = true;
        debug!(host = %self.context.service.host, "payloads reset");
    }

    pub fn context(&self) -> &AttackContext {
        &self.context
    }

    pub fn text_mode(&self) -> TextMode {
        self.text_mode
    }
}

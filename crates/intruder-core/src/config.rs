//! Extension configuration.
//!
//! Merge precedence: defaults → YAML file → environment → explicit overrides
//! (the CLI applies its flags last through the `with_*` builders).
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `INTRUDER_GENERATOR_NAME` | Label shown in the host's generator list |
//! | `INTRUDER_EXTENSION_NAME` | Extension name reported to the host |
//! | `INTRUDER_LOAD_MESSAGE` | Message logged once registration completes |
//! | `INTRUDER_TEXT_MODE` | `bytes` (default) or `utf8` |
//! | `INTRUDER_CODEC` | `web64` (default) or `identity` |

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::CodecKind;
use crate::error::{IntruderError, IntruderResult};

pub const DEFAULT_GENERATOR_NAME: &str = "My Generator";
pub const DEFAULT_EXTENSION_NAME: &str = "My Extension";
pub const DEFAULT_LOAD_MESSAGE: &str = "Extension loaded!";

/// How base values are interpreted before they reach the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    /// Raw bytes, no validation.
    #[default]
    Bytes,
    /// Base values must be valid UTF-8.
    Utf8,
}

impl fmt::Display for TextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes => f.write_str("bytes"),
            Self::Utf8 => f.write_str("utf8"),
        }
    }
}

impl FromStr for TextMode {
    type Err = IntruderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bytes" => Ok(Self::Bytes),
            "utf8" | "utf-8" | "unicode" => Ok(Self::Utf8),
            other => Err(IntruderError::config(format!("unknown text mode: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionConfig {
    #[serde(default = "default_generator_name")]
    pub generator_name: String,

    #[serde(default = "default_extension_name")]
    pub extension_name: String,

    #[serde(default = "default_load_message")]
    pub load_message: String,

    #[serde(default)]
    pub text_mode: TextMode,

    #[serde(default)]
    pub codec: CodecKind,
}

fn default_generator_name() -> String {
    DEFAULT_GENERATOR_NAME.to_string()
}

fn default_extension_name() -> String {
    DEFAULT_EXTENSION_NAME.to_string()
}

fn default_load_message() -> String {
    DEFAULT_LOAD_MESSAGE.to_string()
}

fn parse_yaml(content: &str) -> Result<ExtensionConfig, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(ExtensionConfig::default());
    }
    serde_yaml::from_str(content)
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            generator_name: default_generator_name(),
            extension_name: default_extension_name(),
            load_message: default_load_message(),
            text_mode: TextMode::default(),
            codec: CodecKind::default(),
        }
    }
}

impl ExtensionConfig {
    /// Defaults overlaid with the environment.
    pub fn from_env() -> IntruderResult<Self> {
        Self::default().apply_env()
    }

    /// Parse a YAML config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> IntruderResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            IntruderError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        parse_yaml(&content).map_err(|e| {
            IntruderError::config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    pub fn from_yaml(content: &str) -> IntruderResult<Self> {
        parse_yaml(content).map_err(|e| IntruderError::config(format!("invalid config: {}", e)))
    }

    /// Layer `INTRUDER_*` variables on top of `self`.
    pub fn apply_env(mut self) -> IntruderResult<Self> {
        if let Ok(v) = std::env::var("INTRUDER_GENERATOR_NAME") {
            self.generator_name = v;
        }
        if let Ok(v) = std::env::var("INTRUDER_EXTENSION_NAME") {
            self.extension_name = v;
        }
        if let Ok(v) = std::env::var("INTRUDER_LOAD_MESSAGE") {
            self.load_message = v;
        }
        if let Ok(v) = std::env::var("INTRUDER_TEXT_MODE") {
            self.text_mode = v.parse()?;
        }
        if let Ok(v) = std::env::var("INTRUDER_CODEC") {
            self.codec = v.parse()?;
        }
        Ok(self)
    }

    pub fn with_generator_name(mut self, name: impl Into<String>) -> Self {
        self.generator_name = name.into();
        self
    }

    pub fn with_text_mode(mut self, mode: TextMode) -> Self {
        self.text_mode = mode;
        self
    }

    pub fn with_codec(mut self, codec: CodecKind) -> Self {
        self.codec = codec;
        self
    }

    pub fn validate(&self) -> IntruderResult<()> {
        if self.generator_name.trim().is_empty() {
            return Err(IntruderError::config("generator_name cannot be empty"));
        }
        if self.extension_name.trim().is_empty() {
            return Err(IntruderError::config("extension_name cannot be empty"));
        }
        Ok(())
    }
}

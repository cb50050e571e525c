use clap::{Args, Parser, Subcommand};
use intruder_core::{CodecKind, TextMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "intruder",
    version,
    about = "Per-byte web64 payload generator: drive it the way an Intruder host would"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a full attack pass and print one payload per line
    Generate(GenerateArgs),
    /// Encode hex bytes as unpadded base64url
    Encode(EncodeArgs),
    /// Decode base64url text and print the bytes as hex
    Decode(DecodeArgs),
    /// Number of payloads a base value yields
    Count(CountArgs),
    /// Print the effective extension configuration
    Info(InfoArgs),
}

/// Configuration layering shared by every command that builds a generator.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// YAML config file (applied before INTRUDER_* environment variables)
    #[arg(long, env = "INTRUDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the generator name
    #[arg(long)]
    pub generator_name: Option<String>,

    /// Codec applied around the mutation: web64 | identity
    #[arg(long)]
    pub codec: Option<CodecKind>,

    /// How base values are validated: bytes | utf8
    #[arg(long)]
    pub text_mode: Option<TextMode>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Base value the host would substitute at the payload position
    #[arg(allow_hyphen_values = true)]
    pub base: String,

    /// Stop after this many payloads
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value = "localhost")]
    pub host: String,

    #[arg(long, default_value_t = 80)]
    pub port: u16,

    #[arg(long, default_value = "http")]
    pub protocol: String,

    /// Raw request template file (informational)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Rewind and run the pass this many times
    #[arg(long, default_value_t = 1)]
    pub passes: u32,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct EncodeArgs {
    /// Bytes as hex, e.g. 000102
    pub hex: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DecodeArgs {
    /// Base64url text, padding optional
    #[arg(allow_hyphen_values = true)]
    pub text: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CountArgs {
    #[arg(allow_hyphen_values = true)]
    pub base: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

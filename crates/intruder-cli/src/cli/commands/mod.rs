use crate::cli::args::{Cli, Command, ConfigArgs};
use anyhow::Result;
use intruder_core::ExtensionConfig;

pub mod codec;
pub mod generate;
pub mod info;

pub fn dispatch(cli: Cli) -> Result<i32> {
    match cli.cmd {
        Command::Generate(args) => generate::run(args),
        Command::Encode(args) => codec::encode(args),
        Command::Decode(args) => codec::decode(args),
        Command::Count(args) => codec::count(args),
        Command::Info(args) => info::run(args),
    }
}

/// Merge precedence: defaults → --config file → INTRUDER_* env → flags.
pub(crate) fn load_config(args: &ConfigArgs) -> Result<ExtensionConfig> {
    let base = match &args.config {
        Some(path) => ExtensionConfig::from_file(path)?,
        None => ExtensionConfig::default(),
    };
    let mut cfg = base.apply_env()?;
    if let Some(name) = &args.generator_name {
        cfg = cfg.with_generator_name(name);
    }
    if let Some(codec) = args.codec {
        cfg = cfg.with_codec(codec);
    }
    if let Some(mode) = args.text_mode {
        cfg = cfg.with_text_mode(mode);
    }
    cfg.validate()?;
    Ok(cfg)
}

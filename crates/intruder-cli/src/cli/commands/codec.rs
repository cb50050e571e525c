use crate::cli::args::{CountArgs, DecodeArgs, EncodeArgs};
use crate::cli::commands::load_config;
use crate::exit_codes::{CONFIG_ERROR, SUCCESS};
use anyhow::{Context, Result};
use intruder_core::{codec, ByteSequencer, PayloadCodec};

pub fn encode(args: EncodeArgs) -> Result<i32> {
    let bytes = match hex::decode(args.hex.trim()) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Config error: invalid hex input: {}", e);
            return Ok(CONFIG_ERROR);
        }
    };
    println!("{}", codec::encode(&bytes));
    Ok(SUCCESS)
}

pub fn decode(args: DecodeArgs) -> Result<i32> {
    let bytes = codec::decode(args.text.trim()).context("decode failed")?;
    println!("{}", hex::encode(bytes));
    Ok(SUCCESS)
}

pub fn count(args: CountArgs) -> Result<i32> {
    let config = load_config(&args.config)?;
    let decoded = config
        .codec
        .build()
        .decode(args.base.as_bytes())
        .context("decode failed")?;
    println!("{}", ByteSequencer::variant_count(decoded.len()));
    Ok(SUCCESS)
}

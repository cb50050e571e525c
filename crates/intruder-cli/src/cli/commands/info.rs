use crate::cli::args::InfoArgs;
use crate::cli::commands::load_config;
use crate::exit_codes::SUCCESS;
use anyhow::Result;

pub fn run(args: InfoArgs) -> Result<i32> {
    let config = load_config(&args.config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(SUCCESS);
    }

    println!("Extension: {}", config.extension_name);
    println!("Generator: {}", config.generator_name);
    println!("Codec:     {}", config.codec);
    println!("Text mode: {}", config.text_mode);
    Ok(SUCCESS)
}

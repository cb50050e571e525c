use crate::cli::args::GenerateArgs;
use crate::cli::commands::load_config;
use crate::exit_codes::SUCCESS;
use anyhow::{Context, Result};
use intruder_core::{AttackContext, Extension, HostRegistry, HttpService};
use std::fs;
use std::io::{BufWriter, Write};

pub fn run(args: GenerateArgs) -> Result<i32> {
    let config = load_config(&args.config)?;

    let mut host = HostRegistry::new();
    Extension::register(&mut host, &config).context("extension registration failed")?;

    let template = match &args.template {
        Some(path) => fs::read(path)
            .with_context(|| format!("request template not found: {}", path.display()))?,
        None => Vec::new(),
    };
    let attack = AttackContext::new(
        template,
        HttpService::new(&args.host, args.port, &args.protocol),
    );
    let mut generator = host.create_generator(&config.generator_name, &attack)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let base = args.base.as_bytes();

    for pass in 0..args.passes {
        if pass > 0 {
            generator.reset_payloads();
        }
        let mut emitted = 0usize;
        while generator.has_more_payloads() && args.limit.map_or(true, |limit| emitted < limit) {
            let payload = generator
                .next_payload(base)
                .with_context(|| format!("payload {} of pass {}", emitted + 1, pass + 1))?;
            out.write_all(&payload)?;
            out.write_all(b"\n")?;
            emitted += 1;
        }
        tracing::info!(
            pass = pass + 1,
            emitted,
            exhausted = !generator.has_more_payloads(),
            "attack pass finished"
        );
    }

    out.flush()?;
    Ok(SUCCESS)
}

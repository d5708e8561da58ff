use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use layered_cloze::{digest_preview, ClozeConfig, DefaultPipeline, Outcome, CONFIG_FILE_NAME};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Keep only the nouns and verbs of a speech and render what is left.
///
/// Settings are read from `cloze.toml` in the working directory when present.
#[derive(Parser, Debug)]
#[command(name = "layered-cloze", version)]
struct Cli {
    /// Document to render, e.g. `1962-Kennedy.txt`. Defaults to the configured document.
    identifier: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClozeConfig::load(Path::new(CONFIG_FILE_NAME))?;
    let pipeline = DefaultPipeline::from_config(&config);
    let request = config.request(cli.identifier.as_deref());
    debug!(identifier = %request.identifier, corpus = %config.corpus_dir.display(), "running");

    let outcome = pipeline.run(&request)?;
    match &outcome {
        Outcome::Digest { text, .. } => {
            let shown = match config.digest_limit {
                Some(limit) => digest_preview(text, limit),
                None => text.as_str(),
            };
            println!("{}", shown);
            for skipped in outcome.skipped() {
                eprintln!("skipped sentence #{}: {}", skipped.index, skipped.error);
            }
        }
        Outcome::Written { .. } => println!("{}", outcome.report()),
        Outcome::Unresolved { .. } => {
            eprintln!("{}", outcome.report());
            return Ok(ExitCode::from(2));
        }
    }
    Ok(ExitCode::SUCCESS)
}

mod cli;

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;

use tap_csv_core::config::{load_dotenv, load_state};
use tap_csv_core::TapConfig;
use tap_csv_ingest::MessageWriter;

use crate::cli::CliArgs;

/// Failures are reported once, by anyhow, when `main` returns.
fn main() -> Result<()> {
    load_dotenv();

    // stdout carries the message stream, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let config = TapConfig::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    config.log_summary();

    let state = load_state(args.state.as_deref()).context("failed to load state")?;

    let mut writer = MessageWriter::new(BufWriter::new(std::io::stdout().lock()));
    tap_csv_ingest::run(&config.files, &state, &mut writer).context("sync aborted")?;
    writer
        .into_inner()
        .flush()
        .context("failed to flush output")?;

    Ok(())
}

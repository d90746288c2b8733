//! flurry: score tweet sentiment and emoji use from a CSV export.
//!
//! Writes one result row per tweet and appends a run summary to a CSV that
//! grows across runs.

use clap::Parser;
use snafu::prelude::*;
use std::path::PathBuf;
use tracing::info;

use flurry::error::{ConfigSnafu, PipelineError};
use flurry::{Config, init_tracing, run_pipeline};

/// Tweet CSV sentiment and emoji summarizer.
#[derive(Parser, Debug)]
#[command(name = "flurry")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides the config file.
    #[arg(long)]
    log_level: Option<String>,

    /// Dry run - validate configuration without processing.
    #[arg(long)]
    dry_run: bool,
}

#[snafu::report]
fn main() -> Result<(), PipelineError> {
    let args = Args::parse();

    let mut config = build_config(&args)?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config.logging)?;

    if args.dry_run {
        info!("Dry run mode - validating configuration");
        info!("Input: {}", config.source.path);
        info!("Query: {}", config.source.query);
        info!("Rows output: {}", config.output.rows_path().display());
        info!("Summary output: {}", config.output.summary_path().display());
        info!("Configuration is valid");
        return Ok(());
    }

    run_pipeline(config)?;
    Ok(())
}

/// Build configuration from arguments.
fn build_config(args: &Args) -> Result<Config, PipelineError> {
    match &args.config {
        Some(path) => Config::from_file(path).context(ConfigSnafu),
        None => Ok(Config::default()),
    }
}

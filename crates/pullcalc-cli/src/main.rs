mod cli;
mod config;
mod render;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use pullcalc_eval::GridOutput;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, OutputFormat};
use crate::config::RunConfig;
use crate::render::Report;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = RunConfig::resolve(&cli)?;
    let mut engine = config
        .build_engine()
        .context("invalid calculator settings")?;
    tracing::info!(
        probability = %engine.success_probability(),
        rows = engine.pull_amounts().len(),
        cols = engine.desired_copies().len(),
        "evaluating"
    );

    let output = if cli.raw {
        GridOutput::Raw
    } else {
        GridOutput::Percentage
    };
    let report = Report::evaluate(&mut engine, cli.mode, output);
    tracing::debug!(
        metrics = %engine.metrics().summary(),
        sizes = engine.cache_sizes().total(),
        "done"
    );

    let text = match cli.format {
        OutputFormat::Table => report.to_table(),
        OutputFormat::Csv => report.to_csv(),
        OutputFormat::Json => report.to_json()?,
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}").context("failed to write output")?;
    Ok(())
}

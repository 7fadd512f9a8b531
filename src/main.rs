use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fuzzy_usage::device::{catalog, AdvisorConfig, DeviceEvaluator};

/// Recommend how much to use each device from its power consumption and energy cost
#[derive(Debug, Parser)]
#[command(name = "fuzzy-usage", version)]
struct Cli {
    /// TOML file overriding the reference variables and operators
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of device records; the built-in sample catalog otherwise
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print one JSON object per device
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AdvisorConfig::load(path)?,
        None => AdvisorConfig::default(),
    };
    let evaluator = DeviceEvaluator::from_config(&config).context("invalid fuzzy system configuration")?;
    let devices = match &cli.catalog {
        Some(path) => catalog::load_catalog(path)?,
        None => catalog::sample_catalog(),
    };

    tracing::info!(devices = devices.len(), "evaluating catalog");

    for (device, result) in evaluator.evaluate_all(&devices) {
        match (cli.json, result) {
            (true, Ok(assessment)) => println!(
                "{}",
                serde_json::json!({ "id": device.id, "label": assessment.verdict, "score": assessment.score })
            ),
            (true, Err(err)) => println!("{}", serde_json::json!({ "id": device.id, "error": err.to_string() })),
            (false, Ok(assessment)) => println!("{}: {}", device.id, assessment.verdict),
            (false, Err(err)) => println!("{}: error: {err}", device.id),
        }
    }

    Ok(())
}

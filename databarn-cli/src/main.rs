//! databarn CLI — win leaderboards for sires, jockeys and trainers.
//!
//! Commands:
//! - `report` — load a race-book snapshot and print per-party leaderboards
//! - `slices` — list the partition catalog and each slice's filter
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); reports go to stdout.

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use databarn_core::{PartitionCatalog, PartyType, RaceBook};
use databarn_runner::{compute_dashboard, DashboardConfig};

#[derive(Parser)]
#[command(
    name = "databarn",
    about = "databarn CLI — tie-aware win leaderboards over race results"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute leaderboards from a race-book JSON snapshot.
    Report {
        /// Path to the race-book snapshot (JSON).
        #[arg(long)]
        dataset: PathBuf,

        /// Party types to report on (sires, jockeys, trainers). Repeatable.
        /// Defaults to the config file's list, or all three.
        #[arg(long = "party", value_name = "PARTY")]
        parties: Vec<PartyType>,

        /// Path to a TOML dashboard config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Query slices one at a time instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the partition catalog.
    Slices,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            dataset,
            parties,
            config,
            sequential,
            format,
        } => run_report(&dataset, parties, config.as_deref(), sequential, format),
        Commands::Slices => {
            print!("{}", render::render_catalog(&PartitionCatalog::standard()));
            Ok(())
        }
    }
}

fn run_report(
    dataset: &Path,
    parties: Vec<PartyType>,
    config_path: Option<&Path>,
    sequential: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    if !parties.is_empty() {
        config.parties = parties;
    }
    if sequential {
        config.parallel = false;
    }

    let json = std::fs::read_to_string(dataset)
        .with_context(|| format!("failed to read dataset {}", dataset.display()))?;
    let book = RaceBook::from_json(&json)
        .with_context(|| format!("failed to load race book from {}", dataset.display()))?;
    tracing::info!(
        dataset = %dataset.display(),
        runnings = book.snapshot().runnings.len(),
        "race book loaded"
    );

    let dashboard = compute_dashboard(&book, &PartitionCatalog::standard(), &config)?;

    match format {
        OutputFormat::Text => print!("{}", render::render_dashboard(&dashboard)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dashboard)?),
    }

    Ok(())
}

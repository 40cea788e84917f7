//! Dataset check.
//!
//! Loads a reference dataset, runs the full validation and index build, and reports
//! per-division statistics. Exits non-zero when the dataset is malformed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bd_address::{load_dataset, AddressDb, Config};

#[derive(Parser, Debug)]
#[command(name = "check")]
#[command(about = "Validate a Bangladesh address dataset")]
struct Args {
    /// Dataset directory or combined JSON file (defaults to the config's dataset path)
    dataset: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the per-division breakdown as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref())?;
    let path = args.dataset.unwrap_or(config.dataset.path);

    info!("bd-address Dataset Check");
    info!("Dataset: {}", path.display());

    let raw = load_dataset(&path)?;
    let db = AddressDb::build(&raw, config.search)
        .with_context(|| format!("Dataset {} is malformed", path.display()))?;

    let stats = db.stats();
    info!(
        "Dataset OK: {} divisions, {} districts, {} upazilas, {} unions",
        stats.total_divisions, stats.total_districts, stats.total_upazilas, stats.total_unions
    );

    let breakdown = db.division_breakdown();
    for division in &breakdown {
        info!(
            "  {} ({}): {} districts, {} upazilas, {} unions",
            division.name, division.bn_name, division.districts, division.upazilas, division.unions
        );
    }

    let without_code = db
        .upazilas()
        .iter()
        .filter(|upazila| upazila.postal_code.is_none())
        .count();
    if without_code > 0 {
        warn!(
            "{} of {} upazilas have no postal code of their own",
            without_code, stats.total_upazilas
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    }

    Ok(())
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Command-line entry point for combining two WZDx feeds.
//!
//! Reads a vendor (source) feed and a state DOT (destination) feed,
//! merges overlapping work zones, and writes the combined destination
//! feed. Nothing is written when no work zones overlap.

use std::path::{Path, PathBuf};

use clap::Parser;
use wzdx_combine::{CombineConfig, CombineError, reconcile_with};
use wzdx_feed_models::FeedCollection;

#[derive(Parser)]
#[command(
    name = "wzdx_combine",
    about = "Combine overlapping work zones from two WZDx feeds"
)]
struct Cli {
    /// WZDx feed whose matching work zones are merged in (e.g. iCone)
    #[arg(long)]
    source: PathBuf,
    /// WZDx feed that receives the merge (e.g. the state DOT feed)
    #[arg(long)]
    destination: PathBuf,
    /// Where to write the combined feed
    #[arg(long)]
    output: PathBuf,
    /// TOML configuration file (defaults to the embedded `combine.toml`)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the buffer corridor width from the configuration
    #[arg(long)]
    polygon_width_meters: Option<f64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CombineConfig::load(path)?,
        None => CombineConfig::default(),
    };
    if let Some(meters) = cli.polygon_width_meters {
        config = config.with_polygon_width_meters(meters)?;
    }

    let source = read_feed(&cli.source)?;
    let destination = read_feed(&cli.destination)?;

    match reconcile_with(&source, &destination, &config) {
        Some(combined) => {
            write_feed(&cli.output, &combined)?;
            log::info!("Combined feed written to {}", cli.output.display());
        }
        None => {
            log::info!("Nothing to combine; {} not written", cli.output.display());
        }
    }

    Ok(())
}

fn read_feed(path: &Path) -> Result<FeedCollection, CombineError> {
    let contents = std::fs::read_to_string(path)?;
    let feed: FeedCollection = serde_json::from_str(&contents)?;
    log::info!(
        "Read {} features from {}",
        feed.features.len(),
        path.display()
    );
    Ok(feed)
}

fn write_feed(path: &Path, feed: &FeedCollection) -> Result<(), CombineError> {
    let json = serde_json::to_string_pretty(feed)?;
    std::fs::write(path, json)?;
    Ok(())
}

//! Map command handler
//!
//! Fetches the fleet, clusters it for a zoom level and prints a snapshot.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::get_geocoder;
use crate::map::{refresh, MapSnapshot};
use crate::store::{FleetSource, MemorySource, RestStore};
use clap::Args;

/// Map command arguments
#[derive(Args)]
pub struct MapArgs {
    /// Zoom level (lower is further out)
    #[arg(long, short = 'z')]
    pub zoom: Option<u8>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Use generated demo data instead of the store
    #[arg(long)]
    pub demo: bool,

    /// Seed for demo data
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of demo containers
    #[arg(long, default_value = "60")]
    pub count: usize,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the map command
pub async fn run(args: MapArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;
    let zoom = args.zoom.unwrap_or(config.defaults.zoom);
    let format = args.format.clone().unwrap_or(config.defaults.format.clone());

    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let snapshot = if args.demo {
        snapshot_from(&MemorySource::demo(args.seed, args.count), &config, zoom).await?
    } else {
        snapshot_from(&RestStore::from_config(&config.store)?, &config, zoom).await?
    };

    let output = formatter.format(&snapshot, &config)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

async fn snapshot_from<S: FleetSource>(source: &S, config: &Config, zoom: u8) -> Result<MapSnapshot> {
    let geocoder = get_geocoder(config);
    refresh(source, zoom, &config.cluster_settings(), &geocoder).await
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}

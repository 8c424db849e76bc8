//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod geocode;
pub mod map;
pub mod point;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Container and route map for logistics fleets
#[derive(Parser)]
#[command(name = "fleetmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve location names to coordinates
    Geocode(geocode::GeocodeArgs),

    /// Encode or decode point literals
    Point(point::PointArgs),

    /// Fetch the fleet and print a map snapshot
    Map(map::MapArgs),

    /// Generate demo rows, optionally writing them to the store
    Seed(seed::SeedArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over `default_level` when set.
fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Serve(_)) {
        init_logging("info");
    } else {
        init_logging("warn");
    }

    match cli.command {
        Commands::Geocode(args) => geocode::run(args),
        Commands::Point(args) => point::run(args),
        Commands::Map(args) => map::run(args).await,
        Commands::Seed(args) => seed::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

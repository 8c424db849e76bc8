//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.

use crate::config::Config;
use crate::error::Result;
use crate::server;
use crate::store::{MemorySource, RestStore};
use clap::Args;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Serve generated demo data instead of the store
    #[arg(long)]
    pub demo: bool,

    /// Seed for demo data
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of demo containers
    #[arg(long, default_value = "60")]
    pub count: usize,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!(
        "Starting fleetmap server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );

    if args.demo {
        info!("Serving demo fleet (seed {}, {} containers)", args.seed, args.count);
        server::run(config, MemorySource::demo(args.seed, args.count)).await
    } else {
        let store = RestStore::from_config(&config.store)?;
        server::run(config, store).await
    }
}

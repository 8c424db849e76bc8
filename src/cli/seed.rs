//! Seed command handler
//!
//! Generates demo container and route rows. Without `--push` the rows are
//! printed as JSON; with it they are inserted into the configured store.

use crate::config::Config;
use crate::error::Result;
use crate::store::{MemorySource, RestStore};
use clap::Args;

/// Seed command arguments
#[derive(Args)]
pub struct SeedArgs {
    /// Number of containers to generate
    #[arg(long, short = 'n', default_value = "60")]
    pub count: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Insert the rows into the store instead of printing them
    #[arg(long)]
    pub push: bool,
}

/// Run the seed command
pub async fn run(args: SeedArgs) -> Result<()> {
    let demo = MemorySource::demo(args.seed, args.count);

    if !args.push {
        let value = serde_json::json!({
            "containers": demo.containers(),
            "routes": demo.routes(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let config = Config::load()?;
    let store = RestStore::from_config(&config.store)?;

    store.insert_containers(demo.containers()).await?;
    store.insert_routes(demo.routes()).await?;

    eprintln!(
        "Inserted {} containers and {} routes",
        demo.containers().len(),
        demo.routes().len()
    );
    Ok(())
}

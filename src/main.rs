//! fleetmap CLI entry point
//!
//! Container and route map - CLI + web app

use fleetmap::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

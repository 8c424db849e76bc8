//! Geocode command handler

use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_geocoder, GeocodeSource, Geocoder};
use clap::Args;

/// Geocode command arguments
#[derive(Args)]
pub struct GeocodeArgs {
    /// Location names to resolve
    #[arg(required_unless_present = "list")]
    pub locations: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// List the named locations the geocoder knows
    #[arg(long)]
    pub list: bool,
}

/// Run the geocode command
pub fn run(args: GeocodeArgs) -> Result<()> {
    let config = Config::load()?;
    let geocoder = get_geocoder(&config);

    if args.list {
        for loc in geocoder.locations() {
            println!("{:<20} {}", loc.name, loc.coords);
        }
        return Ok(());
    }

    for location in &args.locations {
        let result = geocoder.resolve(location);

        if args.json {
            let value = serde_json::json!({
                "query": location,
                "lat": result.coords.lat,
                "lng": result.coords.lng,
                "source": result.source,
            });
            println!("{}", value);
        } else {
            let source = match &result.source {
                GeocodeSource::Table { name } => format!("matched {}", name),
                GeocodeSource::Fallback => "fallback".to_string(),
            };
            println!("{}: {} ({})", location, result.coords, source);
        }
    }

    Ok(())
}

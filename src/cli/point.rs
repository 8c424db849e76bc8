//! Point command handler
//!
//! Converts between coordinates and the store's point literal.

use crate::coord::point::{decode, encode};
use crate::coord::Coordinates;
use crate::error::Result;
use clap::{Args, Subcommand};

/// Point command arguments
#[derive(Args)]
pub struct PointArgs {
    #[command(subcommand)]
    pub action: PointAction,
}

#[derive(Subcommand)]
pub enum PointAction {
    /// Coordinates to point literal
    Encode {
        /// Latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },

    /// Point literal to coordinates
    Decode {
        /// Literal such as "(79.86,6.93)"
        #[arg(allow_hyphen_values = true)]
        literal: String,
    },
}

/// Run the point command
pub fn run(args: PointArgs) -> Result<()> {
    match args.action {
        PointAction::Encode { lat, lng } => {
            let coords = Coordinates::new(lat, lng);
            coords.validate()?;
            println!("{}", encode(coords));
        }
        PointAction::Decode { literal } => {
            let coords = decode(&literal)?;
            println!("lat={} lng={}", coords.lat, coords.lng);
        }
    }
    Ok(())
}

//! Geocoding module
//!
//! Turns the free-text location stored on a container row into coordinates.
//! Resolution is local and synchronous: a static table of named places, with
//! a deterministic synthetic position for anything the table does not know.

pub mod lookup;

use crate::config::Config;
use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

pub use lookup::{NamedLocation, StaticGeocoder};

/// Where a geocoded coordinate came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeocodeSource {
    /// Matched an entry of the named location table
    Table { name: String },
    /// No match; position derived from a hash of the input
    Fallback,
}

/// A geocoded location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geocoded {
    pub coords: Coordinates,
    pub source: GeocodeSource,
}

/// Trait for location resolvers
///
/// Implementations are total: every input, including an empty string,
/// resolves to some coordinate, and the same input always resolves to the
/// same coordinate.
pub trait Geocoder: Send + Sync {
    /// Resolve a location and report how it was resolved
    fn resolve(&self, location: &str) -> Geocoded;

    /// Resolve a location to coordinates
    fn geocode(&self, location: &str) -> Coordinates {
        self.resolve(location).coords
    }
}

/// Get the geocoder described by the configuration
pub fn get_geocoder(config: &Config) -> StaticGeocoder {
    let center = Coordinates::new(config.geocoder.center_lat, config.geocoder.center_lng);
    let extra = config
        .geocoder
        .locations
        .iter()
        .map(|(name, [lat, lng])| NamedLocation::new(name.clone(), Coordinates::new(*lat, *lng)));

    StaticGeocoder::with_fallback(
        center,
        config.geocoder.fallback_min_offset,
        config.geocoder.fallback_max_offset,
    )
    .with_locations(extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_source_serialization() {
        let json = serde_json::to_string(&GeocodeSource::Table {
            name: "Colombo".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"table","name":"Colombo"}"#);

        let json = serde_json::to_string(&GeocodeSource::Fallback).unwrap();
        assert_eq!(json, r#"{"type":"fallback"}"#);
    }

    #[test]
    fn test_get_geocoder_uses_config_locations() {
        let mut config = Config::default();
        config
            .geocoder
            .locations
            .insert("Depot 7".to_string(), [7.0, 80.0]);

        let geocoder = get_geocoder(&config);
        let result = geocoder.resolve("depot 7");
        assert_eq!(result.coords, Coordinates::new(7.0, 80.0));
        assert_eq!(
            result.source,
            GeocodeSource::Table {
                name: "Depot 7".to_string()
            }
        );
    }
}

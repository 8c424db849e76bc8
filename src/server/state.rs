//! Server shared state
//!
//! Holds the data source and the pure map components built from config.

use crate::cluster::ClusterSettings;
use crate::config::Config;
use crate::geo::{get_geocoder, StaticGeocoder};
use crate::store::FleetSource;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState<S> {
    /// Fleet rows are fetched from here on every map request
    pub source: S,

    pub geocoder: StaticGeocoder,

    pub cluster: ClusterSettings,

    /// Zoom used when a request does not give one
    pub default_zoom: u8,

    started: Instant,
}

impl<S: FleetSource> AppState<S> {
    /// Create new application state
    pub fn new(config: Config, source: S) -> Self {
        Self {
            source,
            geocoder: get_geocoder(&config),
            cluster: config.cluster_settings(),
            default_zoom: config.defaults.zoom,
            started: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

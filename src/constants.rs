//! Centralized constants for the fleetmap crate
//!
//! Values shared by more than one module live here.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Default map center latitude (Colombo)
    pub const DEFAULT_CENTER_LAT: f64 = 6.9271;

    /// Default map center longitude (Colombo)
    pub const DEFAULT_CENTER_LNG: f64 = 79.8612;
}

/// Hosted store REST conventions
pub mod store {
    /// Path prefix of the REST API on the hosted store
    pub const REST_PATH: &str = "/rest/v1";

    /// Table holding container rows
    pub const CONTAINERS_TABLE: &str = "containers";

    /// Table holding route rows
    pub const ROUTES_TABLE: &str = "routes";

    /// User agent sent with every store request
    pub const USER_AGENT: &str = concat!("fleetmap/", env!("CARGO_PKG_VERSION"));
}

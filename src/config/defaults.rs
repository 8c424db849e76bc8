//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Clustering needs strictly more markers than this
pub const DEFAULT_CLUSTER_MIN_MARKERS: usize = 10;

/// Clustering needs a zoom level strictly below this
pub const DEFAULT_CLUSTER_MAX_ZOOM: u8 = 8;

/// Grouping distance for clustering, in degrees
pub const DEFAULT_CLUSTER_RADIUS_DEG: f64 = 0.5;

/// Smallest offset of a fallback-geocoded position from the center, in degrees
pub const DEFAULT_FALLBACK_MIN_OFFSET: f64 = 0.05;

/// Largest offset of a fallback-geocoded position from the center, in degrees
pub const DEFAULT_FALLBACK_MAX_OFFSET: f64 = 0.5;

/// Default zoom level when none is given
pub const DEFAULT_ZOOM: u8 = 7;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Store request timeout in seconds
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 15;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "fleetmap";

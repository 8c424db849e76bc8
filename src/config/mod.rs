//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/fleetmap/config.toml

pub mod defaults;

use crate::cluster::ClusterSettings;
use crate::constants::geo::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG};
use crate::constants::store::{CONTAINERS_TABLE, ROUTES_TABLE};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use tracing::warn;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for CLI commands
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Marker clustering thresholds
    #[serde(default)]
    pub cluster: ClusterConfig,

    /// Geocoder center and fallback area
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Hosted store connection
    #[serde(default)]
    pub store: StoreConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Default values for CLI commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Clustering thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default = "default_min_markers")]
    pub min_markers: usize,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,

    #[serde(default = "default_radius_deg")]
    pub radius_deg: f64,
}

/// Geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Center of the fallback area
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    #[serde(default = "default_center_lng")]
    pub center_lng: f64,

    /// Fallback offset range in degrees
    #[serde(default = "default_fallback_min_offset")]
    pub fallback_min_offset: f64,

    #[serde(default = "default_fallback_max_offset")]
    pub fallback_max_offset: f64,

    /// Extra named locations: name = [lat, lng]
    #[serde(default)]
    pub locations: BTreeMap<String, [f64; 2]>,
}

/// Hosted store connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project base URL; empty means not configured
    #[serde(default)]
    pub url: String,

    /// Project API key sent with every request
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_containers_table")]
    pub containers_table: String,

    #[serde(default = "default_routes_table")]
    pub routes_table: String,

    /// Request timeout in seconds
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_min_markers() -> usize {
    DEFAULT_CLUSTER_MIN_MARKERS
}
fn default_max_zoom() -> u8 {
    DEFAULT_CLUSTER_MAX_ZOOM
}
fn default_radius_deg() -> f64 {
    DEFAULT_CLUSTER_RADIUS_DEG
}
fn default_center_lat() -> f64 {
    DEFAULT_CENTER_LAT
}
fn default_center_lng() -> f64 {
    DEFAULT_CENTER_LNG
}
fn default_fallback_min_offset() -> f64 {
    DEFAULT_FALLBACK_MIN_OFFSET
}
fn default_fallback_max_offset() -> f64 {
    DEFAULT_FALLBACK_MAX_OFFSET
}
fn default_containers_table() -> String {
    CONTAINERS_TABLE.to_string()
}
fn default_routes_table() -> String {
    ROUTES_TABLE.to_string()
}
fn default_store_timeout() -> u64 {
    DEFAULT_STORE_TIMEOUT_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},{zoom}z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map={zoom}/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}&z={zoom}".to_string(),
    );
    providers
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            format: default_format(),
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_markers: default_min_markers(),
            max_zoom: default_max_zoom(),
            radius_deg: default_radius_deg(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            fallback_min_offset: default_fallback_min_offset(),
            fallback_max_offset: default_fallback_max_offset(),
            locations: BTreeMap::new(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            containers_table: default_containers_table(),
            routes_table: default_routes_table(),
            timeout_secs: default_store_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

/// Parse a config value, naming the key on failure
fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
}

/// Parse a float that must be finite and inside `range`
fn parse_float(key: &str, value: &str, range: RangeInclusive<f64>) -> Result<f64> {
    let parsed: f64 = parse_value(key, value)?;
    if parsed.is_finite() && range.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(Error::Config(format!(
            "Invalid value for {}: {} (expected {} to {})",
            key,
            value,
            range.start(),
            range.end()
        )))
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "zoom"] => Some(self.defaults.zoom.to_string()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["cluster", "min_markers"] => Some(self.cluster.min_markers.to_string()),
            ["cluster", "max_zoom"] => Some(self.cluster.max_zoom.to_string()),
            ["cluster", "radius_deg"] => Some(self.cluster.radius_deg.to_string()),

            ["geocoder", "center_lat"] => Some(self.geocoder.center_lat.to_string()),
            ["geocoder", "center_lng"] => Some(self.geocoder.center_lng.to_string()),
            ["geocoder", "fallback_min_offset"] => {
                Some(self.geocoder.fallback_min_offset.to_string())
            }
            ["geocoder", "fallback_max_offset"] => {
                Some(self.geocoder.fallback_max_offset.to_string())
            }

            ["store", "url"] => Some(self.store.url.clone()),
            ["store", "api_key"] => Some(self.store.api_key.clone()),
            ["store", "containers_table"] => Some(self.store.containers_table.clone()),
            ["store", "routes_table"] => Some(self.store.routes_table.clone()),
            ["store", "timeout_secs"] => Some(self.store.timeout_secs.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "zoom"] => self.defaults.zoom = parse_value(key, value)?,
            ["defaults", "format"] => self.defaults.format = value.to_string(),

            ["cluster", "min_markers"] => self.cluster.min_markers = parse_value(key, value)?,
            ["cluster", "max_zoom"] => self.cluster.max_zoom = parse_value(key, value)?,
            ["cluster", "radius_deg"] => {
                self.cluster.radius_deg = parse_float(key, value, 0.0..=f64::MAX)?
            }

            ["geocoder", "center_lat"] => {
                self.geocoder.center_lat = parse_float(key, value, -90.0..=90.0)?
            }
            ["geocoder", "center_lng"] => {
                self.geocoder.center_lng = parse_float(key, value, -180.0..=180.0)?
            }
            ["geocoder", "fallback_min_offset"] => {
                self.geocoder.fallback_min_offset = parse_float(key, value, 0.0..=90.0)?
            }
            ["geocoder", "fallback_max_offset"] => {
                self.geocoder.fallback_max_offset = parse_float(key, value, 0.0..=90.0)?
            }

            ["store", "url"] => self.store.url = value.trim_end_matches('/').to_string(),
            ["store", "api_key"] => self.store.api_key = value.to_string(),
            ["store", "containers_table"] => self.store.containers_table = value.to_string(),
            ["store", "routes_table"] => self.store.routes_table = value.to_string(),
            ["store", "timeout_secs"] => self.store.timeout_secs = parse_value(key, value)?,

            ["server", "host"] => self.server.host = value.to_string(),
            ["server", "port"] => self.server.port = parse_value(key, value)?,

            ["url", "default"] => self.url.default = value.to_string(),

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.zoom",
            "defaults.format",
            "cluster.min_markers",
            "cluster.max_zoom",
            "cluster.radius_deg",
            "geocoder.center_lat",
            "geocoder.center_lng",
            "geocoder.fallback_min_offset",
            "geocoder.fallback_max_offset",
            "store.url",
            "store.api_key",
            "store.containers_table",
            "store.routes_table",
            "store.timeout_secs",
            "server.host",
            "server.port",
            "url.default",
        ]
    }

    /// Clustering thresholds as used by the engine
    ///
    /// A non-finite or negative radius from a hand-edited file falls back to
    /// the default.
    pub fn cluster_settings(&self) -> ClusterSettings {
        let radius_deg = self.cluster.radius_deg;
        let radius_deg = if radius_deg.is_finite() && radius_deg >= 0.0 {
            radius_deg
        } else {
            warn!("Invalid cluster.radius_deg {}; using default", radius_deg);
            DEFAULT_CLUSTER_RADIUS_DEG
        };

        ClusterSettings {
            min_markers: self.cluster.min_markers,
            max_zoom: self.cluster.max_zoom,
            radius_deg,
        }
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat}, {lng} and {zoom} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64, zoom: u8) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string())
            .replace("{zoom}", &zoom.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

//! fleetmap: container and route map core for logistics dashboards
//!
//! Turns rows from a hosted fleet store into what a map view renders.
//!
//! ## Features
//!
//! - Local geocoding of free-text locations, with a deterministic fallback
//! - Codec for the store's `"(x,y)"` point literal
//! - Zoom-gated proximity clustering of container markers
//! - JSON, text, GPX and URL output
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use fleetmap::cluster::{cluster, ClusterSettings};
//! use fleetmap::coord::point;
//! use fleetmap::fleet::{ContainerStatus, Marker};
//! use fleetmap::geo::{Geocoder, StaticGeocoder};
//!
//! let geocoder = StaticGeocoder::new();
//! let colombo = geocoder.geocode("Colombo");
//! assert_eq!(point::encode(colombo), "(79.8612,6.9271)");
//!
//! let markers: Vec<Marker> = (0..5)
//!     .map(|i| Marker::new(i.to_string(), "Reefer", "Colombo", colombo, ContainerStatus::Active))
//!     .collect();
//! let settings = ClusterSettings { min_markers: 3, max_zoom: 5, radius_deg: 0.01 };
//!
//! let shown = cluster(markers, 3, &settings);
//! assert_eq!(shown.len(), 1);
//! assert_eq!(shown[0].size(), 5);
//! ```

pub mod cli;
pub mod cluster;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod fleet;
pub mod format;
pub mod geo;
pub mod map;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use cluster::{ClusterMarker, ClusterSettings, MapMarker};
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use fleet::{ContainerStatus, Marker, Route};
pub use map::MapSnapshot;

//! Output formatters
//!
//! Provides trait-based output formatting for map snapshots.

pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::map::MapSnapshot;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a map snapshot
    fn format(&self, snapshot: &MapSnapshot, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    ["json", "text", "gpx", "url"]
        .into_iter()
        .filter_map(get_formatter)
        .map(|f| FormatInfo {
            name: f.name().to_string(),
            description: f.description().to_string(),
        })
        .collect()
}

/// Snapshot used by the formatter tests
#[cfg(test)]
pub(crate) fn test_snapshot() -> MapSnapshot {
    use crate::cluster::ClusterSettings;
    use crate::geo::StaticGeocoder;
    use crate::map::build_snapshot;
    use crate::store::MemorySource;

    let demo = MemorySource::demo(12345, 20);
    let settings = ClusterSettings {
        min_markers: 5,
        max_zoom: 8,
        radius_deg: 0.2,
    };
    build_snapshot(
        demo.containers().to_vec(),
        demo.routes().to_vec(),
        6,
        &settings,
        &StaticGeocoder::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("gpx").is_some());
        assert!(get_formatter("url").is_some());
        assert!(get_formatter("unknown").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("Text").is_some());
        assert!(get_formatter("GPX").is_some());
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 4);
        assert!(formats.iter().any(|f| f.name == "json"));
        assert!(formats.iter().any(|f| f.name == "gpx"));
        assert!(formats.iter().all(|f| !f.description.is_empty()));
    }
}

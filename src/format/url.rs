//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::MapSnapshot;

/// URL formatter - one map link per marker
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URLs with optional provider override
    pub fn format_with_provider(
        &self,
        snapshot: &MapSnapshot,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        let mut lines = Vec::with_capacity(snapshot.markers.len());
        for marker in &snapshot.markers {
            let coords = marker.coords();
            let url = config.format_url(provider, coords.lat, coords.lng, snapshot.zoom)?;
            lines.push(format!("{}\t{}", marker.id(), url));
        }
        Ok(lines.join("\n"))
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL per marker"
    }

    fn format(&self, snapshot: &MapSnapshot, config: &Config) -> Result<String> {
        self.format_with_provider(snapshot, config, None)
    }
}

//! Human-readable text output formatter

use crate::cluster::MapMarker;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::MapSnapshot;

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, snapshot: &MapSnapshot, _config: &Config) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("fleetmap snapshot ({})\n", snapshot.id));
        output.push_str(&format!(
            "Generated: {}\n",
            snapshot.generated_at.to_rfc3339()
        ));
        output.push_str(&format!(
            "Zoom: {}{}\n",
            snapshot.zoom,
            if snapshot.clustered { " (clustered)" } else { "" }
        ));
        output.push_str(&format!(
            "Containers: {} shown as {} markers\n\n",
            snapshot.container_count,
            snapshot.markers.len()
        ));

        output.push_str("Markers:\n");
        if snapshot.markers.is_empty() {
            output.push_str("  (none)\n");
        }
        for marker in &snapshot.markers {
            match marker {
                MapMarker::Single(m) => {
                    output.push_str(&format!(
                        "  {} {:<24} {:<8} {}",
                        m.coords, m.name, m.status, m.location
                    ));
                    if let Some(battery) = m.telemetry.battery_level {
                        output.push_str(&format!(" [battery {:.0}%]", battery));
                    }
                    output.push('\n');
                }
                MapMarker::Cluster(c) => {
                    output.push_str(&format!(
                        "  {} cluster of {:<13} {:<8}\n",
                        c.coords, c.cluster_size, c.status
                    ));
                }
            }
        }

        output.push_str("\nRoutes:\n");
        if snapshot.routes.is_empty() {
            output.push_str("  (none)\n");
        }
        for route in &snapshot.routes {
            output.push_str(&format!(
                "  {:<28} {:>7.1} km  {}/{} delayed  risk {}\n",
                route.name,
                route.distance_km(),
                route.delayed_shipments,
                route.total_shipments,
                route.risk_level
            ));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_snapshot;

    #[test]
    fn test_text_format() {
        let snapshot = test_snapshot();
        let output = TextFormatter.format(&snapshot, &Config::default()).unwrap();

        assert!(output.contains("fleetmap snapshot"));
        assert!(output.contains("Zoom: 6 (clustered)"));
        assert!(output.contains("Markers:"));
        assert!(output.contains("cluster of"));
        assert!(output.contains("Routes:"));
        assert!(output.contains("Colombo - Kandy"));
        assert!(output.contains("km"));
    }

    #[test]
    fn test_text_format_empty() {
        let mut snapshot = test_snapshot();
        snapshot.markers.clear();
        snapshot.routes.clear();
        let output = TextFormatter.format(&snapshot, &Config::default()).unwrap();
        assert_eq!(output.matches("(none)").count(), 2);
    }

    #[test]
    fn test_text_formatter_info() {
        assert_eq!(TextFormatter.name(), "text");
        assert!(!TextFormatter.description().is_empty());
    }
}

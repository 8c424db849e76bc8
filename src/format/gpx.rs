//! GPX output formatter

use crate::cluster::MapMarker;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::MapSnapshot;

/// GPX formatter - markers as waypoints, routes as `<rte>` elements
pub struct GpxFormatter;

/// Escape text for XML element content
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoints and routes"
    }

    fn format(&self, snapshot: &MapSnapshot, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="fleetmap">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>fleetmap snapshot {}</name>\n", snapshot.id));
        gpx.push_str(&format!(
            "    <time>{}</time>\n",
            snapshot.generated_at.to_rfc3339()
        ));
        gpx.push_str("  </metadata>\n");

        for marker in &snapshot.markers {
            let coords = marker.coords();
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                coords.lat, coords.lng
            ));
            gpx.push('\n');

            match marker {
                MapMarker::Single(m) => {
                    gpx.push_str(&format!("    <name>{}</name>\n", escape(&m.name)));
                    gpx.push_str(&format!(
                        "    <desc>{} ({})</desc>\n",
                        escape(&m.location),
                        m.status
                    ));
                    gpx.push_str("    <sym>container</sym>\n");
                }
                MapMarker::Cluster(c) => {
                    gpx.push_str(&format!(
                        "    <name>{} containers</name>\n",
                        c.cluster_size
                    ));
                    let names: Vec<String> = c.members.iter().map(|m| escape(&m.name)).collect();
                    gpx.push_str(&format!(
                        "    <desc>{} ({})</desc>\n",
                        names.join(", "),
                        c.status
                    ));
                    gpx.push_str("    <sym>cluster</sym>\n");
                }
            }

            gpx.push_str("  </wpt>\n");
        }

        for route in &snapshot.routes {
            gpx.push_str("  <rte>\n");
            gpx.push_str(&format!("    <name>{}</name>\n", escape(&route.name)));
            gpx.push_str(&format!(
                "    <desc>{}/{} delayed, risk {}</desc>\n",
                route.delayed_shipments, route.total_shipments, route.risk_level
            ));
            for point in [route.origin, route.destination] {
                gpx.push_str(&format!(
                    "    <rtept lat=\"{}\" lon=\"{}\"/>\n",
                    point.lat, point.lng
                ));
            }
            gpx.push_str("  </rte>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_snapshot;

    #[test]
    fn test_gpx_format() {
        let snapshot = test_snapshot();
        let output = GpxFormatter.format(&snapshot, &Config::default()).unwrap();

        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1""#));
        assert_eq!(output.matches("<wpt").count(), snapshot.markers.len());
        assert_eq!(output.matches("<rte>").count(), snapshot.routes.len());
        assert_eq!(output.matches("<rtept").count(), 2 * snapshot.routes.len());
        assert!(output.ends_with("</gpx>\n"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("A & B <x>"), "A &amp; B &lt;x&gt;");
    }

    #[test]
    fn test_gpx_formatter_info() {
        assert_eq!(GpxFormatter.name(), "gpx");
        assert!(!GpxFormatter.description().is_empty());
    }
}

//! In-memory fleet source
//!
//! Holds rows directly. `demo` builds a reproducible sample fleet from a
//! seed, which backs `--demo` mode and the `seed` command.

use crate::error::Result;
use crate::fleet::{ContainerRow, RouteRow};
use crate::geo::{Geocoder, StaticGeocoder};
use crate::store::FleetSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Locations assigned to demo containers; the last two are not in the
/// geocoder's table and exercise its fallback
const DEMO_LOCATIONS: &[&str] = &[
    "Colombo",
    "Colombo Port",
    "Kandy",
    "Galle",
    "Negombo",
    "Katunayake",
    "Jaffna",
    "Trincomalee",
    "Hambantota",
    "Kurunegala",
    "Matara",
    "Biyagama Free Zone",
    "Inland Depot 3",
];

/// Demo route endpoints, by location name
const DEMO_ROUTES: &[(&str, &str)] = &[
    ("Colombo", "Kandy"),
    ("Colombo", "Galle"),
    ("Colombo", "Jaffna"),
    ("Kandy", "Trincomalee"),
    ("Galle", "Hambantota"),
    ("Negombo", "Kurunegala"),
];

/// Fleet source backed by rows in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    containers: Vec<ContainerRow>,
    routes: Vec<RouteRow>,
}

impl MemorySource {
    pub fn new(containers: Vec<ContainerRow>, routes: Vec<RouteRow>) -> Self {
        Self { containers, routes }
    }

    /// Build a sample fleet of `count` containers plus a fixed set of routes
    ///
    /// The same seed always produces the same rows.
    pub fn demo(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let geocoder = StaticGeocoder::new();

        let containers = (0..count)
            .map(|i| {
                let location = DEMO_LOCATIONS[rng.gen_range(0..DEMO_LOCATIONS.len())];
                let roll: f64 = rng.gen();
                let status = if roll < 0.1 {
                    "warning"
                } else if roll < 0.25 {
                    "inactive"
                } else {
                    "active"
                };

                ContainerRow {
                    id: format!("demo-{:04}", i + 1),
                    name: format!("Container {:04}", i + 1),
                    location: Some(location.to_string()),
                    status: Some(status.to_string()),
                    temperature: Some(round1(rng.gen_range(-5.0..30.0))),
                    humidity: Some(round1(rng.gen_range(20.0..95.0))),
                    battery_level: Some(round1(rng.gen_range(5.0..100.0))),
                }
            })
            .collect();

        let routes = DEMO_ROUTES
            .iter()
            .enumerate()
            .map(|(i, &(from, to))| {
                let total: u32 = rng.gen_range(0..40);
                let delayed = if total == 0 { 0 } else { rng.gen_range(0..=total / 2) };
                let ratio = if total == 0 { 0.0 } else { delayed as f64 / total as f64 };
                let risk = if total == 0 {
                    "unknown"
                } else if ratio >= 0.3 {
                    "high"
                } else if ratio >= 0.1 {
                    "medium"
                } else {
                    "low"
                };

                let mut row = RouteRow::new(
                    format!("route-{}", i + 1),
                    format!("{} - {}", from, to),
                    geocoder.geocode(from),
                    geocoder.geocode(to),
                );
                row.total_shipments = Some(total);
                row.delayed_shipments = Some(delayed);
                row.risk_level = Some(risk.to_string());
                row
            })
            .collect();

        Self { containers, routes }
    }

    pub fn containers(&self) -> &[ContainerRow] {
        &self.containers
    }

    pub fn routes(&self) -> &[RouteRow] {
        &self.routes
    }
}

impl FleetSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_containers(&self) -> Result<Vec<ContainerRow>> {
        Ok(self.containers.clone())
    }

    async fn fetch_routes(&self) -> Result<Vec<RouteRow>> {
        Ok(self.routes.clone())
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::point::decode;

    #[test]
    fn test_demo_is_reproducible() {
        let a = MemorySource::demo(42, 25);
        let b = MemorySource::demo(42, 25);
        assert_eq!(a.containers(), b.containers());
        assert_eq!(a.routes(), b.routes());

        let c = MemorySource::demo(43, 25);
        assert_ne!(a.containers(), c.containers());
    }

    #[test]
    fn test_demo_rows() {
        let demo = MemorySource::demo(7, 30);
        assert_eq!(demo.containers().len(), 30);
        assert_eq!(demo.routes().len(), DEMO_ROUTES.len());

        for row in demo.containers() {
            let status = row.status.as_deref().unwrap();
            assert!(["active", "inactive", "warning"].contains(&status));
            let battery = row.battery_level.unwrap();
            assert!((5.0..=100.0).contains(&battery));
        }

        for row in demo.routes() {
            assert!(decode(&row.origin).is_ok(), "bad origin {}", row.origin);
            assert!(decode(&row.destination).is_ok());
            assert!(row.delayed_shipments.unwrap() <= row.total_shipments.unwrap());
        }
    }

    #[test]
    fn test_demo_zero_containers() {
        let demo = MemorySource::demo(1, 0);
        assert!(demo.containers().is_empty());
        assert!(!demo.routes().is_empty());
    }

    #[tokio::test]
    async fn test_fetch() {
        let demo = MemorySource::demo(3, 4);
        assert_eq!(demo.fetch_containers().await.unwrap().len(), 4);
        assert_eq!(demo.fetch_routes().await.unwrap().len(), 6);
        assert_eq!(demo.name(), "memory");
    }
}

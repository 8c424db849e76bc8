//! Map snapshot assembly
//!
//! Turns raw store rows into what the map view renders:
//! rows → geocode / decode points → cluster → snapshot.

use crate::cluster::{cluster, ClusterSettings, MapMarker};
use crate::error::Result;
use crate::fleet::{ContainerRow, Route, RouteRow};
use crate::geo::{Geocoder, StaticGeocoder};
use crate::store::FleetSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Everything the map view needs for one refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSnapshot {
    /// Unique ID for this snapshot
    pub id: String,

    /// When the snapshot was built
    pub generated_at: DateTime<Utc>,

    /// Zoom level the markers were clustered for
    pub zoom: u8,

    /// Whether clustering was applied
    pub clustered: bool,

    /// Number of containers, before clustering
    pub container_count: usize,

    pub markers: Vec<MapMarker>,

    pub routes: Vec<Route>,
}

impl MapSnapshot {
    /// Number of cluster markers
    pub fn cluster_count(&self) -> usize {
        self.markers.iter().filter(|m| m.is_cluster()).count()
    }
}

/// Build a snapshot from rows
///
/// Route endpoints that fail to decode are placed at the geocoder's center.
pub fn build_snapshot(
    containers: Vec<ContainerRow>,
    routes: Vec<RouteRow>,
    zoom: u8,
    settings: &ClusterSettings,
    geocoder: &StaticGeocoder,
) -> MapSnapshot {
    let fallback = geocoder.center();
    build_snapshot_with(containers, routes, zoom, settings, geocoder, fallback)
}

/// Build a snapshot with any geocoder and an explicit route fallback point
pub fn build_snapshot_with(
    containers: Vec<ContainerRow>,
    routes: Vec<RouteRow>,
    zoom: u8,
    settings: &ClusterSettings,
    geocoder: &dyn Geocoder,
    route_fallback: crate::coord::Coordinates,
) -> MapSnapshot {
    let markers: Vec<_> = containers
        .into_iter()
        .map(|row| row.into_marker(geocoder))
        .collect();
    let container_count = markers.len();
    let clustered = !markers.is_empty() && settings.should_cluster(container_count, zoom);

    let markers = cluster(markers, zoom, settings);
    let routes = routes
        .into_iter()
        .map(|row| row.into_route(route_fallback))
        .collect();

    MapSnapshot {
        id: Uuid::new_v4().to_string(),
        generated_at: Utc::now(),
        zoom,
        clustered,
        container_count,
        markers,
        routes,
    }
}

/// Fetch both tables from `source` and build a snapshot
pub async fn refresh<S: FleetSource>(
    source: &S,
    zoom: u8,
    settings: &ClusterSettings,
    geocoder: &StaticGeocoder,
) -> Result<MapSnapshot> {
    let (containers, routes) = tokio::try_join!(source.fetch_containers(), source.fetch_routes())?;

    let snapshot = build_snapshot(containers, routes, zoom, settings, geocoder);
    info!(
        "Snapshot from {}: {} containers as {} markers ({} clusters), {} routes at zoom {}",
        source.name(),
        snapshot.container_count,
        snapshot.markers.len(),
        snapshot.cluster_count(),
        snapshot.routes.len(),
        zoom
    );
    Ok(snapshot)
}

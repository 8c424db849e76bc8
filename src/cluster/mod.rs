//! Marker clustering
//!
//! Zoomed-out views of a dense fleet collapse nearby containers into cluster
//! markers. Grouping is a greedy single pass in input order:
//!
//! 1. Take the next marker that is not yet in a group as the seed
//! 2. Collect every other ungrouped marker within `radius_deg` of the seed
//! 3. Two or more markers become one cluster; a lone seed stays as it is
//!
//! Cost is O(n²) in the number of markers, fine for the dozens to low
//! hundreds a fleet view holds. Larger datasets need a spatial index, and
//! switching to one must keep the seed-order tie-breaks above.
//!
//! Distance is measured in degree space with no latitude correction, so the
//! effective east-west radius shrinks toward the poles.

use crate::config::defaults::{
    DEFAULT_CLUSTER_MAX_ZOOM, DEFAULT_CLUSTER_MIN_MARKERS, DEFAULT_CLUSTER_RADIUS_DEG,
};
use crate::coord::Coordinates;
use crate::fleet::{ContainerStatus, Marker};
use serde::{Deserialize, Serialize};

/// Thresholds controlling when and how markers are grouped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterSettings {
    /// Clustering needs strictly more markers than this
    pub min_markers: usize,
    /// Clustering needs a zoom level strictly below this
    pub max_zoom: u8,
    /// Grouping distance in degrees
    pub radius_deg: f64,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            min_markers: DEFAULT_CLUSTER_MIN_MARKERS,
            max_zoom: DEFAULT_CLUSTER_MAX_ZOOM,
            radius_deg: DEFAULT_CLUSTER_RADIUS_DEG,
        }
    }
}

impl ClusterSettings {
    /// Whether a view with `count` markers at `zoom` should be clustered
    pub fn should_cluster(&self, count: usize, zoom: u8) -> bool {
        count > self.min_markers && zoom < self.max_zoom
    }
}

/// Several nearby containers shown as one marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterMarker {
    pub id: String,
    /// Mean position of the members
    pub coords: Coordinates,
    /// Most severe member status
    pub status: ContainerStatus,
    pub cluster_size: usize,
    pub members: Vec<Marker>,
}

impl ClusterMarker {
    /// Build a cluster from its members, first member being the seed
    ///
    /// Returns None for an empty member list.
    pub fn from_members(members: Vec<Marker>) -> Option<Self> {
        let seed = members.first()?;
        let id = format!("cluster-{}", seed.id);
        let coords = Coordinates::centroid(members.iter().map(|m| &m.coords))?;
        let status = members
            .iter()
            .map(|m| m.status)
            .fold(ContainerStatus::Active, ContainerStatus::worst);

        Some(Self {
            id,
            coords,
            status,
            cluster_size: members.len(),
            members,
        })
    }
}

/// A value the map renders: one container or a cluster of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapMarker {
    #[serde(rename = "container")]
    Single(Marker),
    Cluster(ClusterMarker),
}

impl MapMarker {
    pub fn id(&self) -> &str {
        match self {
            Self::Single(m) => &m.id,
            Self::Cluster(c) => &c.id,
        }
    }

    pub fn coords(&self) -> Coordinates {
        match self {
            Self::Single(m) => m.coords,
            Self::Cluster(c) => c.coords,
        }
    }

    pub fn status(&self) -> ContainerStatus {
        match self {
            Self::Single(m) => m.status,
            Self::Cluster(c) => c.status,
        }
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster(_))
    }

    /// Number of containers this marker stands for
    pub fn size(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Cluster(c) => c.cluster_size,
        }
    }
}

/// Cluster markers for display at `zoom`
///
/// When the settings' gate is closed, every marker comes back unchanged and
/// in order. An empty input always yields an empty output.
pub fn cluster(markers: Vec<Marker>, zoom: u8, settings: &ClusterSettings) -> Vec<MapMarker> {
    if markers.is_empty() || !settings.should_cluster(markers.len(), zoom) {
        return markers.into_iter().map(MapMarker::Single).collect();
    }

    group_by_proximity(markers, settings.radius_deg)
}

/// Greedy proximity grouping, ignoring the zoom gate
pub fn group_by_proximity(markers: Vec<Marker>, radius_deg: f64) -> Vec<MapMarker> {
    let n = markers.len();
    let mut group_of: Vec<Option<usize>> = vec![None; n];
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for seed in 0..n {
        if group_of[seed].is_some() {
            continue;
        }
        let gid = groups.len();
        group_of[seed] = Some(gid);
        let mut group = vec![seed];

        for other in (seed + 1)..n {
            if group_of[other].is_none()
                && markers[seed].coords.degree_distance(&markers[other].coords) <= radius_deg
            {
                group_of[other] = Some(gid);
                group.push(other);
            }
        }
        groups.push(group);
    }

    // Move markers into their groups without cloning
    let mut slots: Vec<Option<Marker>> = markers.into_iter().map(Some).collect();
    groups
        .into_iter()
        .filter_map(|indices| {
            let mut members: Vec<Marker> = indices.iter().filter_map(|&i| slots[i].take()).collect();
            if members.len() == 1 {
                members.pop().map(MapMarker::Single)
            } else {
                ClusterMarker::from_members(members).map(MapMarker::Cluster)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn marker(id: &str, lat: f64, lng: f64, status: ContainerStatus) -> Marker {
        Marker::new(id, format!("Container {}", id), "", Coordinates::new(lat, lng), status)
    }

    fn tight_settings() -> ClusterSettings {
        ClusterSettings {
            min_markers: 3,
            max_zoom: 5,
            radius_deg: 0.05,
        }
    }

    #[test]
    fn test_should_cluster_gate() {
        let s = tight_settings();

        // count <= min_markers never clusters
        for zoom in 0..=20 {
            assert!(!s.should_cluster(0, zoom));
            assert!(!s.should_cluster(3, zoom));
        }
        // zoom >= max_zoom never clusters
        for count in [0, 4, 100, 10_000] {
            assert!(!s.should_cluster(count, 5));
            assert!(!s.should_cluster(count, 18));
        }
        assert!(s.should_cluster(4, 4));
        assert!(s.should_cluster(100, 0));
    }

    #[test]
    fn test_five_close_markers_make_one_cluster() {
        let markers: Vec<Marker> = (0..5)
            .map(|i| {
                let d = i as f64 * 0.002;
                marker(&format!("c{}", i), 6.9271 + d, 79.8612 + d, ContainerStatus::Active)
            })
            .collect();

        let out = cluster(markers, 3, &tight_settings());
        assert_eq!(out.len(), 1);

        let MapMarker::Cluster(c) = &out[0] else {
            panic!("expected a cluster, got {:?}", out[0]);
        };
        assert_eq!(c.cluster_size, 5);
        assert_eq!(c.members.len(), 5);
        assert_eq!(c.id, "cluster-c0");
        assert_abs_diff_eq!(c.coords.lat, 6.9271 + 0.004, epsilon = 1e-9);
        assert_abs_diff_eq!(c.coords.lng, 79.8612 + 0.004, epsilon = 1e-9);
        let ids: Vec<&str> = c.members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["c0", "c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn test_far_apart_markers_unchanged() {
        let markers: Vec<Marker> = (0..6)
            .map(|i| marker(&format!("c{}", i), i as f64, i as f64 * 2.0, ContainerStatus::Active))
            .collect();

        let out = cluster(markers.clone(), 2, &tight_settings());
        assert_eq!(out.len(), markers.len());
        for (got, want) in out.iter().zip(&markers) {
            assert_eq!(got, &MapMarker::Single(want.clone()));
        }
    }

    #[test]
    fn test_gate_closed_returns_input() {
        let markers: Vec<Marker> = (0..5)
            .map(|i| marker(&format!("c{}", i), 7.0, 80.0, ContainerStatus::Active))
            .collect();

        // Zoomed in
        let out = cluster(markers.clone(), 5, &tight_settings());
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|m| !m.is_cluster()));

        // Too few markers
        let out = cluster(markers[..3].to_vec(), 0, &tight_settings());
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|m| !m.is_cluster()));
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster(Vec::new(), 0, &tight_settings()).is_empty());
        assert!(group_by_proximity(Vec::new(), 1.0).is_empty());
    }

    #[test]
    fn test_mixed_groups_keep_seed_order() {
        let markers = vec![
            marker("a1", 6.00, 80.00, ContainerStatus::Active),
            marker("lone", 9.00, 80.00, ContainerStatus::Active),
            marker("a2", 6.01, 80.01, ContainerStatus::Inactive),
            marker("b1", 7.50, 81.50, ContainerStatus::Active),
            marker("b2", 7.51, 81.50, ContainerStatus::Warning),
        ];

        let out = cluster(markers, 1, &tight_settings());
        let ids: Vec<&str> = out.iter().map(MapMarker::id).collect();
        assert_eq!(ids, ["cluster-a1", "lone", "cluster-b1"]);
        assert_eq!(out[0].status(), ContainerStatus::Inactive);
        assert_eq!(out[2].status(), ContainerStatus::Warning);
        assert_eq!(out.iter().map(MapMarker::size).sum::<usize>(), 5);
    }

    #[test]
    fn test_grouping_is_not_transitive() {
        // b is close to both a and c, but c is out of range of seed a
        let markers = vec![
            marker("a", 0.0, 0.00, ContainerStatus::Active),
            marker("b", 0.0, 0.04, ContainerStatus::Active),
            marker("c", 0.0, 0.08, ContainerStatus::Active),
        ];

        let out = group_by_proximity(markers, 0.05);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].size(), 2);
        assert_eq!(out[1].id(), "c");
    }

    #[test]
    fn test_cluster_status_warning_dominates() {
        let members = vec![
            marker("x", 1.0, 1.0, ContainerStatus::Inactive),
            marker("y", 1.0, 1.0, ContainerStatus::Warning),
            marker("z", 1.0, 1.0, ContainerStatus::Active),
        ];
        let c = ClusterMarker::from_members(members).unwrap();
        assert_eq!(c.status, ContainerStatus::Warning);
        assert!(ClusterMarker::from_members(Vec::new()).is_none());
    }

    #[test]
    fn test_map_marker_kind_flag() {
        let single = MapMarker::Single(marker("c1", 1.0, 2.0, ContainerStatus::Active));
        let json = serde_json::to_value(&single).unwrap();
        assert_eq!(json["kind"], "container");
        assert_eq!(json["id"], "c1");

        let cluster = MapMarker::Cluster(
            ClusterMarker::from_members(vec![
                marker("c1", 1.0, 2.0, ContainerStatus::Active),
                marker("c2", 1.0, 2.0, ContainerStatus::Active),
            ])
            .unwrap(),
        );
        let json = serde_json::to_value(&cluster).unwrap();
        assert_eq!(json["kind"], "cluster");
        assert_eq!(json["cluster_size"], 2);

        let back: MapMarker = serde_json::from_value(json).unwrap();
        assert_eq!(back, cluster);
    }
}

//! Fleet domain model
//!
//! Containers and routes as the map sees them. Values are rebuilt from the
//! store on every refresh and carry no identity beyond that.

pub mod rows;

use crate::coord::point::haversine_distance;
use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

pub use rows::{ContainerRow, RouteRow};

/// Operating status of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerStatus {
    Active,
    Inactive,
    Warning,
}

impl ContainerStatus {
    /// Rank used when several statuses collapse into one
    ///
    /// warning > inactive > active
    pub fn severity(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Inactive => 1,
            Self::Warning => 2,
        }
    }

    /// The more severe of two statuses
    pub fn worst(self, other: Self) -> Self {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }

    /// Lenient parse for values read from the store
    ///
    /// Unrecognized values count as inactive.
    pub fn from_store(s: &str) -> Self {
        s.parse().unwrap_or(Self::Inactive)
    }
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => f.pad("active"),
            Self::Inactive => f.pad("inactive"),
            Self::Warning => f.pad("warning"),
        }
    }
}

impl std::str::FromStr for ContainerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "warning" => Ok(Self::Warning),
            _ => Err(format!("Unknown container status: {}", s)),
        }
    }
}

/// Sensor readings reported by a container
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,
}

/// A container placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub name: String,
    /// Free-text location as stored
    pub location: String,
    pub coords: Coordinates,
    pub status: ContainerStatus,
    #[serde(default)]
    pub telemetry: Telemetry,
}

impl Marker {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        coords: Coordinates,
        status: ContainerStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            coords,
            status,
            telemetry: Telemetry::default(),
        }
    }

    pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = telemetry;
        self
    }
}

/// Delay risk on a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl RiskLevel {
    /// Lenient parse; anything unrecognized is `Unknown`
    pub fn from_store(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => f.pad("low"),
            Self::Medium => f.pad("medium"),
            Self::High => f.pad("high"),
            Self::Unknown => f.pad("unknown"),
        }
    }
}

/// A named path between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub total_shipments: u32,
    pub delayed_shipments: u32,
    pub risk_level: RiskLevel,
}

impl Route {
    /// Great-circle length of the route in kilometers
    pub fn distance_km(&self) -> f64 {
        haversine_distance(self.origin, self.destination) / 1000.0
    }

    /// Share of shipments running late, 0.0 when there are none
    pub fn delay_ratio(&self) -> f64 {
        if self.total_shipments == 0 {
            0.0
        } else {
            self.delayed_shipments as f64 / self.total_shipments as f64
        }
    }
}

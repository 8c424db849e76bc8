//! Store row shapes and their conversion into map values

use crate::coord::point::{decode_or, encode};
use crate::coord::Coordinates;
use crate::fleet::{ContainerStatus, Marker, RiskLevel, Route, Telemetry};
use crate::geo::Geocoder;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A row of the containers table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerRow {
    #[serde(deserialize_with = "row_id")]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub battery_level: Option<f64>,
}

impl ContainerRow {
    /// Geocode the row's location and build its marker
    pub fn into_marker(self, geocoder: &dyn Geocoder) -> Marker {
        let location = self.location.unwrap_or_default();
        let coords = geocoder.geocode(&location);
        let status = self
            .status
            .as_deref()
            .map(ContainerStatus::from_store)
            .unwrap_or(ContainerStatus::Inactive);

        let name = if self.name.is_empty() {
            self.id.clone()
        } else {
            self.name
        };

        Marker {
            id: self.id,
            name,
            location,
            coords,
            status,
            telemetry: Telemetry {
                temperature: self.temperature,
                humidity: self.humidity,
                battery_level: self.battery_level,
            },
        }
    }
}

/// A row of the routes table
///
/// `origin` and `destination` hold point literals, see [`crate::coord::point`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRow {
    #[serde(deserialize_with = "row_id")]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub origin: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub destination: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_shipments: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub delayed_shipments: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub risk_level: Option<String>,
}

impl RouteRow {
    /// Build a row from coordinates, encoding the endpoints
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            origin: encode(origin),
            destination: encode(destination),
            total_shipments: None,
            delayed_shipments: None,
            risk_level: None,
        }
    }

    /// Decode the endpoints and build the route
    ///
    /// An endpoint that is missing or fails to decode is placed at
    /// `fallback`. Delayed shipments are capped at the total.
    pub fn into_route(self, fallback: Coordinates) -> Route {
        let name = if self.name.is_empty() {
            self.id.clone()
        } else {
            self.name
        };
        let total_shipments = self.total_shipments.unwrap_or(0);

        Route {
            origin: decode_or(&self.origin, fallback),
            destination: decode_or(&self.destination, fallback),
            id: self.id,
            name,
            total_shipments,
            delayed_shipments: self.delayed_shipments.unwrap_or(0).min(total_shipments),
            risk_level: self
                .risk_level
                .as_deref()
                .map(RiskLevel::from_store)
                .unwrap_or_default(),
        }
    }
}

/// Any scalar a store column may hold
///
/// Columns are typed loosely on the store side: ids arrive as uuids or
/// integers, counts as numbers or numeric text, and any of them may be null.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawValue::deserialize(deserializer)? {
        RawValue::Text(s) => Some(s),
        RawValue::Int(n) => Some(n.to_string()),
        RawValue::Float(f) => Some(f.to_string()),
        RawValue::Other(_) => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

/// Row ids arrive as text (uuid) or integers depending on the table
fn row_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer)?.ok_or_else(|| serde::de::Error::custom("row id is null"))
}

fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawValue::deserialize(deserializer)? {
        RawValue::Int(n) => Some(n as f64),
        RawValue::Float(f) => Some(f),
        RawValue::Text(s) => s.trim().parse().ok(),
        RawValue::Other(_) => None,
    };
    Ok(value.filter(|v: &f64| v.is_finite()))
}

/// Shipment counts; negative, fractional or unparsable values count as missing
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawValue::deserialize(deserializer)? {
        RawValue::Int(n) => u32::try_from(n).ok(),
        RawValue::Float(f) if f.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&f) => {
            Some(f as u32)
        }
        RawValue::Float(_) => None,
        RawValue::Text(s) => s.trim().parse().ok(),
        RawValue::Other(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::StaticGeocoder;

    #[test]
    fn test_container_row_from_json() {
        let rows: Vec<ContainerRow> = serde_json::from_str(
            r#"[
                {"id": 17, "name": "Reefer 17", "location": "Galle", "status": "warning",
                 "temperature": 7.5, "humidity": 61.0, "battery_level": 12.0,
                 "last_updated": "2024-03-01T10:00:00Z"},
                {"id": "8b0c", "name": "Dry 2", "location": null, "status": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(rows[0].id, "17");
        assert_eq!(rows[1].id, "8b0c");
        assert_eq!(rows[1].location, None);
    }

    #[test]
    fn test_container_row_into_marker() {
        let geocoder = StaticGeocoder::new();
        let row = ContainerRow {
            id: "c1".to_string(),
            name: "Reefer 1".to_string(),
            location: Some("Galle Harbour".to_string()),
            status: Some("Warning".to_string()),
            temperature: Some(7.5),
            humidity: None,
            battery_level: Some(40.0),
        };

        let marker = row.into_marker(&geocoder);
        assert_eq!(marker.coords, Coordinates::new(6.0535, 80.2210));
        assert_eq!(marker.status, ContainerStatus::Warning);
        assert_eq!(marker.telemetry.temperature, Some(7.5));
        assert_eq!(marker.telemetry.battery_level, Some(40.0));
        assert_eq!(marker.location, "Galle Harbour");
    }

    #[test]
    fn test_container_row_missing_fields() {
        let geocoder = StaticGeocoder::new();
        let row: ContainerRow =
            serde_json::from_str(r#"{"id": 3, "name": "Unplaced"}"#).unwrap();

        let marker = row.into_marker(&geocoder);
        assert_eq!(marker.status, ContainerStatus::Inactive);
        assert_eq!(marker.location, "");
        assert_eq!(marker.coords, geocoder.geocode(""));
    }

    #[test]
    fn test_route_row_into_route() {
        let row: RouteRow = serde_json::from_str(
            r#"{"id": 5, "name": "Colombo - Kandy",
                "origin": "(79.8612,6.9271)", "destination": "(80.6337,7.2906)",
                "total_shipments": 12, "delayed_shipments": 3, "risk_level": "high"}"#,
        )
        .unwrap();

        let route = row.into_route(Coordinates::new(0.0, 0.0));
        assert_eq!(route.id, "5");
        assert_eq!(route.origin, Coordinates::new(6.9271, 79.8612));
        assert_eq!(route.destination, Coordinates::new(7.2906, 80.6337));
        assert_eq!(route.total_shipments, 12);
        assert_eq!(route.delayed_shipments, 3);
        assert_eq!(route.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_route_row_malformed_point_uses_fallback() {
        let fallback = Coordinates::new(6.9271, 79.8612);
        let row = RouteRow {
            id: "r9".to_string(),
            name: "Broken".to_string(),
            origin: "somewhere".to_string(),
            destination: "(80.2210,6.0535)".to_string(),
            total_shipments: None,
            delayed_shipments: None,
            risk_level: Some("???".to_string()),
        };

        let route = row.into_route(fallback);
        assert_eq!(route.origin, fallback);
        assert_eq!(route.destination, Coordinates::new(6.0535, 80.2210));
        assert_eq!(route.total_shipments, 0);
        assert_eq!(route.risk_level, RiskLevel::Unknown);
    }

    #[test]
    fn test_route_rows_with_nulls_all_come_through() {
        let fallback = Coordinates::new(6.9271, 79.8612);
        let rows: Vec<RouteRow> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Coast", "origin": "(79.8612,6.9271)",
                 "destination": "(80.2210,6.0535)", "total_shipments": 10,
                 "delayed_shipments": 2, "risk_level": "low"},
                {"id": 2, "name": "Bad", "origin": null, "destination": "(80.6337,7.2906)",
                 "total_shipments": -4, "delayed_shipments": null, "risk_level": null},
                {"id": 3, "name": null, "destination": 42,
                 "total_shipments": "7", "delayed_shipments": 9.0}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 3);

        let routes: Vec<Route> = rows.into_iter().map(|r| r.into_route(fallback)).collect();
        assert_eq!(routes[0].origin, Coordinates::new(6.9271, 79.8612));
        assert_eq!(routes[0].delayed_shipments, 2);

        assert_eq!(routes[1].origin, fallback);
        assert_eq!(routes[1].destination, Coordinates::new(7.2906, 80.6337));
        assert_eq!(routes[1].total_shipments, 0);
        assert_eq!(routes[1].risk_level, RiskLevel::Unknown);

        assert_eq!(routes[2].name, "3");
        assert_eq!(routes[2].origin, fallback);
        assert_eq!(routes[2].destination, fallback);
        assert_eq!(routes[2].total_shipments, 7);
        assert_eq!(routes[2].delayed_shipments, 7);
    }

    #[test]
    fn test_container_rows_with_nulls_all_come_through() {
        let geocoder = StaticGeocoder::new();
        let rows: Vec<ContainerRow> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Reefer 1", "location": "Colombo", "status": "active"},
                {"id": 2, "name": null, "location": "Kandy", "status": 5,
                 "temperature": "4.5", "humidity": null, "battery_level": "low"}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);

        let markers: Vec<Marker> = rows.into_iter().map(|r| r.into_marker(&geocoder)).collect();
        assert_eq!(markers[0].name, "Reefer 1");
        assert_eq!(markers[1].name, "2");
        assert_eq!(markers[1].coords, Coordinates::new(7.2906, 80.6337));
        assert_eq!(markers[1].status, ContainerStatus::Inactive);
        assert_eq!(markers[1].telemetry.temperature, Some(4.5));
        assert_eq!(markers[1].telemetry.battery_level, None);
    }

    #[test]
    fn test_row_without_id_is_rejected() {
        assert!(serde_json::from_str::<ContainerRow>(r#"{"id": null, "name": "x"}"#).is_err());
        assert!(serde_json::from_str::<RouteRow>(r#"{"name": "x"}"#).is_err());
    }

    #[test]
    fn test_route_row_new_encodes_points() {
        let row = RouteRow::new(
            "r1",
            "Test",
            Coordinates::new(6.93, 79.86),
            Coordinates::new(7.29, 80.63),
        );
        assert_eq!(row.origin, "(79.86,6.93)");
        assert_eq!(row.destination, "(80.63,7.29)");
    }
}

//! Coordinates and the point literal codec
//!
//! This module handles:
//! - The latitude/longitude pair shared by every other module
//! - Encoding and decoding the store's `"(x,y)"` point literal
//! - Great-circle distance between two coordinates

pub mod point;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    ///
    /// The map core never calls this; it is for values typed in by a user.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Euclidean distance in degree space
    ///
    /// Treats a degree of longitude as equal to a degree of latitude, which
    /// overstates east-west distances away from the equator.
    pub fn degree_distance(&self, other: &Coordinates) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }

    /// Arithmetic mean of a set of coordinates, or None if empty
    pub fn centroid<'a, I>(coords: I) -> Option<Coordinates>
    where
        I: IntoIterator<Item = &'a Coordinates>,
    {
        let (mut lat, mut lng, mut n) = (0.0, 0.0, 0usize);
        for c in coords {
            lat += c.lat;
            lng += c.lng;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(Coordinates::new(lat / n as f64, lng / n as f64))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(6.9271, 79.8612).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
    }

    #[test]
    fn test_degree_distance() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(3.0, 4.0);
        assert_abs_diff_eq!(a.degree_distance(&b), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.degree_distance(&a), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_centroid() {
        let coords = [
            Coordinates::new(1.0, 10.0),
            Coordinates::new(3.0, 20.0),
        ];
        let c = Coordinates::centroid(&coords).unwrap();
        assert_abs_diff_eq!(c.lat, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.lng, 15.0, epsilon = 1e-12);

        let empty: [Coordinates; 0] = [];
        assert!(Coordinates::centroid(&empty).is_none());
    }

    #[test]
    fn test_display() {
        let c = Coordinates::new(6.9271, 79.8612);
        assert_eq!(c.to_string(), "(6.927100, 79.861200)");
    }
}

//! Point literal codec
//!
//! The store keeps route endpoints in its native point type, whose text form
//! is `"(x,y)"` with x = longitude and y = latitude. The axis order is the
//! reverse of [`Coordinates`] and must not be swapped.

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use std::f64::consts::PI;
use tracing::warn;

/// Encode coordinates as a point literal, `"(lng,lat)"`
///
/// Uses the shortest representation that parses back to the same `f64`,
/// so [`decode`] returns exactly the input for finite values.
pub fn encode(coords: Coordinates) -> String {
    format!("({},{})", coords.lng, coords.lat)
}

/// Decode a point literal into coordinates
///
/// Accepts `"(x,y)"` with optional whitespace around the literal and around
/// each number. Anything else, including non-finite numbers, is an
/// [`Error::PointParse`].
pub fn decode(literal: &str) -> Result<Coordinates> {
    let malformed = || Error::PointParse(format!("expected \"(x,y)\", got {:?}", literal));

    let inner = literal
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let (x, y) = inner.split_once(',').ok_or_else(malformed)?;
    let lng = parse_component(x).ok_or_else(malformed)?;
    let lat = parse_component(y).ok_or_else(malformed)?;

    Ok(Coordinates::new(lat, lng))
}

/// Decode a point literal, substituting `fallback` when it is malformed
///
/// A bad stored value degrades to a visible marker at the fallback position
/// instead of failing the whole refresh.
pub fn decode_or(literal: &str, fallback: Coordinates) -> Coordinates {
    match decode(literal) {
        Ok(coords) => coords,
        Err(e) => {
            warn!("{}; using fallback {}", e, fallback);
            fallback
        }
    }
}

fn parse_component(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Calculate the distance between two points in meters (Haversine formula)
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat * PI / 180.0;
    let lat2 = p2.lat * PI / 180.0;
    let delta_lat = (p2.lat - p1.lat) * PI / 180.0;
    let delta_lng = (p2.lng - p1.lng) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_encode_puts_longitude_first() {
        let colombo = Coordinates::new(6.93, 79.86);
        assert_eq!(encode(colombo), "(79.86,6.93)");
    }

    #[test]
    fn test_decode() {
        let coords = decode("(79.86,6.93)").unwrap();
        assert_abs_diff_eq!(coords.lng, 79.86, epsilon = 1e-9);
        assert_abs_diff_eq!(coords.lat, 6.93, epsilon = 1e-9);
    }

    #[test]
    fn test_decode_whitespace() {
        let coords = decode("  ( -0.1276 , 51.5072 )\n").unwrap();
        assert_abs_diff_eq!(coords.lng, -0.1276, epsilon = 1e-9);
        assert_abs_diff_eq!(coords.lat, 51.5072, epsilon = 1e-9);
    }

    #[test]
    fn test_decode_malformed() {
        for bad in [
            "not-a-point",
            "",
            "()",
            "(1.0)",
            "(1.0,2.0,3.0)",
            "1.0,2.0",
            "(1.0,2.0",
            "(abc,2.0)",
            "(NaN,2.0)",
            "(inf,2.0)",
        ] {
            let result = decode(bad);
            assert!(
                matches!(result, Err(Error::PointParse(_))),
                "{:?} should not decode",
                bad
            );
        }
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            Coordinates::new(6.9271, 79.8612),
            Coordinates::new(-33.8688, 151.2093),
            Coordinates::new(51.5072, -0.1276),
            Coordinates::new(0.1 + 0.2, -179.999_999_9),
            Coordinates::new(-90.0, 180.0),
        ];
        for c in samples {
            let back = decode(&encode(c)).unwrap();
            assert_abs_diff_eq!(back.lat, c.lat, epsilon = 1e-6);
            assert_abs_diff_eq!(back.lng, c.lng, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_round_trip_random_sweep() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..10_000 {
            let c = Coordinates::new(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0));
            assert_eq!(decode(&encode(c)).unwrap(), c);
        }

        // Arbitrary finite bit patterns, not just map-range values
        let mut checked = 0;
        while checked < 10_000 {
            let lat = f64::from_bits(rng.gen());
            let lng = f64::from_bits(rng.gen());
            if !(lat.is_finite() && lng.is_finite()) {
                continue;
            }
            let c = Coordinates::new(lat, lng);
            assert_eq!(decode(&encode(c)).unwrap(), c, "{}", encode(c));
            checked += 1;
        }
    }

    #[test]
    fn test_round_trip_extremes() {
        let values = [
            f64::MAX,
            f64::MIN,
            f64::MIN_POSITIVE,
            -f64::MIN_POSITIVE,
            f64::EPSILON,
            5e-324,
            0.0,
            -0.0,
        ];
        for &lat in &values {
            for &lng in &values {
                let c = Coordinates::new(lat, lng);
                let back = decode(&encode(c)).unwrap();
                assert_eq!(back.lat.to_bits(), lat.to_bits(), "{}", encode(c));
                assert_eq!(back.lng.to_bits(), lng.to_bits(), "{}", encode(c));
            }
        }
    }

    #[test]
    fn test_decode_or_uses_fallback() {
        let fallback = Coordinates::new(1.0, 2.0);
        assert_eq!(decode_or("garbage", fallback), fallback);
        assert_eq!(decode_or("(4,3)", fallback), Coordinates::new(3.0, 4.0));
    }

    #[test]
    fn test_haversine_distance() {
        // One degree of latitude is roughly 111 km
        let a = Coordinates::new(6.0, 79.86);
        let b = Coordinates::new(7.0, 79.86);
        let distance = haversine_distance(a, b);
        assert!(
            (distance - 111_000.0).abs() < 1000.0,
            "Distance {} should be approximately 111000",
            distance
        );
        assert_eq!(haversine_distance(a, a), 0.0);
    }
}

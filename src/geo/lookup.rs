//! Static named-location geocoder
//!
//! Matches input against a fixed table of places, case-insensitively and by
//! substring in either direction. Unknown input gets a synthetic position
//! near the default center, derived from a 64-bit FNV-1a hash of the trimmed,
//! lower-cased input:
//!
//! - bits 0..31 scale the latitude offset, bit 31 picks its sign
//! - bits 32..63 scale the longitude offset, bit 63 picks its sign
//!
//! Each offset magnitude lies in `[min_offset, max_offset]` degrees, so an
//! unknown place never lands exactly on the center. Only determinism is
//! guaranteed; the exact positions are not a stable contract.

use crate::config::defaults::{DEFAULT_FALLBACK_MAX_OFFSET, DEFAULT_FALLBACK_MIN_OFFSET};
use crate::constants::geo::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG};
use crate::coord::Coordinates;
use crate::geo::{GeocodeSource, Geocoded, Geocoder};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Built-in places: ports, depots and cities along the network
const KNOWN_LOCATIONS: &[(&str, f64, f64)] = &[
    ("Colombo", 6.9271, 79.8612),
    ("Kandy", 7.2906, 80.6337),
    ("Galle", 6.0535, 80.2210),
    ("Jaffna", 9.6615, 80.0255),
    ("Trincomalee", 8.5874, 81.2152),
    ("Negombo", 7.2008, 79.8737),
    ("Katunayake", 7.1697, 79.8883),
    ("Hambantota", 6.1241, 81.1185),
    ("Batticaloa", 7.7310, 81.6747),
    ("Anuradhapura", 8.3114, 80.4037),
    ("Kurunegala", 7.4818, 80.3609),
    ("Ratnapura", 6.6828, 80.3992),
    ("Matara", 5.9549, 80.5550),
    ("Badulla", 6.9934, 81.0550),
    ("Nuwara Eliya", 6.9497, 80.7891),
    ("Chennai", 13.0827, 80.2707),
    ("Mumbai", 19.0760, 72.8777),
    ("Singapore", 1.3521, 103.8198),
    ("Dubai", 25.2048, 55.2708),
    ("Shanghai", 31.2304, 121.4737),
    ("Hong Kong", 22.3193, 114.1694),
    ("Rotterdam", 51.9244, 4.4777),
    ("Hamburg", 53.5511, 9.9937),
    ("Los Angeles", 34.0522, -118.2437),
];

static BUILTIN_TABLE: LazyLock<Vec<NamedLocation>> = LazyLock::new(|| {
    KNOWN_LOCATIONS
        .iter()
        .map(|&(name, lat, lng)| NamedLocation::new(name, Coordinates::new(lat, lng)))
        .collect()
});

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A named place with a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct NamedLocation {
    pub name: String,
    pub coords: Coordinates,
    key: String,
}

impl NamedLocation {
    pub fn new(name: impl Into<String>, coords: Coordinates) -> Self {
        let name = name.into();
        let key = name.trim().to_lowercase();
        Self { name, coords, key }
    }
}

/// Geocoder backed by the named-location table
#[derive(Debug, Clone)]
pub struct StaticGeocoder {
    locations: Vec<NamedLocation>,
    center: Coordinates,
    min_offset: f64,
    max_offset: f64,
}

impl StaticGeocoder {
    /// Create a geocoder with the built-in table and default fallback
    pub fn new() -> Self {
        Self::with_fallback(
            Coordinates::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG),
            DEFAULT_FALLBACK_MIN_OFFSET,
            DEFAULT_FALLBACK_MAX_OFFSET,
        )
    }

    /// Create a geocoder with the built-in table and a custom fallback area
    ///
    /// Offsets are in degrees. Their order does not matter and the sign is
    /// ignored.
    ///
    /// An out-of-range or non-finite center, or a non-finite offset, is
    /// replaced by the default so the geocoder always yields valid points.
    pub fn with_fallback(center: Coordinates, min_offset: f64, max_offset: f64) -> Self {
        let center = if center.validate().is_ok() {
            center
        } else {
            warn!("Invalid fallback center {}; using default", center);
            Coordinates::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG)
        };

        let (min_offset, max_offset) = if min_offset.is_finite() && max_offset.is_finite() {
            (min_offset, max_offset)
        } else {
            warn!(
                "Invalid fallback offsets {} / {}; using defaults",
                min_offset, max_offset
            );
            (DEFAULT_FALLBACK_MIN_OFFSET, DEFAULT_FALLBACK_MAX_OFFSET)
        };
        let (lo, hi) = (min_offset.abs(), max_offset.abs());
        let (min_offset, max_offset) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        Self {
            locations: BUILTIN_TABLE.clone(),
            center,
            min_offset,
            max_offset,
        }
    }

    /// Append extra named locations
    ///
    /// Appended entries are checked after the built-in ones for substring
    /// matches, but still win on an exact name match.
    pub fn with_locations<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = NamedLocation>,
    {
        self.locations.extend(extra);
        self
    }

    /// All named locations, in match order
    pub fn locations(&self) -> &[NamedLocation] {
        &self.locations
    }

    /// Center of the fallback area
    pub fn center(&self) -> Coordinates {
        self.center
    }

    /// Find the table entry for an already trimmed, lower-cased query
    fn lookup(&self, query: &str) -> Option<&NamedLocation> {
        if query.is_empty() {
            return None;
        }
        self.locations
            .iter()
            .find(|loc| loc.key == query)
            .or_else(|| {
                self.locations
                    .iter()
                    .find(|loc| query.contains(&loc.key) || loc.key.contains(query))
            })
    }

    /// Synthetic position for an unknown query
    fn fallback(&self, query: &str) -> Coordinates {
        let hash = fnv1a(query.as_bytes());
        let lat_offset = self.offset(hash as u32);
        let lng_offset = self.offset((hash >> 32) as u32);
        let lat = (self.center.lat + lat_offset).clamp(-90.0, 90.0);
        let mut lng = self.center.lng + lng_offset;
        if !(-180.0..=180.0).contains(&lng) {
            lng = (lng + 180.0).rem_euclid(360.0) - 180.0;
        }
        Coordinates::new(lat, lng)
    }

    /// Map 32 hash bits to a signed offset; the top bit is the sign
    fn offset(&self, bits: u32) -> f64 {
        let fraction = (bits & 0x7fff_ffff) as f64 / 0x7fff_ffff as f64;
        let magnitude = self.min_offset + fraction * (self.max_offset - self.min_offset);
        if bits & 0x8000_0000 != 0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl Default for StaticGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for StaticGeocoder {
    fn resolve(&self, location: &str) -> Geocoded {
        let query = location.trim().to_lowercase();

        if let Some(found) = self.lookup(&query) {
            return Geocoded {
                coords: found.coords,
                source: GeocodeSource::Table {
                    name: found.name.clone(),
                },
            };
        }

        let coords = self.fallback(&query);
        debug!("No named location for {:?}; placed at {}", location, coords);
        Geocoded {
            coords,
            source: GeocodeSource::Fallback,
        }
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}

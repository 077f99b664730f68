//! Real Philadelphia-area locations for realistic test fixtures.
//!
//! Coordinates are approximate building positions taken from OpenStreetMap.

#![allow(dead_code)]

use route_cluster::centroids::CentroidTable;
use route_cluster::{ClusterableBuilding, Coordinate};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub postal_code: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, postal_code: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            name,
            postal_code,
            lat,
            lng,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// A fully geocoded building at this location.
    pub fn building(&self, id: &str) -> ClusterableBuilding {
        ClusterableBuilding::new(id, self.name)
            .with_address(format!("{} Building", self.name), "Philadelphia", "PA")
            .with_postal_code(self.postal_code)
            .with_location(self.lat, self.lng)
    }
}

// ============================================================================
// Center City
// ============================================================================

pub const CENTER_CITY: &[Location] = &[
    Location::new("City Hall", "19107", 39.9524, -75.1636),
    Location::new("Comcast Center", "19103", 39.9548, -75.1683),
    Location::new("Liberty Place", "19103", 39.9522, -75.1680),
    Location::new("Reading Terminal Market", "19107", 39.9533, -75.1594),
];

// ============================================================================
// South Philadelphia / Stadium District
// ============================================================================

pub const SOUTH_PHILLY: &[Location] = &[
    Location::new("Navy Yard", "19112", 39.8940, -75.1730),
    Location::new("Citizens Bank Park", "19148", 39.9061, -75.1665),
    Location::new("Wells Fargo Center", "19148", 39.9012, -75.1720),
    Location::new("Lincoln Financial Field", "19148", 39.9008, -75.1675),
];

// ============================================================================
// Northwest
// ============================================================================

pub const NORTHWEST: &[Location] = &[
    Location::new("Chestnut Hill", "19118", 40.0766, -75.2080),
    Location::new("Manayunk", "19127", 40.0262, -75.2240),
    Location::new("Germantown", "19144", 40.0380, -75.1730),
    Location::new("Mount Airy", "19119", 40.0590, -75.1900),
];

/// Postal-code centroids for the fixture area.
pub fn centroid_table() -> CentroidTable {
    vec![
        ("19103", Coordinate::new(39.9525, -75.1740)),
        ("19107", Coordinate::new(39.9510, -75.1590)),
        ("19147", Coordinate::new(39.9364, -75.1550)),
        ("19148", Coordinate::new(39.9120, -75.1580)),
        ("19118", Coordinate::new(40.0720, -75.2080)),
    ]
    .into_iter()
    .collect()
}

/// A building with no geocoding, only a postal code.
pub fn ungeocoded(id: &str, name: &str, postal_code: &str) -> ClusterableBuilding {
    ClusterableBuilding::new(id, name)
        .with_address(format!("{} Building", name), "Philadelphia", "PA")
        .with_postal_code(postal_code)
}

/// A point `miles` due north of `origin`.
pub fn north_of(origin: Coordinate, miles: f64) -> Coordinate {
    let degrees = (miles / route_cluster::haversine::EARTH_RADIUS_MILES).to_degrees();
    Coordinate::new(origin.latitude + degrees, origin.longitude)
}

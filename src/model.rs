//! Value types flowing through a planning run.
//!
//! Everything here is copied into the engine at the start of a run and copied
//! back out in the resulting plan. Nothing is mutated in place.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Finite and inside the valid latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Arithmetic mean of a set of points. Returns `None` for an empty set.
    ///
    /// Day buckets span a few miles at most, so averaging degrees is an
    /// adequate stand-in for the spherical centroid.
    pub fn centroid<I>(points: I) -> Option<Coordinate>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let (count, lat_sum, lng_sum) = points
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(count, lat, lng), point| {
                (count + 1, lat + point.latitude, lng + point.longitude)
            });

        if count == 0 {
            return None;
        }

        Some(Coordinate::new(lat_sum / count as f64, lng_sum / count as f64))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self { latitude, longitude }
    }
}

/// The subset of a building record the engine needs.
///
/// Size and access metadata are carried through for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterableBuilding {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub priority: bool,
    pub advance_notice_required: bool,
    pub square_feet: Option<u32>,
    pub access_notes: Option<String>,
}

impl ClusterableBuilding {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            latitude: None,
            longitude: None,
            priority: false,
            advance_notice_required: false,
            square_feet: None,
            access_notes: None,
        }
    }

    pub fn with_address(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        self.address = address.into();
        self.city = city.into();
        self.state = state.into();
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = postal_code.into();
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_advance_notice(mut self, required: bool) -> Self {
        self.advance_notice_required = required;
        self
    }

    /// The building's own geocoded position.
    ///
    /// Zero components are treated as "not geocoded", which is how upstream
    /// records encode a missing value.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => {
                let coordinate = Coordinate::new(lat, lng);
                coordinate.is_valid().then_some(coordinate)
            }
            _ => None,
        }
    }

    /// Stable display order: name, then address, then id.
    pub fn display_order(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.address.cmp(&other.address))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// How a stop's location was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationPrecision {
    /// The building's own latitude/longitude.
    Exact,
    /// The centroid of the building's postal code.
    PostalCentroid,
    /// No location could be derived.
    Missing,
}

/// A building placed in a day, together with the location used to route it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedStop {
    pub building: ClusterableBuilding,
    pub location: Option<Coordinate>,
    pub precision: LocationPrecision,
}

impl PlannedStop {
    pub fn id(&self) -> &str {
        &self.building.id
    }
}

/// One day of inspection work, in visit order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCluster {
    /// 1-based day number.
    pub day: u32,
    pub stops: Vec<PlannedStop>,
    /// Estimated road miles, including the leg from the start location.
    pub estimated_miles: f64,
}

impl DayCluster {
    pub fn buildings(&self) -> impl Iterator<Item = &ClusterableBuilding> {
        self.stops.iter().map(|stop| &stop.building)
    }

    pub fn building_ids(&self) -> Vec<&str> {
        self.stops.iter().map(PlannedStop::id).collect()
    }

    pub fn contains(&self, building_id: &str) -> bool {
        self.stops.iter().any(|stop| stop.id() == building_id)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Output of a full planning run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoutePlan {
    pub clusters: Vec<DayCluster>,
    /// Postal codes with no centroid entry, deduplicated, in first-seen order.
    pub unresolved_postal_codes: Vec<String>,
}

impl RoutePlan {
    pub fn total_miles(&self) -> f64 {
        self.clusters.iter().map(|cluster| cluster.estimated_miles).sum()
    }

    pub fn building_count(&self) -> usize {
        self.clusters.iter().map(DayCluster::len).sum()
    }
}

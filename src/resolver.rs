//! Location resolution for buildings and start locations.
//!
//! Buildings fall back from their own coordinate, to their postal-code
//! centroid, to no location at all. A building is never dropped here; the
//! partitioner decides where location-less buildings go.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::centroids::{is_postal_code, normalize_postal_code};
use crate::error::PlanError;
use crate::model::{ClusterableBuilding, Coordinate, LocationPrecision, PlannedStop};
use crate::traits::{CentroidLookup, Geocoder};

/// Result of resolving a run's buildings.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// One stop per input building, in input order.
    pub stops: Vec<PlannedStop>,
    /// Postal codes without a centroid, deduplicated, in first-seen order.
    pub unresolved_postal_codes: Vec<String>,
}

/// Resolve a single building to a stop.
pub fn resolve_building<C>(building: &ClusterableBuilding, centroids: &C) -> PlannedStop
where
    C: CentroidLookup + ?Sized,
{
    let (location, precision) = if let Some(coordinate) = building.coordinate() {
        (Some(coordinate), LocationPrecision::Exact)
    } else {
        match lookup_postal_code(&building.postal_code, centroids) {
            Some(centroid) => (Some(centroid), LocationPrecision::PostalCentroid),
            None => (None, LocationPrecision::Missing),
        }
    };

    PlannedStop {
        building: building.clone(),
        location,
        precision,
    }
}

/// Resolve every building and collect the postal codes that had no centroid.
pub fn resolve_buildings<C>(buildings: &[ClusterableBuilding], centroids: &C) -> Resolution
where
    C: CentroidLookup + ?Sized,
{
    let mut seen = HashSet::new();
    let mut resolution = Resolution::default();

    for building in buildings {
        let stop = resolve_building(building, centroids);

        if stop.precision == LocationPrecision::Missing {
            let code = building.postal_code.trim();
            if !code.is_empty() && seen.insert(normalize_postal_code(code)) {
                resolution.unresolved_postal_codes.push(code.to_string());
            }
        }

        resolution.stops.push(stop);
    }

    if !resolution.unresolved_postal_codes.is_empty() {
        warn!(
            count = resolution.unresolved_postal_codes.len(),
            codes = ?resolution.unresolved_postal_codes,
            "postal codes without centroid; affected buildings use fallback placement"
        );
    }

    resolution
}

/// Resolve a user-supplied start location string.
///
/// Blank input means "no start location". A bare postal code goes through the
/// centroid table; anything else is handed to the geocoder. Failing to resolve
/// a non-blank input is a configuration error.
pub fn resolve_start_location<C>(
    input: &str,
    centroids: &C,
    geocoder: Option<&dyn Geocoder>,
) -> Result<Option<Coordinate>, PlanError>
where
    C: CentroidLookup + ?Sized,
{
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let resolved = if is_postal_code(input) {
        lookup_postal_code(input, centroids)
    } else {
        match geocoder {
            Some(geocoder) => geocoder.geocode(input)?,
            None => None,
        }
    };

    match resolved {
        Some(coordinate) if coordinate.is_valid() => {
            debug!(
                input,
                latitude = coordinate.latitude,
                longitude = coordinate.longitude,
                "resolved start location"
            );
            Ok(Some(coordinate))
        }
        _ => Err(PlanError::StartLocationUnresolved(input.to_string())),
    }
}

fn lookup_postal_code<C>(postal_code: &str, centroids: &C) -> Option<Coordinate>
where
    C: CentroidLookup + ?Sized,
{
    let code = postal_code.trim();
    if code.is_empty() {
        return None;
    }
    centroids.centroid_for(code)
}

//! Great-circle distance and per-day travel estimates.
//!
//! Straight-line legs are summed and then scaled once by a road-indirection
//! factor to approximate driving miles.

use crate::model::Coordinate;

/// Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Default multiplier from straight-line to road miles.
pub const DEFAULT_ROAD_FACTOR: f64 = 1.3;

/// Haversine distance between two points in miles.
pub fn distance_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_MILES * c
}

/// Sum of consecutive legs, starting with `start -> stops[0]` when a start is given.
pub fn straight_line_miles(stops: &[Coordinate], start: Option<Coordinate>) -> f64 {
    let legs = start
        .into_iter()
        .chain(stops.iter().copied())
        .collect::<Vec<_>>();

    legs.windows(2).map(|leg| distance_miles(leg[0], leg[1])).sum()
}

/// Estimated road miles for an ordered list of stops.
pub fn route_distance(stops: &[Coordinate], start: Option<Coordinate>, road_factor: f64) -> f64 {
    straight_line_miles(stops, start) * road_factor
}

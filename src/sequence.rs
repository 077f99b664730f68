//! Visit ordering within a single day.
//!
//! Nearest-neighbor walk from the start location (or from the stop farthest
//! from the day's centroid), with an optional 2-opt pass afterwards. Stops
//! without a location are appended in display order; they contribute no legs.

use std::cmp::Ordering;

use crate::haversine::{distance_miles, straight_line_miles};
use crate::model::{ClusterableBuilding, Coordinate, PlannedStop};

/// Distances closer than this are treated as ties.
pub const DISTANCE_EPSILON: f64 = 1e-9;

/// Upper bound on 2-opt sweeps for one day.
const MAX_TWO_OPT_PASSES: usize = 50;

/// Index of the lowest-cost candidate.
///
/// Near-equal costs go to priority buildings first, then display order.
pub(crate) fn pick_best<T>(
    candidates: &[T],
    building: impl Fn(&T) -> &ClusterableBuilding,
    cost: impl Fn(&T) -> f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (position, candidate) in candidates.iter().enumerate() {
        let candidate_cost = cost(candidate);
        let replace = match best {
            None => true,
            Some((incumbent, incumbent_cost)) => beats(
                candidate_cost,
                incumbent_cost,
                building(candidate),
                building(&candidates[incumbent]),
            ),
        };
        if replace {
            best = Some((position, candidate_cost));
        }
    }

    best.map(|(position, _)| position)
}

fn beats(
    cost: f64,
    incumbent_cost: f64,
    candidate: &ClusterableBuilding,
    incumbent: &ClusterableBuilding,
) -> bool {
    if (cost - incumbent_cost).abs() > DISTANCE_EPSILON {
        return cost < incumbent_cost;
    }

    match (candidate.priority, incumbent.priority) {
        (true, false) => true,
        (false, true) => false,
        _ => candidate.display_order(incumbent) == Ordering::Less,
    }
}

/// Order one day's stops into a visit sequence.
///
/// The result depends only on the set of stops, not on their input order.
pub fn sequence_day(
    mut stops: Vec<PlannedStop>,
    start: Option<Coordinate>,
    two_opt: bool,
) -> Vec<PlannedStop> {
    stops.sort_by(|a, b| a.building.display_order(&b.building));

    let mut located: Vec<(PlannedStop, Coordinate)> = Vec::with_capacity(stops.len());
    let mut missing: Vec<PlannedStop> = Vec::new();
    for stop in stops {
        match stop.location {
            Some(location) => located.push((stop, location)),
            None => missing.push(stop),
        }
    }

    let mut ordered = nearest_neighbor(located, start);
    if two_opt {
        two_opt_improve(&mut ordered, start);
    }

    ordered
        .into_iter()
        .map(|(stop, _)| stop)
        .chain(missing)
        .collect()
}

fn nearest_neighbor(
    mut remaining: Vec<(PlannedStop, Coordinate)>,
    start: Option<Coordinate>,
) -> Vec<(PlannedStop, Coordinate)> {
    let mut ordered = Vec::with_capacity(remaining.len());

    let mut current = match start {
        Some(start) => start,
        None => {
            let locations = remaining.iter().map(|(_, location)| *location);
            let Some(centroid) = Coordinate::centroid(locations) else {
                return ordered;
            };
            // Farthest from the centroid is the seed.
            let Some(seed) = pick_best(&remaining, |(stop, _)| &stop.building, |(_, location)| {
                -distance_miles(centroid, *location)
            }) else {
                return ordered;
            };
            let seed = remaining.remove(seed);
            let location = seed.1;
            ordered.push(seed);
            location
        }
    };

    while let Some(next) = pick_best(&remaining, |(stop, _)| &stop.building, move |(_, location)| {
        distance_miles(current, *location)
    }) {
        let next = remaining.remove(next);
        current = next.1;
        ordered.push(next);
    }

    ordered
}

/// Reverse segments while doing so shortens the path.
///
/// The start location, when present, stays fixed as the first point.
fn two_opt_improve(route: &mut [(PlannedStop, Coordinate)], start: Option<Coordinate>) {
    let n = route.len();
    if n < 2 {
        return;
    }

    let path_length = |route: &[(PlannedStop, Coordinate)]| {
        let coords = route.iter().map(|(_, location)| *location).collect::<Vec<_>>();
        straight_line_miles(&coords, start)
    };

    let mut current = path_length(route);

    for _ in 0..MAX_TWO_OPT_PASSES {
        let mut improved = false;

        for i in 0..n - 1 {
            for j in i + 1..n {
                route[i..=j].reverse();
                let candidate = path_length(route);
                if candidate + DISTANCE_EPSILON < current {
                    current = candidate;
                    improved = true;
                } else {
                    route[i..=j].reverse();
                }
            }
        }

        if !improved {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocationPrecision;

    fn stop(id: &str, name: &str, location: Option<(f64, f64)>) -> PlannedStop {
        let precision = if location.is_some() {
            LocationPrecision::Exact
        } else {
            LocationPrecision::Missing
        };
        PlannedStop {
            building: ClusterableBuilding::new(id, name),
            location: location.map(Coordinate::from),
            precision,
        }
    }

    fn ids(stops: &[PlannedStop]) -> Vec<&str> {
        stops.iter().map(PlannedStop::id).collect()
    }

    #[test]
    fn test_nearest_first_from_start() {
        let stops = vec![
            stop("far", "Far", Some((40.3, -75.0))),
            stop("near", "Near", Some((40.1, -75.0))),
            stop("mid", "Mid", Some((40.2, -75.0))),
        ];
        let ordered = sequence_day(stops, Some(Coordinate::new(40.0, -75.0)), false);
        assert_eq!(ids(&ordered), vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_seed_is_farthest_from_centroid_without_start() {
        let stops = vec![
            stop("a", "A", Some((40.0, -75.0))),
            stop("b", "B", Some((40.1, -75.0))),
            stop("c", "C", Some((40.5, -75.0))),
        ];
        let ordered = sequence_day(stops, None, false);
        assert_eq!(ids(&ordered), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_missing_locations_go_last_in_display_order() {
        let stops = vec![
            stop("z", "Zulu", None),
            stop("a", "Alpha", Some((40.0, -75.0))),
            stop("m", "Mike", None),
        ];
        let ordered = sequence_day(stops, None, false);
        assert_eq!(ids(&ordered), vec!["a", "m", "z"]);
    }

    #[test]
    fn test_tie_prefers_priority_then_name() {
        let mut priority = stop("p", "Zeta", Some((40.1, -75.0)));
        priority.building.priority = true;
        let stops = vec![
            stop("b", "Beta", Some((40.1, -75.0))),
            priority,
            stop("a", "Alpha", Some((40.1, -75.0))),
        ];
        let ordered = sequence_day(stops, Some(Coordinate::new(40.0, -75.0)), false);
        assert_eq!(ids(&ordered), vec!["p", "a", "b"]);
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let stops = vec![
            stop("a", "A", Some((40.0, -75.0))),
            stop("b", "B", Some((40.05, -75.1))),
            stop("c", "C", Some((40.2, -75.05))),
            stop("d", "D", None),
        ];
        let mut reversed = stops.clone();
        reversed.reverse();
        assert_eq!(sequence_day(stops, None, true), sequence_day(reversed, None, true));
    }

    #[test]
    fn test_two_opt_never_lengthens() {
        let stops = vec![
            stop("a", "A", Some((40.0, -75.0))),
            stop("b", "B", Some((40.0, -75.2))),
            stop("c", "C", Some((40.1, -75.05))),
            stop("d", "D", Some((40.1, -75.15))),
            stop("e", "E", Some((40.05, -75.3))),
        ];
        let start = Some(Coordinate::new(39.9, -75.1));
        let length = |stops: &[PlannedStop]| {
            let coords = stops.iter().filter_map(|stop| stop.location).collect::<Vec<_>>();
            straight_line_miles(&coords, start)
        };

        let plain = sequence_day(stops.clone(), start, false);
        let improved = sequence_day(stops, start, true);
        assert_eq!(plain.len(), improved.len());
        assert!(length(&improved) <= length(&plain) + DISTANCE_EPSILON);
    }

    #[test]
    fn test_empty_day() {
        assert!(sequence_day(Vec::new(), None, true).is_empty());
    }
}

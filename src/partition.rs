//! Day-bucket partitioning.
//!
//! Located stops are grouped greedily: seed a bucket from the stop farthest
//! from the anchor (or from every existing bucket centroid), then keep adding
//! the stop nearest the bucket's running centroid until it is full. Stops
//! without a location are dealt round-robin into the buckets afterwards.

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::error::PlanError;
use crate::haversine::distance_miles;
use crate::model::{Coordinate, PlannedStop};
use crate::sequence::pick_best;

/// Split stops into `ceil(n / target_size)` buckets of at most `target_size`.
///
/// Every input stop lands in exactly one bucket. Output does not depend on
/// input order.
pub fn partition(
    mut stops: Vec<PlannedStop>,
    target_size: usize,
    start: Option<Coordinate>,
    cancel: &CancellationToken,
) -> Result<Vec<Vec<PlannedStop>>, PlanError> {
    if stops.is_empty() {
        return Ok(Vec::new());
    }

    let target_size = target_size.max(1);
    let day_count = stops.len().div_ceil(target_size);

    stops.sort_by(|a, b| a.building.display_order(&b.building));

    let mut located: Vec<(PlannedStop, Coordinate)> = Vec::new();
    let mut missing: Vec<PlannedStop> = Vec::new();
    for stop in stops {
        match stop.location {
            Some(location) => located.push((stop, location)),
            None => missing.push(stop),
        }
    }

    let mut buckets = group_geographically(located, target_size, start, || cancel.is_cancelled())?;
    buckets.resize_with(day_count, Vec::new);

    if cancel.is_cancelled() {
        return Err(PlanError::Cancelled);
    }

    distribute_round_robin(missing, &mut buckets, target_size);

    Ok(buckets)
}

struct Candidate {
    stop: PlannedStop,
    location: Coordinate,
    /// Miles to the nearest centroid of an already closed bucket.
    nearest_centroid: f64,
}

/// `should_stop` is polled before each new bucket is seeded.
fn group_geographically(
    located: Vec<(PlannedStop, Coordinate)>,
    target_size: usize,
    start: Option<Coordinate>,
    should_stop: impl Fn() -> bool,
) -> Result<Vec<Vec<PlannedStop>>, PlanError> {
    let anchor =
        start.or_else(|| Coordinate::centroid(located.iter().map(|(_, location)| *location)));

    let mut unassigned = located
        .into_iter()
        .map(|(stop, location)| Candidate {
            stop,
            location,
            nearest_centroid: f64::INFINITY,
        })
        .collect::<Vec<_>>();
    let mut buckets: Vec<Vec<PlannedStop>> = Vec::new();

    while !unassigned.is_empty() {
        if should_stop() {
            return Err(PlanError::Cancelled);
        }

        let seed = if buckets.is_empty() {
            pick_best(&unassigned, |candidate| &candidate.stop.building, |candidate| {
                match anchor {
                    Some(anchor) => -distance_miles(anchor, candidate.location),
                    None => 0.0,
                }
            })
        } else {
            pick_best(&unassigned, |candidate| &candidate.stop.building, |candidate| {
                -candidate.nearest_centroid
            })
        };
        let Some(seed) = seed else {
            break;
        };

        let seed = unassigned.remove(seed);
        let seed_id = seed.stop.building.id.clone();
        let (mut lat_sum, mut lng_sum) = (seed.location.latitude, seed.location.longitude);
        let mut centroid = seed.location;
        let mut bucket = vec![seed.stop];

        while bucket.len() < target_size {
            let Some(next) = pick_best(
                &unassigned,
                |candidate| &candidate.stop.building,
                move |candidate| distance_miles(centroid, candidate.location),
            ) else {
                break;
            };
            let next = unassigned.remove(next);
            lat_sum += next.location.latitude;
            lng_sum += next.location.longitude;
            bucket.push(next.stop);
            let count = bucket.len() as f64;
            centroid = Coordinate::new(lat_sum / count, lng_sum / count);
        }

        for candidate in &mut unassigned {
            let miles = distance_miles(centroid, candidate.location);
            candidate.nearest_centroid = candidate.nearest_centroid.min(miles);
        }

        debug!(
            day = buckets.len() + 1,
            seed = %seed_id,
            size = bucket.len(),
            "seeded day bucket"
        );

        buckets.push(bucket);
    }

    Ok(buckets)
}

/// Deal location-less stops into buckets that still have room.
///
/// Dealing starts at the first empty bucket so that trailing days created for
/// the remainder are never left empty.
fn distribute_round_robin(
    missing: Vec<PlannedStop>,
    buckets: &mut [Vec<PlannedStop>],
    target_size: usize,
) {
    let bucket_count = buckets.len();
    if bucket_count == 0 {
        return;
    }

    let mut cursor = buckets.iter().position(Vec::is_empty).unwrap_or(0);

    for stop in missing {
        let slot = (0..bucket_count)
            .map(|offset| (cursor + offset) % bucket_count)
            .find(|&index| buckets[index].len() < target_size)
            .unwrap_or(cursor);
        buckets[slot].push(stop);
        cursor = (slot + 1) % bucket_count;
    }
}

//! Partial recompute after a manual stop move.
//!
//! Only the touched days are re-sequenced and re-estimated. Untouched days,
//! day numbers, and the order of days are returned exactly as given.

use tracing::debug;

use crate::error::PlanError;
use crate::model::DayCluster;
use crate::planner::{build_day, PlanConfig};

/// Re-sequence a day and refresh its distance estimate.
///
/// The outcome depends only on the day's set of stops, so applying it to its
/// own output changes nothing.
pub fn resequence_day(cluster: DayCluster, config: &PlanConfig) -> DayCluster {
    build_day(cluster.day, cluster.stops, config)
}

/// Move `building_id` out of `from_day` and into `to_day`, or drop it from the
/// plan entirely when `to_day` is `None`.
///
/// A move onto the same day returns the clusters unchanged. A day emptied by
/// the move is kept with zero miles rather than renumbering later days.
pub fn recompute_after_move(
    mut clusters: Vec<DayCluster>,
    building_id: &str,
    from_day: u32,
    to_day: Option<u32>,
    config: &PlanConfig,
) -> Result<Vec<DayCluster>, PlanError> {
    if to_day == Some(from_day) {
        return Ok(clusters);
    }

    config.validate()?;

    let from_index = day_index(&clusters, from_day)?;
    let to_index = to_day.map(|day| day_index(&clusters, day)).transpose()?;

    let position = clusters[from_index]
        .stops
        .iter()
        .position(|stop| stop.id() == building_id)
        .ok_or_else(|| PlanError::BuildingNotInDay {
            building_id: building_id.to_string(),
            day: from_day,
        })?;

    let moved = clusters[from_index].stops.remove(position);
    if let Some(to_index) = to_index {
        clusters[to_index].stops.push(moved);
    }

    let mut touched = vec![from_index];
    touched.extend(to_index);

    for index in touched {
        let day = clusters[index].day;
        let stops = std::mem::take(&mut clusters[index].stops);
        clusters[index] = build_day(day, stops, config);
    }

    debug!(
        building_id,
        from_day,
        to_day = ?to_day,
        "recomputed days after manual move"
    );

    Ok(clusters)
}

fn day_index(clusters: &[DayCluster], day: u32) -> Result<usize, PlanError> {
    clusters
        .iter()
        .position(|cluster| cluster.day == day)
        .ok_or(PlanError::UnknownDay(day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClusterableBuilding, Coordinate, LocationPrecision, PlannedStop};

    fn stop(id: &str, lat: f64) -> PlannedStop {
        PlannedStop {
            building: ClusterableBuilding::new(id, id).with_location(lat, -75.0),
            location: Some(Coordinate::new(lat, -75.0)),
            precision: LocationPrecision::Exact,
        }
    }

    fn plan(config: &PlanConfig) -> Vec<DayCluster> {
        vec![
            build_day(1, vec![stop("a", 40.0), stop("b", 40.1), stop("c", 40.2)], config),
            build_day(2, vec![stop("d", 41.0), stop("e", 41.1)], config),
            build_day(3, vec![stop("f", 42.0)], config),
        ]
    }

    #[test]
    fn test_same_day_is_noop() {
        let config = PlanConfig::default();
        let clusters = plan(&config);
        let result = recompute_after_move(clusters.clone(), "a", 1, Some(1), &config).unwrap();
        assert_eq!(result, clusters);
    }

    #[test]
    fn test_move_touches_only_two_days() {
        let config = PlanConfig::default();
        let clusters = plan(&config);
        let result = recompute_after_move(clusters.clone(), "c", 1, Some(2), &config).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[2], clusters[2]);
        assert!(!result[0].contains("c"));
        assert!(result[1].contains("c"));
        assert_eq!(result[0].len(), 2);
        assert_eq!(result[1].len(), 3);
        assert!(result[0].estimated_miles < clusters[0].estimated_miles);
    }

    #[test]
    fn test_remove_from_plan() {
        let config = PlanConfig::default();
        let result = recompute_after_move(plan(&config), "f", 3, None, &config).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[2].day, 3);
        assert!(result[2].is_empty());
        assert_eq!(result[2].estimated_miles, 0.0);
    }

    #[test]
    fn test_unknown_day() {
        let config = PlanConfig::default();
        let err = recompute_after_move(plan(&config), "a", 1, Some(9), &config).unwrap_err();
        assert!(matches!(err, PlanError::UnknownDay(9)));
    }

    #[test]
    fn test_building_not_in_day() {
        let config = PlanConfig::default();
        let err = recompute_after_move(plan(&config), "d", 1, Some(3), &config).unwrap_err();
        assert!(matches!(err, PlanError::BuildingNotInDay { day: 1, .. }));
    }

    #[test]
    fn test_resequence_is_idempotent() {
        let config = PlanConfig::default().with_two_opt(true);
        let day = build_day(1, vec![stop("x", 40.3), stop("y", 40.0), stop("z", 40.15)], &config);
        let once = resequence_day(day, &config);
        let twice = resequence_day(once.clone(), &config);
        assert_eq!(once, twice);
    }
}

//! Full planning run: resolve, partition, sequence, estimate.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cancel::CancellationToken;
use crate::error::PlanError;
use crate::haversine::{route_distance, DEFAULT_ROAD_FACTOR};
use crate::model::{ClusterableBuilding, Coordinate, DayCluster, PlannedStop, RoutePlan};
use crate::partition::partition;
use crate::resolver::resolve_buildings;
use crate::sequence::sequence_day;
use crate::traits::CentroidLookup;

/// Smallest accepted buildings-per-day.
pub const MIN_TARGET_SIZE: usize = 3;

/// Largest accepted buildings-per-day.
pub const MAX_TARGET_SIZE: usize = 8;

/// Settings for one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Buildings per day.
    pub target_size: usize,
    /// Already-resolved start location (office, hotel, first stop).
    pub start: Option<Coordinate>,
    /// Straight-line to road miles multiplier.
    pub road_factor: f64,
    /// Run a 2-opt pass after the nearest-neighbor walk.
    pub two_opt: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            target_size: 5,
            start: None,
            road_factor: DEFAULT_ROAD_FACTOR,
            two_opt: false,
        }
    }
}

impl PlanConfig {
    pub fn new(target_size: usize) -> Self {
        Self {
            target_size,
            ..Self::default()
        }
    }

    pub fn with_start(mut self, start: Coordinate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_road_factor(mut self, road_factor: f64) -> Self {
        self.road_factor = road_factor;
        self
    }

    pub fn with_two_opt(mut self, two_opt: bool) -> Self {
        self.two_opt = two_opt;
        self
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if !(MIN_TARGET_SIZE..=MAX_TARGET_SIZE).contains(&self.target_size) {
            return Err(PlanError::InvalidTargetSize {
                value: self.target_size,
                min: MIN_TARGET_SIZE,
                max: MAX_TARGET_SIZE,
            });
        }

        if !self.road_factor.is_finite() || self.road_factor < 1.0 {
            return Err(PlanError::InvalidRoadFactor(self.road_factor));
        }

        if let Some(start) = self.start {
            if !start.is_valid() {
                return Err(PlanError::InvalidStartLocation(start));
            }
        }

        Ok(())
    }
}

/// A region's buildings and settings, for batch planning.
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    pub buildings: &'a [ClusterableBuilding],
    pub config: PlanConfig,
}

/// Generate a day-by-day plan for `buildings`.
pub fn generate_route_plan<C>(
    buildings: &[ClusterableBuilding],
    centroids: &C,
    config: &PlanConfig,
) -> Result<RoutePlan, PlanError>
where
    C: CentroidLookup + ?Sized,
{
    generate_route_plan_with_cancel(buildings, centroids, config, &CancellationToken::new())
}

/// Same as [`generate_route_plan`], aborting with [`PlanError::Cancelled`]
/// once `cancel` is triggered.
pub fn generate_route_plan_with_cancel<C>(
    buildings: &[ClusterableBuilding],
    centroids: &C,
    config: &PlanConfig,
    cancel: &CancellationToken,
) -> Result<RoutePlan, PlanError>
where
    C: CentroidLookup + ?Sized,
{
    config.validate()?;
    ensure_unique_ids(buildings)?;

    if buildings.is_empty() {
        return Ok(RoutePlan::default());
    }

    let resolution = resolve_buildings(buildings, centroids);
    let buckets = partition(resolution.stops, config.target_size, config.start, cancel)?;

    if cancel.is_cancelled() {
        return Err(PlanError::Cancelled);
    }

    let clusters = buckets
        .into_par_iter()
        .enumerate()
        .map(|(index, stops)| build_day(index as u32 + 1, stops, config))
        .collect::<Vec<_>>();

    let plan = RoutePlan {
        clusters,
        unresolved_postal_codes: resolution.unresolved_postal_codes,
    };

    info!(
        buildings = buildings.len(),
        days = plan.clusters.len(),
        unresolved = plan.unresolved_postal_codes.len(),
        total_miles = plan.total_miles(),
        "generated route plan"
    );

    Ok(plan)
}

/// Plan several independent regions in parallel. Results keep request order.
pub fn generate_route_plans<C>(
    requests: &[PlanRequest<'_>],
    centroids: &C,
) -> Vec<Result<RoutePlan, PlanError>>
where
    C: CentroidLookup + Sync + ?Sized,
{
    requests
        .par_iter()
        .map(|request| generate_route_plan(request.buildings, centroids, &request.config))
        .collect()
}

/// Sequence a day's stops and estimate its miles.
pub fn build_day(day: u32, stops: Vec<PlannedStop>, config: &PlanConfig) -> DayCluster {
    let stops = sequence_day(stops, config.start, config.two_opt);
    let estimated_miles = estimate_miles(&stops, config);

    DayCluster {
        day,
        stops,
        estimated_miles,
    }
}

/// Road miles for stops in their current order. Location-less stops add no legs.
pub fn estimate_miles(stops: &[PlannedStop], config: &PlanConfig) -> f64 {
    let coords = stops.iter().filter_map(|stop| stop.location).collect::<Vec<_>>();
    route_distance(&coords, config.start, config.road_factor)
}

fn ensure_unique_ids(buildings: &[ClusterableBuilding]) -> Result<(), PlanError> {
    let mut seen = HashSet::with_capacity(buildings.len());
    for building in buildings {
        if !seen.insert(building.id.as_str()) {
            return Err(PlanError::DuplicateBuildingId(building.id.clone()));
        }
    }
    Ok(())
}

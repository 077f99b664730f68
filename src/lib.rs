//! route-cluster core
//!
//! Groups building locations into balanced day routes, orders each day's
//! stops, and estimates the miles driven per day.

pub mod cancel;
pub mod centroids;
pub mod error;
pub mod geocode;
pub mod haversine;
pub mod model;
pub mod partition;
pub mod planner;
pub mod rebalance;
pub mod resolver;
pub mod sequence;
pub mod traits;

pub use error::{GeocodeError, PlanError};
pub use model::{
    ClusterableBuilding, Coordinate, DayCluster, LocationPrecision, PlannedStop, RoutePlan,
};
pub use planner::{generate_route_plan, generate_route_plan_with_cancel, PlanConfig};
pub use rebalance::recompute_after_move;

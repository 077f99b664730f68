//! Error types.

use std::fmt;

use crate::model::Coordinate;

/// Reasons a planning call is rejected.
///
/// Every variant is fatal to the call only; retrying with the same input
/// produces the same error.
#[derive(Debug)]
pub enum PlanError {
    InvalidTargetSize { value: usize, min: usize, max: usize },
    InvalidRoadFactor(f64),
    InvalidStartLocation(Coordinate),
    StartLocationUnresolved(String),
    DuplicateBuildingId(String),
    UnknownDay(u32),
    BuildingNotInDay { building_id: String, day: u32 },
    Geocode(GeocodeError),
    Cancelled,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidTargetSize { value, min, max } => {
                write!(f, "buildings per day must be between {} and {}, got {}", min, max, value)
            }
            PlanError::InvalidRoadFactor(factor) => {
                write!(f, "road factor must be a finite value >= 1.0, got {}", factor)
            }
            PlanError::InvalidStartLocation(coordinate) => write!(
                f,
                "start location ({}, {}) is not a valid coordinate",
                coordinate.latitude, coordinate.longitude
            ),
            PlanError::StartLocationUnresolved(input) => {
                write!(f, "could not resolve start location '{}'", input)
            }
            PlanError::DuplicateBuildingId(id) => {
                write!(f, "building id '{}' appears more than once", id)
            }
            PlanError::UnknownDay(day) => write!(f, "day {} is not part of the plan", day),
            PlanError::BuildingNotInDay { building_id, day } => {
                write!(f, "building '{}' is not scheduled on day {}", building_id, day)
            }
            PlanError::Geocode(err) => write!(f, "geocoding failed: {}", err),
            PlanError::Cancelled => write!(f, "planning run was cancelled"),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Geocode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeocodeError> for PlanError {
    fn from(err: GeocodeError) -> Self {
        PlanError::Geocode(err)
    }
}

/// Failures talking to a geocoding service.
#[derive(Debug)]
pub enum GeocodeError {
    Http(reqwest::Error),
    MalformedResponse(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::Http(err) => write!(f, "http error: {}", err),
            GeocodeError::MalformedResponse(detail) => write!(f, "malformed response: {}", detail),
        }
    }
}

impl std::error::Error for GeocodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeocodeError::Http(err) => Some(err),
            GeocodeError::MalformedResponse(_) => None,
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Http(err)
    }
}

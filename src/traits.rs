//! Collaborator seams for the planner.
//!
//! The engine only reads from these; concrete apps back them with whatever
//! store or service they already have.

use std::collections::HashMap;

use crate::centroids::normalize_postal_code;
use crate::error::GeocodeError;
use crate::model::Coordinate;

/// Postal code to representative coordinate.
///
/// Implementations accept ZIP+4 input and match on the five-digit prefix.
pub trait CentroidLookup {
    fn centroid_for(&self, postal_code: &str) -> Option<Coordinate>;
}

impl CentroidLookup for HashMap<String, Coordinate> {
    fn centroid_for(&self, postal_code: &str) -> Option<Coordinate> {
        self.get(&normalize_postal_code(postal_code)).copied()
    }
}

impl<T: CentroidLookup + ?Sized> CentroidLookup for &T {
    fn centroid_for(&self, postal_code: &str) -> Option<Coordinate> {
        (**self).centroid_for(postal_code)
    }
}

/// Free-form address to coordinate.
///
/// Only used by the caller layer to resolve a start location before a run;
/// the engine itself never geocodes.
pub trait Geocoder {
    /// `Ok(None)` means the service answered but found no match.
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError>;
}

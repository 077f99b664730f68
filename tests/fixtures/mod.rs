//! Test fixtures for route-cluster.
//!
//! Provides realistic test data including:
//! - Real Philadelphia-area locations grouped by neighborhood
//! - A postal-code centroid table and building builders

pub mod philadelphia_locations;

pub use philadelphia_locations::*;

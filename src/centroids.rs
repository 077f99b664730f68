//! In-memory postal-code centroid table.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use crate::model::Coordinate;
use crate::traits::CentroidLookup;

/// Canonical lookup key for a postal code.
///
/// Trims whitespace and reduces ZIP+4 (`19103-1234`) to the five-digit prefix.
pub fn normalize_postal_code(postal_code: &str) -> String {
    let trimmed = postal_code.trim();
    match trimmed.split_once('-') {
        Some((prefix, suffix))
            if !prefix.is_empty()
                && !suffix.is_empty()
                && suffix.chars().all(|c| c.is_ascii_digit()) =>
        {
            prefix.to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// True for a bare US postal code: `12345` or `12345-6789`.
pub fn is_postal_code(input: &str) -> bool {
    let trimmed = input.trim();
    let (prefix, suffix) = match trimmed.split_once('-') {
        Some((prefix, suffix)) => (prefix, Some(suffix)),
        None => (trimmed, None),
    };

    let digits = |s: &str, len: usize| s.len() == len && s.chars().all(|c| c.is_ascii_digit());

    digits(prefix, 5) && suffix.map_or(true, |suffix| digits(suffix, 4))
}

#[derive(Debug, Deserialize)]
struct CentroidRecord {
    postal_code: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CentroidFile {
    Map(HashMap<String, (f64, f64)>),
    Records(Vec<CentroidRecord>),
}

/// Postal code centroids keyed by normalized code.
#[derive(Debug, Clone, Default)]
pub struct CentroidTable {
    entries: HashMap<String, Coordinate>,
}

impl CentroidTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, postal_code: &str, centroid: Coordinate) {
        self.entries.insert(normalize_postal_code(postal_code), centroid);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads either `{ "19103": [lat, lng], ... }` or
    /// `[{ "postal_code": "19103", "latitude": .., "longitude": .. }, ...]`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let file: CentroidFile = serde_json::from_reader(reader)?;
        let table: CentroidTable = match file {
            CentroidFile::Map(map) => map
                .into_iter()
                .map(|(code, (lat, lng))| (code, Coordinate::new(lat, lng)))
                .collect(),
            CentroidFile::Records(records) => records
                .into_iter()
                .map(|record| {
                    let centroid = Coordinate::new(record.latitude, record.longitude);
                    (record.postal_code, centroid)
                })
                .collect(),
        };
        Ok(table)
    }
}

impl<S: AsRef<str>> FromIterator<(S, Coordinate)> for CentroidTable {
    fn from_iter<I: IntoIterator<Item = (S, Coordinate)>>(iter: I) -> Self {
        let mut table = CentroidTable::new();
        for (code, centroid) in iter {
            table.insert(code.as_ref(), centroid);
        }
        table
    }
}

impl CentroidLookup for CentroidTable {
    fn centroid_for(&self, postal_code: &str) -> Option<Coordinate> {
        self.entries.get(&normalize_postal_code(postal_code)).copied()
    }
}

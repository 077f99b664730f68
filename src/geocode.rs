//! Nominatim-style HTTP geocoder for free-form start locations.
//!
//! Used by callers before a run; the planner never calls out to the network.

use serde::Deserialize;
use tracing::debug;

use crate::error::GeocodeError;
use crate::model::Coordinate;
use crate::traits::Geocoder;

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("route-cluster/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));

        let places = self
            .client
            .get(url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimPlace>>())?;

        let Some(place) = places.into_iter().next() else {
            debug!(address, "geocoder returned no match");
            return Ok(None);
        };

        place.coordinate().map(Some)
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        let parse = |value: &str| {
            value.trim().parse::<f64>().map_err(|_| {
                GeocodeError::MalformedResponse(format!("invalid coordinate component '{}'", value))
            })
        };

        let coordinate = Coordinate::new(parse(&self.lat)?, parse(&self.lon)?);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(GeocodeError::MalformedResponse(format!(
                "coordinate out of range: {}, {}",
                self.lat, self.lon
            )))
        }
    }
}

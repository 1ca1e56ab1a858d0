use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::model::Coordinates;
use crate::provider::{self, ServiceId};

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim's usage policy requires a client-identifying User-Agent.
const CLIENT_USER_AGENT: &str = "trip-planner/0.1 (trip-cli)";

/// Forward geocoder over OpenStreetMap Nominatim. No API key.
#[derive(Debug, Clone, Default)]
pub struct NominatimClient {
    http: Client,
}

impl NominatimClient {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Resolve a free-text city name to coordinates.
    ///
    /// `Ok(None)` means the service answered but found no match; callers
    /// treat that differently from a failed call.
    pub async fn lookup(&self, city: &str) -> Result<Option<Coordinates>, FetchError> {
        debug!("geocoding '{city}'");

        let response = self
            .http
            .get(SEARCH_URL)
            .query(&[("q", city), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await
            .map_err(|source| FetchError::Transport { service: ServiceId::Nominatim, source })?;

        let hits: Vec<SearchHit> = provider::decode_response(ServiceId::Nominatim, response).await?;

        let Some(hit) = hits.into_iter().next() else {
            debug!("no geocoding match for '{city}'");
            return Ok(None);
        };

        coordinates_from_hit(&hit).map(Some)
    }
}

// Nominatim serves lat/lon as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

fn coordinates_from_hit(hit: &SearchHit) -> Result<Coordinates, FetchError> {
    let lat: f64 = hit
        .lat
        .parse()
        .map_err(|_| FetchError::decode(ServiceId::Nominatim, format!("bad latitude '{}'", hit.lat)))?;
    let lon: f64 = hit
        .lon
        .parse()
        .map_err(|_| FetchError::decode(ServiceId::Nominatim, format!("bad longitude '{}'", hit.lon)))?;

    Ok(Coordinates { lat, lon })
}

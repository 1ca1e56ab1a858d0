use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::model::WeatherSnapshot;
use crate::provider::{self, ServiceId};

const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: Option<String>,
    http: Client,
}

impl OpenWeatherClient {
    /// A missing key is not an error here; it surfaces at call time.
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key, http: Client::new() }
    }

    /// Current conditions for a city, metric units.
    pub async fn current(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingCredential { service: ServiceId::OpenWeather })?;

        debug!("fetching current weather for '{city}'");

        let response = self
            .http
            .get(CURRENT_URL)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|source| FetchError::Transport { service: ServiceId::OpenWeather, source })?;

        let parsed: OwCurrentResponse =
            provider::decode_response(ServiceId::OpenWeather, response).await?;

        Ok(snapshot_from_response(parsed))
    }
}

fn snapshot_from_response(parsed: OwCurrentResponse) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_c: parsed.main.and_then(|m| m.temp),
        description: parsed.weather.into_iter().next().and_then(|w| w.description),
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

use serde::de::DeserializeOwned;
use std::convert::TryFrom;

use crate::error::FetchError;

pub mod aviationstack;
pub mod groq;
pub mod nominatim;
pub mod openweather;
pub mod overpass;

/// Identifies one upstream service, both for error reporting and for the
/// credentials map in config.toml.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    OpenWeather,
    Nominatim,
    Overpass,
    AviationStack,
    Groq,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::OpenWeather => "openweather",
            ServiceId::Nominatim => "nominatim",
            ServiceId::Overpass => "overpass",
            ServiceId::AviationStack => "aviationstack",
            ServiceId::Groq => "groq",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[
            ServiceId::OpenWeather,
            ServiceId::Nominatim,
            ServiceId::Overpass,
            ServiceId::AviationStack,
            ServiceId::Groq,
        ]
    }

    /// Services that take an API key, i.e. valid targets for
    /// `trip configure`.
    pub const fn keyed() -> &'static [ServiceId] {
        &[ServiceId::OpenWeather, ServiceId::AviationStack, ServiceId::Groq]
    }

    /// Environment variable that overrides the stored key, if the service is
    /// keyed. Nominatim and Overpass are public endpoints without keys.
    pub fn env_var(&self) -> Option<&'static str> {
        match self {
            ServiceId::OpenWeather => Some("OPENWEATHER_API_KEY"),
            ServiceId::AviationStack => Some("AVIATIONSTACK_API_KEY"),
            ServiceId::Groq => Some("GROQ_API_KEY"),
            ServiceId::Nominatim | ServiceId::Overpass => None,
        }
    }

    pub fn requires_key(&self) -> bool {
        self.env_var().is_some()
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        ServiceId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown service '{value}'. \
                     Known services: openweather, nominatim, overpass, aviationstack, groq."
                )
            })
    }
}

/// Shared tail of every fetch: read the body, bail on non-2xx with a
/// truncated body excerpt, then decode the JSON.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    service: ServiceId,
    response: reqwest::Response,
) -> Result<T, FetchError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Transport { service, source })?;

    if !status.is_success() {
        return Err(FetchError::status(service, status, &body));
    }

    serde_json::from_str(&body).map_err(|err| FetchError::decode(service, err))
}

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Smallest trip length accepted by [`TripRequest::new`].
pub const MIN_TRIP_DAYS: u32 = 1;
/// Largest trip length accepted by [`TripRequest::new`].
pub const MAX_TRIP_DAYS: u32 = 14;

/// Month of travel, one of the twelve fixed calendar names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Month {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        Month::ALL
            .into_iter()
            .find(|m| m.as_str().to_lowercase() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!("Unknown month '{value}'. Expected a full month name, e.g. \"April\".")
            })
    }
}

/// Everything the user supplies for one planning pass.
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub destination: String,
    pub days: u32,
    pub month: Month,
    pub origin: String,
}

impl TripRequest {
    pub fn new(
        destination: impl Into<String>,
        days: u32,
        month: Month,
        origin: impl Into<String>,
    ) -> Result<Self> {
        let destination = destination.into().trim().to_string();
        let origin = origin.into().trim().to_string();

        ensure!(!destination.is_empty(), "Destination city must not be empty.");
        ensure!(!origin.is_empty(), "Departure city must not be empty.");
        ensure!(
            (MIN_TRIP_DAYS..=MAX_TRIP_DAYS).contains(&days),
            "Trip length must be between {MIN_TRIP_DAYS} and {MAX_TRIP_DAYS} days, got {days}."
        );

        Ok(Self { destination, days, month, origin })
    }
}

/// Geographic point from the geocoder, also carried on hotel records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions for the destination. Either field can be missing from
/// the upstream payload; that is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelAddress {
    pub street: String,
    pub city: String,
    pub country: String,
}

/// One lodging point of interest. Optional fields are only rendered when
/// present; string fields carry their extraction-time defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    pub address: HotelAddress,
    pub stars: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// One flight between two airports. Timestamps stay as the upstream strings;
/// formatting happens at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub airline: String,
    pub flight_number: String,
    pub departure_scheduled: String,
    pub arrival_scheduled: String,
}

/// Result-count and radius tunables. The defaults mirror the presentation
/// limits the tool ships with; an optional `[search]` table in config.toml
/// overrides them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Hotel search radius around the geocoded destination, in meters.
    pub hotel_radius_m: u32,
    /// How many leading spatial-query elements are considered as candidates.
    pub hotel_candidate_window: usize,
    /// Cap on hotel records built from the candidates.
    pub max_hotels: usize,
    /// Cap on flight records, also sent upstream as the result limit.
    pub max_flights: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            hotel_radius_m: 5_000,
            hotel_candidate_window: 5,
            max_hotels: 3,
            max_flights: 3,
        }
    }
}

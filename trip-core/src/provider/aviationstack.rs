use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::model::Flight;
use crate::provider::{self, ServiceId};

const FLIGHTS_URL: &str = "http://api.aviationstack.com/v1/flights";

#[derive(Debug, Clone)]
pub struct FlightClient {
    api_key: Option<String>,
    http: Client,
    max_results: usize,
}

impl FlightClient {
    pub fn new(api_key: Option<String>, max_results: usize) -> Self {
        Self { api_key, http: Client::new(), max_results }
    }

    /// Flights between two IATA codes, truncated to `max_results` even when
    /// the upstream ignores the limit parameter.
    pub async fn search(&self, origin: &str, destination: &str) -> Result<Vec<Flight>, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingCredential { service: ServiceId::AviationStack })?;

        debug!("searching flights {origin} -> {destination}");

        let limit = self.max_results.to_string();
        let response = self
            .http
            .get(FLIGHTS_URL)
            .query(&[
                ("access_key", api_key),
                ("dep_iata", origin),
                ("arr_iata", destination),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|source| FetchError::Transport { service: ServiceId::AviationStack, source })?;

        let parsed: FlightsResponse =
            provider::decode_response(ServiceId::AviationStack, response).await?;

        Ok(flights_from_payload(parsed, self.max_results))
    }
}

/// Each field defaults independently; a flight with a missing sub-object
/// still produces a record.
fn flights_from_payload(payload: FlightsResponse, max_results: usize) -> Vec<Flight> {
    payload
        .data
        .into_iter()
        .take(max_results)
        .map(|entry| Flight {
            airline: entry
                .airline
                .and_then(|a| a.name)
                .unwrap_or_else(|| "Unknown Airline".to_string()),
            flight_number: entry
                .flight
                .and_then(|f| f.number)
                .unwrap_or_else(|| "Unknown".to_string()),
            departure_scheduled: entry
                .departure
                .and_then(|d| d.scheduled)
                .unwrap_or_else(|| "Unknown".to_string()),
            arrival_scheduled: entry
                .arrival
                .and_then(|a| a.scheduled)
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    data: Vec<FlightEntry>,
}

#[derive(Debug, Deserialize)]
struct FlightEntry {
    airline: Option<AirlineInfo>,
    flight: Option<FlightInfo>,
    departure: Option<ScheduleInfo>,
    arrival: Option<ScheduleInfo>,
}

#[derive(Debug, Deserialize)]
struct AirlineInfo {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlightInfo {
    number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScheduleInfo {
    scheduled: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(airline: &str, number: &str) -> String {
        format!(
            r#"{{"airline": {{"name": "{airline}"}},
                 "flight": {{"number": "{number}"}},
                 "departure": {{"iata": "LHR", "scheduled": "2026-04-01T09:30:00+00:00"}},
                 "arrival": {{"iata": "HND", "scheduled": "2026-04-02T06:50:00+09:00"}}}}"#
        )
    }

    #[test]
    fn caps_records_regardless_of_upstream_count() {
        let entries: Vec<String> = (0..5).map(|i| entry("ANA", &format!("{i}"))).collect();
        let json = format!(r#"{{"data": [{}]}}"#, entries.join(","));

        let parsed: FlightsResponse = serde_json::from_str(&json).unwrap();
        let flights = flights_from_payload(parsed, 3);

        assert_eq!(flights.len(), 3);
        assert_eq!(flights[0].flight_number, "0");
        assert_eq!(flights[2].flight_number, "2");
    }

    #[test]
    fn missing_subobjects_default_independently() {
        let json = r#"{"data": [{"flight": {"number": "NH212"}}]}"#;

        let parsed: FlightsResponse = serde_json::from_str(json).unwrap();
        let flights = flights_from_payload(parsed, 3);

        assert_eq!(
            flights,
            vec![Flight {
                airline: "Unknown Airline".to_string(),
                flight_number: "NH212".to_string(),
                departure_scheduled: "Unknown".to_string(),
                arrival_scheduled: "Unknown".to_string(),
            }]
        );
    }

    #[test]
    fn empty_payload_yields_no_flights() {
        let parsed: FlightsResponse = serde_json::from_str("{}").unwrap();
        assert!(flights_from_payload(parsed, 3).is_empty());
    }

    #[test]
    fn full_entries_map_field_for_field() {
        let json = format!(r#"{{"data": [{}]}}"#, entry("British Airways", "BA5"));

        let parsed: FlightsResponse = serde_json::from_str(&json).unwrap();
        let flights = flights_from_payload(parsed, 3);

        assert_eq!(flights[0].airline, "British Airways");
        assert_eq!(flights[0].flight_number, "BA5");
        assert_eq!(flights[0].departure_scheduled, "2026-04-01T09:30:00+00:00");
        assert_eq!(flights[0].arrival_scheduled, "2026-04-02T06:50:00+09:00");
    }
}

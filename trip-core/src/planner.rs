use crate::airports::{AirportLookup, StaticAirportTable};
use crate::config::Config;
use crate::error::FetchError;
use crate::model::{Flight, Hotel, TripRequest, WeatherSnapshot};
use crate::provider::ServiceId;
use crate::provider::aviationstack::FlightClient;
use crate::provider::groq::{GroqNarrator, Narrator};
use crate::provider::nominatim::NominatimClient;
use crate::provider::openweather::OpenWeatherClient;
use crate::provider::overpass::HotelFinder;

/// One client per upstream service, built once from config.
///
/// The operations are independent of each other; the presentation layer
/// drives them in its fixed order and decides which failures are fatal.
/// Missing credentials surface from the individual calls, never from
/// construction.
pub struct TripPlanner {
    weather: OpenWeatherClient,
    narrator: Box<dyn Narrator>,
    hotels: HotelFinder,
    flights: FlightClient,
    airports: Box<dyn AirportLookup>,
}

impl TripPlanner {
    pub fn from_config(config: &Config) -> Self {
        let limits = config.search;

        Self {
            weather: OpenWeatherClient::new(config.credential(ServiceId::OpenWeather)),
            narrator: Box::new(GroqNarrator::new(config.credential(ServiceId::Groq))),
            hotels: HotelFinder::new(NominatimClient::new(), limits),
            flights: FlightClient::new(
                config.credential(ServiceId::AviationStack),
                limits.max_flights,
            ),
            airports: Box::new(StaticAirportTable),
        }
    }

    pub async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        self.weather.current(city).await
    }

    pub async fn trip_narrative(&self, request: &TripRequest) -> Result<String, FetchError> {
        self.narrator.trip_narrative(request).await
    }

    pub async fn find_hotels(&self, city: &str) -> Result<Vec<Hotel>, FetchError> {
        self.hotels.search(city).await
    }

    pub fn airport_code(&self, city: &str) -> String {
        self.airports.airport_code(city)
    }

    pub async fn find_flights(
        &self,
        origin_iata: &str,
        destination_iata: &str,
    ) -> Result<Vec<Flight>, FetchError> {
        self.flights.search(origin_iata, destination_iata).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Month;

    #[test]
    fn construction_succeeds_without_any_credentials() {
        let _ = TripPlanner::from_config(&Config::default());
    }

    #[tokio::test]
    async fn missing_keys_fail_at_call_time() {
        let planner = TripPlanner::from_config(&Config::default());

        let err = planner.current_weather("Tokyo").await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::MissingCredential { service: ServiceId::OpenWeather }
        ));

        let err = planner.find_flights("LHR", "HND").await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::MissingCredential { service: ServiceId::AviationStack }
        ));

        let request = TripRequest::new("Tokyo", 3, Month::April, "London").unwrap();
        let err = planner.trip_narrative(&request).await.unwrap_err();
        assert!(matches!(err, FetchError::MissingCredential { service: ServiceId::Groq }));
    }

    #[test]
    fn resolves_the_london_tokyo_route() {
        let planner = TripPlanner::from_config(&Config::default());

        assert_eq!(planner.airport_code("London"), "LHR");
        assert_eq!(planner.airport_code("Tokyo"), "HND");
    }
}

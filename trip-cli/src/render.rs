//! Section formatting. Everything here builds strings; printing stays in
//! the command handlers.

use chrono::DateTime;

use trip_core::{FetchError, Flight, Hotel, TripRequest, WeatherSnapshot};

pub fn title(request: &TripRequest) -> String {
    format!(
        "🌍 AI Travel Planner\n\
         {} days in {} this {}, departing from {}\n",
        request.days, request.destination, request.month, request.origin
    )
}

pub fn weather_section(weather: &Result<WeatherSnapshot, FetchError>) -> String {
    let mut out = String::from("🌤️  Weather Information\n");

    match weather {
        Ok(snapshot) => {
            match snapshot.temperature_c {
                Some(temp) => out.push_str(&format!("Current temperature: {temp:.1}°C\n")),
                None => out.push_str("Current temperature: not available\n"),
            }
            match &snapshot.description {
                Some(description) => out.push_str(&format!("Weather conditions: {description}\n")),
                None => out.push_str("Weather conditions: not available\n"),
            }
        }
        Err(err) => {
            out.push_str(&format!("Weather data not available: {err}\n"));
        }
    }

    out
}

pub fn narrative_section(narrative: &str) -> String {
    format!("🗺️  Your Trip Plan\n{narrative}\n")
}

pub fn hotel_section(hotels: &Result<Vec<Hotel>, FetchError>) -> String {
    let mut out = String::from("🏨 Hotel Options\n");

    match hotels {
        Ok(hotels) if !hotels.is_empty() => {
            for hotel in hotels {
                out.push_str(&render_hotel(hotel));
            }
        }
        Ok(_) => {
            out.push_str(
                "Could not fetch hotel data. Please check hotel booking websites directly.\n",
            );
        }
        Err(err) => {
            out.push_str(&format!(
                "Could not fetch hotel data ({err}). \
                 Please check hotel booking websites directly.\n"
            ));
        }
    }

    out
}

fn render_hotel(hotel: &Hotel) -> String {
    let mut out = format!("- {}\n", hotel.name);

    let address = &hotel.address;
    out.push_str(&format!(
        "  Address: {}, {}, {}\n",
        address.street, address.city, address.country
    ));

    if let Some(stars) = &hotel.stars {
        out.push_str(&format!("  Rating: {stars} stars\n"));
    }
    if let Some(phone) = &hotel.phone {
        out.push_str(&format!("  Phone: {phone}\n"));
    }
    if let Some(website) = &hotel.website {
        out.push_str(&format!("  Website: {website}\n"));
    }
    if let Some(coords) = hotel.coordinates {
        out.push_str(&format!(
            "  Map: https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=16/{lat}/{lon}\n",
            lat = coords.lat,
            lon = coords.lon
        ));
    }
    out.push_str("  ---\n");

    out
}

pub fn flight_section(
    origin_code: &str,
    destination_code: &str,
    flights: &Result<Vec<Flight>, FetchError>,
) -> String {
    let mut out = format!("✈️  Flight Options ({origin_code} → {destination_code})\n");

    match flights {
        Ok(flights) if !flights.is_empty() => {
            for flight in flights {
                out.push_str(&format!("- {} - Flight {}\n", flight.airline, flight.flight_number));
                out.push_str(&format!(
                    "  Departure: {}\n",
                    pretty_timestamp(&flight.departure_scheduled)
                ));
                out.push_str(&format!(
                    "  Arrival: {}\n",
                    pretty_timestamp(&flight.arrival_scheduled)
                ));
            }
        }
        Ok(_) => {
            out.push_str(
                "Could not fetch real-time flight data. \
                 Please check airline websites directly.\n",
            );
        }
        Err(err) => {
            out.push_str(&format!(
                "Could not fetch real-time flight data ({err}). \
                 Please check airline websites directly.\n"
            ));
        }
    }

    out
}

/// Upstream timestamps are RFC 3339 when present at all; anything else
/// (including the "Unknown" default) passes through untouched.
fn pretty_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M %:z").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_core::{Coordinates, HotelAddress, Month, ServiceId};

    fn fetch_err() -> FetchError {
        FetchError::decode(ServiceId::OpenWeather, "boom")
    }

    fn hotel() -> Hotel {
        Hotel {
            name: "Palace Hotel".to_string(),
            address: HotelAddress {
                street: "1-1-1 Marunouchi".to_string(),
                city: "Tokyo".to_string(),
                country: "JP".to_string(),
            },
            stars: Some("5".to_string()),
            phone: None,
            website: Some("https://example.jp".to_string()),
            coordinates: Some(Coordinates { lat: 35.68, lon: 139.76 }),
        }
    }

    #[test]
    fn failed_weather_renders_not_available_notice() {
        let section = weather_section(&Err(fetch_err()));

        assert!(section.contains("Weather Information"));
        assert!(section.contains("Weather data not available"));
    }

    #[test]
    fn partial_weather_renders_each_field_independently() {
        let section = weather_section(&Ok(WeatherSnapshot {
            temperature_c: Some(18.4),
            description: None,
        }));

        assert!(section.contains("Current temperature: 18.4°C"));
        assert!(section.contains("Weather conditions: not available"));
    }

    #[test]
    fn hotel_lines_omit_absent_optional_fields() {
        let section = hotel_section(&Ok(vec![hotel()]));

        assert!(section.contains("- Palace Hotel"));
        assert!(section.contains("Address: 1-1-1 Marunouchi, Tokyo, JP"));
        assert!(section.contains("Rating: 5 stars"));
        assert!(!section.contains("Phone:"));
        assert!(section.contains("Website: https://example.jp"));
        assert!(section.contains("mlat=35.68&mlon=139.76"));
    }

    #[test]
    fn empty_hotel_list_renders_booking_site_notice() {
        let section = hotel_section(&Ok(Vec::new()));
        assert!(section.contains("Could not fetch hotel data"));
    }

    #[test]
    fn flight_section_shows_resolved_route() {
        let section = flight_section("LHR", "HND", &Ok(Vec::new()));

        assert!(section.contains("LHR → HND"));
        assert!(section.contains("Could not fetch real-time flight data"));
    }

    #[test]
    fn flight_rows_prettify_rfc3339_and_pass_through_unknown() {
        let flights = vec![Flight {
            airline: "ANA".to_string(),
            flight_number: "NH212".to_string(),
            departure_scheduled: "2026-04-01T09:30:00+00:00".to_string(),
            arrival_scheduled: "Unknown".to_string(),
        }];

        let section = flight_section("LHR", "HND", &Ok(flights));

        assert!(section.contains("- ANA - Flight NH212"));
        assert!(section.contains("Departure: 2026-04-01 09:30 +00:00"));
        assert!(section.contains("Arrival: Unknown"));
    }

    #[test]
    fn title_echoes_the_request() {
        let request = TripRequest::new("Tokyo", 3, Month::April, "London").unwrap();
        let line = title(&request);

        assert!(line.contains("3 days in Tokyo"));
        assert!(line.contains("April"));
        assert!(line.contains("London"));
    }
}

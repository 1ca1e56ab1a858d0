use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::error::FetchError;
use crate::model::{Coordinates, Hotel, HotelAddress, SearchLimits};
use crate::provider::nominatim::NominatimClient;
use crate::provider::{self, ServiceId};

const INTERPRETER_URL: &str = "https://overpass-api.de/api/interpreter";

/// Finds lodging near a destination via the Overpass API.
///
/// Owns the geocoding step: a city with no geocoding match yields an empty
/// result without any spatial query being issued.
#[derive(Debug, Clone)]
pub struct HotelFinder {
    geocoder: NominatimClient,
    http: Client,
    limits: SearchLimits,
}

impl HotelFinder {
    pub fn new(geocoder: NominatimClient, limits: SearchLimits) -> Self {
        Self { geocoder, http: Client::new(), limits }
    }

    pub async fn search(&self, city: &str) -> Result<Vec<Hotel>, FetchError> {
        let Some(coords) = self.geocoder.lookup(city).await? else {
            debug!("no coordinates for '{city}', skipping hotel search");
            return Ok(Vec::new());
        };

        debug!(
            "searching hotels within {}m of ({}, {})",
            self.limits.hotel_radius_m, coords.lat, coords.lon
        );

        let query = hotel_query(coords, self.limits.hotel_radius_m);
        let response = self
            .http
            .post(INTERPRETER_URL)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|source| FetchError::Transport { service: ServiceId::Overpass, source })?;

        let parsed: OverpassResponse =
            provider::decode_response(ServiceId::Overpass, response).await?;

        Ok(hotels_from_elements(parsed.elements, city, self.limits))
    }
}

/// Overpass QL selecting `tourism=hotel` features of all three geometry
/// kinds around a point. Only node elements become records downstream.
fn hotel_query(coords: Coordinates, radius_m: u32) -> String {
    format!(
        "[out:json][timeout:25];\n\
         (\n\
           node[\"tourism\"=\"hotel\"](around:{radius},{lat},{lon});\n\
           way[\"tourism\"=\"hotel\"](around:{radius},{lat},{lon});\n\
           relation[\"tourism\"=\"hotel\"](around:{radius},{lat},{lon});\n\
         );\n\
         out body;\n\
         >;\n\
         out skel qt;",
        radius = radius_m,
        lat = coords.lat,
        lon = coords.lon,
    )
}

/// Builds hotel records from raw elements: takes the leading candidate
/// window, keeps node elements only, and stops at the record cap. Missing
/// tags default per field; no candidate is rejected for missing data.
fn hotels_from_elements(
    elements: Vec<OverpassElement>,
    city: &str,
    limits: SearchLimits,
) -> Vec<Hotel> {
    let mut hotels = Vec::new();

    for element in elements.into_iter().take(limits.hotel_candidate_window) {
        if element.kind != "node" {
            continue;
        }

        let coordinates = match (element.lat, element.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
            _ => None,
        };
        let tags = element.tags;

        hotels.push(Hotel {
            name: tags
                .get("name")
                .cloned()
                .unwrap_or_else(|| "Unnamed Hotel".to_string()),
            address: HotelAddress {
                street: tags
                    .get("addr:street")
                    .cloned()
                    .unwrap_or_else(|| "Street not available".to_string()),
                city: tags.get("addr:city").cloned().unwrap_or_else(|| city.to_string()),
                country: tags
                    .get("addr:country")
                    .cloned()
                    .unwrap_or_else(|| "Country not available".to_string()),
            },
            stars: tags.get("stars").cloned(),
            phone: tags.get("phone").cloned(),
            website: tags.get("website").cloned(),
            coordinates,
        });

        if hotels.len() >= limits.max_hotels {
            break;
        }
    }

    hotels
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

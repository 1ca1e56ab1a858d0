//! City to IATA airport code resolution.

/// Maps a free-text city name to a three-letter airport code.
///
/// Kept as a trait so the static table below can later be replaced by a full
/// airport dataset without touching callers.
pub trait AirportLookup: Send + Sync {
    fn airport_code(&self, city: &str) -> String;
}

/// Common-city table. Several cities share a nearby hub (Kyoto flies out of
/// Osaka's airport).
const CITY_CODES: &[(&str, &str)] = &[
    ("tokyo", "HND"),
    ("osaka", "KIX"),
    ("kyoto", "KIX"),
    ("delhi", "DEL"),
    ("mumbai", "BOM"),
    ("udaipur", "UDR"),
    ("london", "LHR"),
    ("paris", "CDG"),
    ("new york", "JFK"),
    ("singapore", "SIN"),
    ("bangkok", "BKK"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAirportTable;

impl AirportLookup for StaticAirportTable {
    fn airport_code(&self, city: &str) -> String {
        let needle = city.trim().to_lowercase();

        if let Some((_, code)) = CITY_CODES.iter().find(|(name, _)| *name == needle) {
            return (*code).to_string();
        }

        // Approximate fallback: first three characters, uppercased. Not
        // guaranteed to be a real IATA code.
        needle.chars().take(3).collect::<String>().to_uppercase()
    }
}

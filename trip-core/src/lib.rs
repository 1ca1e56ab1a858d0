//! Core library for the `trip` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the upstream weather, geocoding, lodging, flight, and
//!   narrative services
//! - Shared domain models (requests, records, tunables)
//!
//! It is used by `trip-cli`, but can also be reused by other binaries or services.

pub mod airports;
pub mod config;
pub mod error;
pub mod model;
pub mod planner;
pub mod provider;

pub use airports::{AirportLookup, StaticAirportTable};
pub use config::{Config, ServiceConfig};
pub use error::FetchError;
pub use model::{
    Coordinates, Flight, Hotel, HotelAddress, MAX_TRIP_DAYS, MIN_TRIP_DAYS, Month, SearchLimits,
    TripRequest, WeatherSnapshot,
};
pub use planner::TripPlanner;
pub use provider::ServiceId;

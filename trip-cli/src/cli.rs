use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, Select, Text};

use trip_core::{Config, Month, ServiceId, TripPlanner, TripRequest};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "trip", version, about = "AI travel planner CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a keyed service.
    Configure {
        /// Service short name: "openweather", "aviationstack" or "groq".
        service: String,
    },

    /// Plan a trip: weather, narrative, hotels and flights in one pass.
    Plan {
        /// Destination city.
        #[arg(long)]
        destination: Option<String>,

        /// Trip length in days (1-14).
        #[arg(long)]
        days: Option<u32>,

        /// Month of travel, e.g. "April".
        #[arg(long)]
        month: Option<String>,

        /// Departure city.
        #[arg(long)]
        from: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { service } => configure(&service),
            Command::Plan { destination, days, month, from } => {
                let request = gather_request(destination, days, month, from)?;
                plan(&request).await
            }
        }
    }
}

fn configure(service: &str) -> Result<()> {
    let id = ServiceId::try_from(service)?;
    if !id.requires_key() {
        bail!(
            "Service '{id}' does not use an API key. \
             Keyed services: openweather, aviationstack, groq."
        );
    }

    let api_key = Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mut config = Config::load()?;
    config.upsert_service_api_key(id, api_key);
    config.save()?;

    println!("Saved API key for {id} to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Build the request from flags, prompting for anything omitted. Defaults
/// match the tool's canonical example trip (Tokyo from London).
fn gather_request(
    destination: Option<String>,
    days: Option<u32>,
    month: Option<String>,
    from: Option<String>,
) -> Result<TripRequest> {
    let destination = match destination {
        Some(city) => city,
        None => Text::new("Destination city:").with_default("Tokyo").prompt()?,
    };

    let days = match days {
        Some(n) => n,
        None => CustomType::<u32>::new("Number of days:").with_default(3).prompt()?,
    };

    let month = match month {
        Some(name) => Month::try_from(name.as_str())?,
        None => Select::new("Month of travel:", Month::ALL.to_vec()).prompt()?,
    };

    let origin = match from {
        Some(city) => city,
        None => Text::new("Departure city:").with_default("London").prompt()?,
    };

    TripRequest::new(destination, days, month, origin)
}

/// The single pass over all services. Sections print in a fixed order, each
/// as soon as its call completes. Weather, hotel and flight failures are
/// per-section notices; a narrative failure aborts the run.
async fn plan(request: &TripRequest) -> Result<()> {
    let config = Config::load()?;
    let planner = TripPlanner::from_config(&config);

    println!("{}", render::title(request));

    let weather = planner.current_weather(&request.destination).await;
    println!("{}", render::weather_section(&weather));

    let narrative = planner
        .trip_narrative(request)
        .await
        .context("Trip narrative generation failed")?;
    println!("{}", render::narrative_section(&narrative));

    let hotels = planner.find_hotels(&request.destination).await;
    println!("{}", render::hotel_section(&hotels));

    let origin_code = planner.airport_code(&request.origin);
    let destination_code = planner.airport_code(&request.destination);
    let flights = planner.find_flights(&origin_code, &destination_code).await;
    println!("{}", render::flight_section(&origin_code, &destination_code, &flights));

    Ok(())
}

//! Nearby command handler
//!
//! One-shot attraction search around a location.

use crate::attractions::AttractionSearch;
use crate::config::Config;
use crate::error::Result;
use crate::format::formatter_for;
use crate::gateway;
use crate::geo::Coordinates;
use clap::Args;

/// Nearby command arguments
#[derive(Args)]
pub struct NearbyArgs {
    /// Latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Override the search radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<u32>,

    /// Output format (json, text)
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,
}

/// Run the nearby command
pub async fn run(args: NearbyArgs) -> Result<()> {
    super::init_logging("warn");

    let formatter = formatter_for(&args.format)?;

    let center = Coordinates::new(args.lat, args.lon);
    center.validate()?;

    let mut config = Config::load()?;
    if let Some(radius) = args.radius {
        config.attractions.radius_meters = radius;
    }

    let (_, poi) = gateway::from_config(&config)?;
    let attractions = AttractionSearch::new(poi, config.attractions)
        .nearby(center)
        .await?;

    println!("{}", formatter.format_attractions(&attractions)?);
    Ok(())
}

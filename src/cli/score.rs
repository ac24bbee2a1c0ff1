//! Score command handler
//!
//! One-shot safety assessment for a location.

use crate::config::Config;
use crate::error::Result;
use crate::format::formatter_for;
use crate::gateway;
use crate::geo::Coordinates;
use crate::safety::SafetyScorer;
use clap::Args;

/// Score command arguments
#[derive(Args)]
pub struct ScoreArgs {
    /// Current latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Current longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Destination latitude (scored instead of the current position)
    #[arg(long, requires = "dest_lon", allow_hyphen_values = true)]
    pub dest_lat: Option<f64>,

    /// Destination longitude
    #[arg(long, requires = "dest_lat", allow_hyphen_values = true)]
    pub dest_lon: Option<f64>,

    /// Output format (json, text)
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,
}

/// Run the score command
pub async fn run(args: ScoreArgs) -> Result<()> {
    super::init_logging("warn");

    let formatter = formatter_for(&args.format)?;

    let current = Coordinates::new(args.lat, args.lon);
    current.validate()?;
    let destination = Coordinates::from_parts(args.dest_lat, args.dest_lon);
    if let Some(destination) = &destination {
        destination.validate()?;
    }

    let config = Config::load()?;
    let (weather, _) = gateway::from_config(&config)?;
    if !weather.is_configured() {
        eprintln!("Weather API key not configured; scoring on time of day only");
    }

    let assessment = SafetyScorer::new(weather)
        .assess_now(current, destination)
        .await;

    println!("{}", formatter.format_assessment(&assessment)?);
    Ok(())
}

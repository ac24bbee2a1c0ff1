//! Status command handler
//!
//! Queries the health endpoint of a running server.

use crate::config::Config;
use crate::error::Result;
use crate::server::routes::HealthResponse;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Server address as host:port (defaults to the configured one)
    #[arg(long)]
    pub addr: Option<String>,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;
    let addr = args.addr.unwrap_or_else(|| config.server_addr());
    let url = format!("http://{}/health", addr);

    println!("tourist-safety v{}", env!("CARGO_PKG_VERSION"));
    println!();

    match reqwest::get(&url).await {
        Ok(response) if response.status().is_success() => {
            let health: HealthResponse = response.json().await?;
            println!("Server: RUNNING on {}", addr);
            println!("  Version: {}", health.version);
            println!("  Uptime: {}s", health.uptime_secs);
            println!("  Tracked tourists: {}", health.tracked_tourists);
            println!("  Weather: {}", configured(health.weather_configured));
            println!("  Attractions: {}", configured(health.poi_configured));
        }
        Ok(response) => {
            println!("Server: ERROR (status {})", response.status());
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", addr);
        }
    }

    Ok(())
}

fn configured(flag: bool) -> &'static str {
    if flag {
        "configured"
    } else {
        "not configured"
    }
}

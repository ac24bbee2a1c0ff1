//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "server.port")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
///
/// Works on the file only; environment overrides are not written back.
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load_file()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            print!("{}", render(&config));
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                let mut message = format!("Unknown config key: {}\n\nAvailable keys:", key);
                for k in Config::available_keys() {
                    message.push_str(&format!("\n  {}", k));
                }
                return Err(Error::Config(message));
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// Render all configuration values, with API keys masked
fn render(config: &Config) -> String {
    let mut out = String::new();

    out.push_str("[server]\n");
    out.push_str(&format!("host = \"{}\"\n", config.server.host));
    out.push_str(&format!("port = {}\n\n", config.server.port));

    out.push_str("[api_keys]\n");
    out.push_str(&format!("weather = {}\n", mask(&config.api_keys.weather)));
    out.push_str(&format!("poi = {}\n\n", mask(&config.api_keys.poi)));

    out.push_str("[gateway]\n");
    out.push_str(&format!("timeout_secs = {}\n\n", config.gateway.timeout_secs));

    out.push_str("[attractions]\n");
    out.push_str(&format!("radius_meters = {}\n", config.attractions.radius_meters));
    out.push_str(&format!(
        "per_keyword_limit = {}\n",
        config.attractions.per_keyword_limit
    ));
    out.push_str(&format!("max_results = {}\n", config.attractions.max_results));
    out.push_str(&format!(
        "keywords = [{}]\n\n",
        config
            .attractions
            .keywords
            .iter()
            .map(|k| format!("\"{}\"", k))
            .collect::<Vec<_>>()
            .join(", ")
    ));

    out.push_str("[tracking]\n");
    out.push_str(&format!(
        "inactivity_minutes = {}\n",
        config.tracking.inactivity_minutes
    ));
    out.push_str(&format!(
        "inactivity_distance_km = {}\n",
        config.tracking.inactivity_distance_km
    ));
    out.push_str(&format!("deviation_km = {}\n", config.tracking.deviation_km));
    out.push_str(&format!("stale_minutes = {}\n", config.tracking.stale_minutes));

    out
}

fn mask(key: &str) -> &'static str {
    if key.is_empty() {
        "\"\" # not configured"
    } else {
        "\"***\" # configured"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_masks_keys() {
        let mut config = Config::default();
        config.api_keys.weather = "secret-weather-key".to_string();

        let out = render(&config);

        assert!(!out.contains("secret-weather-key"));
        assert!(out.contains("weather = \"***\" # configured"));
        assert!(out.contains("poi = \"\" # not configured"));
        assert!(out.contains("[tracking]"));
        assert!(out.contains("\"historical site\""));
    }
}

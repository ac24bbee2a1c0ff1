//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/tourist-safety/config.toml
//!
//! API keys and the bind address can also come from the environment or a
//! `.env` file in the working directory. The process environment wins over
//! `.env`, and both win over the config file.

pub mod defaults;

use crate::constants::env;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// API keys for the weather and POI services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,

    /// Outbound HTTP settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Nearby attraction search settings
    #[serde(default)]
    pub attractions: AttractionsConfig,

    /// Anomaly detection thresholds
    #[serde(default)]
    pub tracking: TrackingConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// API keys for external services
///
/// An empty key means the service is not configured.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// OpenWeatherMap API key
    #[serde(default)]
    pub weather: String,

    /// TomTom search API key
    #[serde(default)]
    pub poi: String,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_gateway_timeout")]
    pub timeout_secs: u64,
}

/// Nearby attraction search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionsConfig {
    /// Search radius in meters
    #[serde(default = "default_attraction_radius")]
    pub radius_meters: u32,

    /// Results requested per keyword
    #[serde(default = "default_per_keyword_limit")]
    pub per_keyword_limit: u32,

    /// Maximum number of attractions returned
    #[serde(default = "default_max_attractions")]
    pub max_results: usize,

    /// Category keywords, searched in order
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

/// Anomaly detection thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(default = "default_inactivity_minutes")]
    pub inactivity_minutes: i64,

    #[serde(default = "default_inactivity_distance")]
    pub inactivity_distance_km: f64,

    #[serde(default = "default_deviation")]
    pub deviation_km: f64,

    #[serde(default = "default_stale_minutes")]
    pub stale_minutes: i64,
}

impl TrackingConfig {
    /// Inactivity window as a duration
    pub fn inactivity_after(&self) -> Result<chrono::Duration> {
        minutes("tracking.inactivity_minutes", self.inactivity_minutes)
    }

    /// Staleness window as a duration
    pub fn stale_after(&self) -> Result<chrono::Duration> {
        minutes("tracking.stale_minutes", self.stale_minutes)
    }

    /// Check that both windows are usable durations
    pub fn validate(&self) -> Result<()> {
        self.inactivity_after()?;
        self.stale_after()?;
        Ok(())
    }
}

fn minutes(key: &str, value: i64) -> Result<chrono::Duration> {
    if value < 0 {
        return Err(Error::Config(format!("{} must not be negative: {}", key, value)));
    }
    chrono::Duration::try_minutes(value)
        .ok_or_else(|| Error::Config(format!("{} is out of range: {}", key, value)))
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_gateway_timeout() -> u64 {
    DEFAULT_GATEWAY_TIMEOUT_SECS
}
fn default_attraction_radius() -> u32 {
    DEFAULT_ATTRACTION_RADIUS_METERS
}
fn default_per_keyword_limit() -> u32 {
    DEFAULT_PER_KEYWORD_LIMIT
}
fn default_max_attractions() -> usize {
    DEFAULT_MAX_ATTRACTIONS
}
fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}
fn default_inactivity_minutes() -> i64 {
    DEFAULT_INACTIVITY_MINUTES
}
fn default_inactivity_distance() -> f64 {
    DEFAULT_INACTIVITY_DISTANCE_KM
}
fn default_deviation() -> f64 {
    DEFAULT_DEVIATION_KM
}
fn default_stale_minutes() -> i64 {
    DEFAULT_STALE_MINUTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_gateway_timeout(),
        }
    }
}

impl Default for AttractionsConfig {
    fn default() -> Self {
        Self {
            radius_meters: default_attraction_radius(),
            per_keyword_limit: default_per_keyword_limit(),
            max_results: default_max_attractions(),
            keywords: default_keywords(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            inactivity_minutes: default_inactivity_minutes(),
            inactivity_distance_km: default_inactivity_distance(),
            deviation_km: default_deviation(),
            stale_minutes: default_stale_minutes(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path, then apply environment overrides
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;

        let dotenv = read_env_file(Path::new(ENV_FILE_NAME)).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring {}", ENV_FILE_NAME);
            HashMap::new()
        });
        config.apply_env_overrides(|name| {
            std::env::var(name)
                .ok()
                .or_else(|| dotenv.get(name).cloned())
        });

        Ok(config)
    }

    /// Load configuration from the default path only
    pub fn load_file() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            let config: Config = toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })?;
            config.tracking.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Override values from environment variables
    ///
    /// `lookup` resolves a variable name; empty values are ignored.
    /// Unparseable ports are ignored with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(env::WEATHER_API_KEY) {
            self.api_keys.weather = key;
        }
        if let Some(key) = get(env::POI_API_KEY).or_else(|| get(env::POI_API_KEY_ALT)) {
            self.api_keys.poi = key;
        }
        if let Some(host) = get(env::HOST) {
            self.server.host = host;
        }
        if let Some(port) = get(env::PORT) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid {}", env::PORT),
            }
        }
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["api_keys", "weather"] => Some(self.api_keys.weather.clone()),
            ["api_keys", "poi"] => Some(self.api_keys.poi.clone()),

            ["gateway", "timeout_secs"] => Some(self.gateway.timeout_secs.to_string()),

            ["attractions", "radius_meters"] => Some(self.attractions.radius_meters.to_string()),
            ["attractions", "per_keyword_limit"] => {
                Some(self.attractions.per_keyword_limit.to_string())
            }
            ["attractions", "max_results"] => Some(self.attractions.max_results.to_string()),
            ["attractions", "keywords"] => Some(self.attractions.keywords.join(",")),

            ["tracking", "inactivity_minutes"] => {
                Some(self.tracking.inactivity_minutes.to_string())
            }
            ["tracking", "inactivity_distance_km"] => {
                Some(self.tracking.inactivity_distance_km.to_string())
            }
            ["tracking", "deviation_km"] => Some(self.tracking.deviation_km.to_string()),
            ["tracking", "stale_minutes"] => Some(self.tracking.stale_minutes.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
            value
                .parse()
                .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
        }

        match parts.as_slice() {
            ["server", "host"] => self.server.host = value.to_string(),
            ["server", "port"] => self.server.port = parse(key, value)?,

            ["api_keys", "weather"] => self.api_keys.weather = value.to_string(),
            ["api_keys", "poi"] => self.api_keys.poi = value.to_string(),

            ["gateway", "timeout_secs"] => self.gateway.timeout_secs = parse(key, value)?,

            ["attractions", "radius_meters"] => {
                self.attractions.radius_meters = parse(key, value)?
            }
            ["attractions", "per_keyword_limit"] => {
                self.attractions.per_keyword_limit = parse(key, value)?
            }
            ["attractions", "max_results"] => self.attractions.max_results = parse(key, value)?,
            ["attractions", "keywords"] => {
                self.attractions.keywords = value
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(String::from)
                    .collect();
            }

            ["tracking", "inactivity_minutes"] => {
                let value = parse(key, value)?;
                minutes(key, value)?;
                self.tracking.inactivity_minutes = value
            }
            ["tracking", "inactivity_distance_km"] => {
                self.tracking.inactivity_distance_km = parse(key, value)?
            }
            ["tracking", "deviation_km"] => self.tracking.deviation_km = parse(key, value)?,
            ["tracking", "stale_minutes"] => {
                let value = parse(key, value)?;
                minutes(key, value)?;
                self.tracking.stale_minutes = value
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "api_keys.weather",
            "api_keys.poi",
            "gateway.timeout_secs",
            "attractions.radius_meters",
            "attractions.per_keyword_limit",
            "attractions.max_results",
            "attractions.keywords",
            "tracking.inactivity_minutes",
            "tracking.inactivity_distance_km",
            "tracking.deviation_km",
            "tracking.stale_minutes",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Read `KEY=value` pairs from a dotenv file; a missing file yields nothing
///
/// Values are returned, not exported to the process environment.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    dotenvy::from_path_iter(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        .map(|item| {
            item.map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
        })
        .collect()
}

//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default timeout for outbound gateway requests, in seconds
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 10;

/// Default attraction search radius in meters
pub const DEFAULT_ATTRACTION_RADIUS_METERS: u32 = 10_000;

/// Default number of results requested per keyword
pub const DEFAULT_PER_KEYWORD_LIMIT: u32 = 5;

/// Default cap on the aggregated attraction list
pub const DEFAULT_MAX_ATTRACTIONS: usize = 30;

/// Default attraction category keywords, searched in this order
pub const DEFAULT_KEYWORDS: [&str; 10] = [
    "park",
    "museum",
    "beach",
    "temple",
    "zoo",
    "garden",
    "historical site",
    "aquarium",
    "monument",
    "art gallery",
];

/// Minutes without meaningful movement before inactivity is flagged
pub const DEFAULT_INACTIVITY_MINUTES: i64 = 20;

/// Movement below this many kilometers counts as standing still
pub const DEFAULT_INACTIVITY_DISTANCE_KM: f64 = 0.05;

/// Growth in distance-to-destination (km) that counts as a deviation
pub const DEFAULT_DEVIATION_KM: f64 = 0.2;

/// Minutes without a report before a tourist is dropped from tracking
pub const DEFAULT_STALE_MINUTES: i64 = 15;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Dotenv file read from the working directory
pub const ENV_FILE_NAME: &str = ".env";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "tourist-safety";

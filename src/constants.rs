//! Centralized constants for the tourist-safety crate
//!
//! Values shared across modules live here so the scorer, the tracker and the
//! gateways agree on units and endpoints.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
}

/// External API endpoints
pub mod api {
    /// OpenWeatherMap current weather endpoint
    pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

    /// TomTom fuzzy search endpoint (keyword is appended as `{keyword}.json`)
    pub const TOMTOM_SEARCH_URL: &str = "https://api.tomtom.com/search/2/search";

    /// User agent sent with every outbound request
    pub const USER_AGENT: &str = concat!("tourist-safety/", env!("CARGO_PKG_VERSION"));
}

/// Environment variables consulted after the config file is loaded
pub mod env {
    /// OpenWeatherMap API key
    pub const WEATHER_API_KEY: &str = "OPENWEATHER_API_KEY";

    /// TomTom API key, under the name the web frontend already exports
    pub const POI_API_KEY: &str = "NEXT_PUBLIC_TOMTOM_KEY";

    /// TomTom API key, plain name
    pub const POI_API_KEY_ALT: &str = "TOMTOM_API_KEY";

    /// Server bind host
    pub const HOST: &str = "TOURIST_SAFETY_HOST";

    /// Server bind port
    pub const PORT: &str = "TOURIST_SAFETY_PORT";
}

/// Safety scoring rules
pub mod scoring {
    /// Score before any deductions
    pub const BASE_SCORE: i32 = 100;

    /// Weather conditions that count as adverse
    pub const ADVERSE_CONDITIONS: [&str; 6] =
        ["Rain", "Thunderstorm", "Fog", "Mist", "Snow", "Drizzle"];

    /// Deduction for adverse weather
    pub const ADVERSE_WEATHER_PENALTY: i32 = 25;

    /// Temperatures strictly above this (°C) count as extreme heat
    pub const HEAT_THRESHOLD_C: f64 = 35.0;

    /// Deduction for extreme heat
    pub const HEAT_PENALTY: i32 = 15;

    /// First hour (inclusive) considered daytime
    pub const DAY_START_HOUR: u32 = 6;

    /// Last hour (inclusive) considered daytime
    pub const DAY_END_HOUR: u32 = 22;

    /// Deduction for night travel
    pub const NIGHT_PENALTY: i32 = 30;

    /// Scores strictly above this are "Safe"
    pub const SAFE_ABOVE: i32 = 65;

    /// Scores strictly above this (and not safe) are "Caution"
    pub const CAUTION_ABOVE: i32 = 35;

    /// Place name reported when weather data is unavailable
    pub const UNAVAILABLE_DISTRICT: &str = "N/A";

    /// Place name reported when the weather response carries none
    pub const UNKNOWN_DISTRICT: &str = "Unknown Area";
}

//! Outbound gateways to third-party services
//!
//! Two collaborators sit behind traits so the scorer and the attraction search
//! never see HTTP:
//! - [`WeatherGateway`]: current conditions for a coordinate
//! - [`PoiGateway`]: keyword search for points of interest
//!
//! Weather failures are data, not errors: [`WeatherLookup::Unavailable`]
//! carries the reason so callers can degrade and tests can assert on it.

pub mod openweather;
pub mod tomtom;

use crate::config::Config;
use crate::constants::api::USER_AGENT;
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Current weather at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Condition category, e.g. "Rain" or "Clear"
    pub condition: Option<String>,
    /// Temperature in °C
    pub temperature_c: Option<f64>,
    /// Resolved place name
    pub place: String,
}

/// Why weather data could not be obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// No API key configured
    MissingApiKey,
    /// The request could not be sent or timed out
    Request(String),
    /// The service answered with a non-success status
    Status(u16),
    /// The response body could not be decoded
    Decode(String),
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "API key not configured"),
            Self::Request(e) => write!(f, "request failed: {}", e),
            Self::Status(code) => write!(f, "service returned status {}", code),
            Self::Decode(e) => write!(f, "invalid response: {}", e),
        }
    }
}

/// Outcome of a weather lookup
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherLookup {
    Available(WeatherReport),
    Unavailable(Unavailable),
}

impl WeatherLookup {
    /// The report, if one was obtained
    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            Self::Available(report) => Some(report),
            Self::Unavailable(_) => None,
        }
    }
}

/// A point of interest returned by the POI service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub address: Option<String>,
    /// Distance from the search center in meters, as reported by the service
    pub distance: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Source of current weather conditions
#[async_trait]
pub trait WeatherGateway: Send + Sync {
    /// Whether a credential is configured
    fn is_configured(&self) -> bool;

    /// Look up current weather at a coordinate
    ///
    /// Never fails: problems are reported as [`WeatherLookup::Unavailable`].
    async fn current(&self, at: Coordinates) -> WeatherLookup;
}

/// Source of points of interest
#[async_trait]
pub trait PoiGateway: Send + Sync {
    /// Whether a credential is configured
    fn is_configured(&self) -> bool;

    /// Search for points of interest matching `keyword` around `at`
    async fn search(
        &self,
        at: Coordinates,
        keyword: &str,
        radius_meters: u32,
        limit: u32,
    ) -> Result<Vec<PointOfInterest>>;
}

/// Build the shared HTTP client used by all gateways
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(Error::Http)
}

/// Build the configured weather and POI gateways
pub fn from_config(config: &Config) -> Result<(Arc<dyn WeatherGateway>, Arc<dyn PoiGateway>)> {
    let client = http_client(Duration::from_secs(config.gateway.timeout_secs))?;

    let weather: Arc<dyn WeatherGateway> = Arc::new(openweather::OpenWeather::new(
        client.clone(),
        config.api_keys.weather.clone(),
    ));
    let poi: Arc<dyn PoiGateway> =
        Arc::new(tomtom::TomTom::new(client, config.api_keys.poi.clone()));

    Ok((weather, poi))
}

/// Gateway doubles for tests
#[cfg(test)]
pub mod fixtures {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Weather gateway that always returns the same lookup
    pub struct FixedWeather(pub WeatherLookup);

    impl FixedWeather {
        pub fn unavailable() -> Self {
            Self(WeatherLookup::Unavailable(Unavailable::MissingApiKey))
        }

        pub fn report(condition: &str, temperature_c: f64, place: &str) -> Self {
            Self(WeatherLookup::Available(WeatherReport {
                condition: Some(condition.to_string()),
                temperature_c: Some(temperature_c),
                place: place.to_string(),
            }))
        }
    }

    #[async_trait]
    impl WeatherGateway for FixedWeather {
        fn is_configured(&self) -> bool {
            !matches!(self.0, WeatherLookup::Unavailable(Unavailable::MissingApiKey))
        }

        async fn current(&self, _at: Coordinates) -> WeatherLookup {
            self.0.clone()
        }
    }

    /// POI gateway answering from a keyword table and recording queries
    #[derive(Default)]
    pub struct FixturePoi {
        pub configured: bool,
        pub results: HashMap<String, Vec<PointOfInterest>>,
        pub failing: Vec<String>,
        pub queried: Mutex<Vec<String>>,
    }

    impl FixturePoi {
        pub fn new() -> Self {
            Self {
                configured: true,
                ..Default::default()
            }
        }

        pub fn with(mut self, keyword: &str, pois: Vec<PointOfInterest>) -> Self {
            self.results.insert(keyword.to_string(), pois);
            self
        }

        pub fn failing_on(mut self, keyword: &str) -> Self {
            self.failing.push(keyword.to_string());
            self
        }
    }

    #[async_trait]
    impl PoiGateway for FixturePoi {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn search(
            &self,
            _at: Coordinates,
            keyword: &str,
            _radius_meters: u32,
            limit: u32,
        ) -> Result<Vec<PointOfInterest>> {
            self.queried.lock().unwrap().push(keyword.to_string());
            if self.failing.iter().any(|k| k == keyword) {
                return Err(Error::Poi(format!("search for {} failed", keyword)));
            }
            let mut pois = self.results.get(keyword).cloned().unwrap_or_default();
            pois.truncate(limit as usize);
            Ok(pois)
        }
    }

    pub fn poi(name: &str, distance: f64) -> PointOfInterest {
        PointOfInterest {
            name: name.to_string(),
            address: Some(format!("{} Street", name)),
            distance: Some(distance),
            lat: Some(12.97),
            lon: Some(77.59),
        }
    }
}

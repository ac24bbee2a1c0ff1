//! OpenWeatherMap current weather gateway
//!
//! Uses the `data/2.5/weather` endpoint with metric units.

use crate::constants::api::OPENWEATHER_URL;
use crate::constants::scoring::UNKNOWN_DISTRICT;
use crate::gateway::{Unavailable, WeatherGateway, WeatherLookup, WeatherReport};
use crate::geo::Coordinates;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// OpenWeatherMap gateway
#[derive(Debug, Clone)]
pub struct OpenWeather {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Subset of the current weather response we read
#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(default)]
    weather: Vec<Condition>,
    main: Option<MainBlock>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: Option<f64>,
}

impl From<CurrentWeather> for WeatherReport {
    fn from(body: CurrentWeather) -> Self {
        let place = body
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNKNOWN_DISTRICT.to_string());

        WeatherReport {
            condition: body.weather.into_iter().next().and_then(|c| c.main),
            temperature_c: body.main.and_then(|m| m.temp),
            place,
        }
    }
}

impl OpenWeather {
    /// Create a gateway; an empty key leaves it unconfigured
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: OPENWEATHER_URL.to_string(),
        }
    }

    /// Point the gateway at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the request URL for a coordinate
    fn url(&self, at: Coordinates) -> String {
        format!(
            "{}?lat={}&lon={}&appid={}&units=metric",
            self.base_url,
            at.lat,
            at.lon,
            urlencoding::encode(&self.api_key)
        )
    }

    /// Decode a response body
    fn parse(body: &str) -> Result<WeatherReport, Unavailable> {
        serde_json::from_str::<CurrentWeather>(body)
            .map(WeatherReport::from)
            .map_err(|e| Unavailable::Decode(e.to_string()))
    }

    async fn fetch(&self, at: Coordinates) -> Result<WeatherReport, Unavailable> {
        if self.api_key.is_empty() {
            return Err(Unavailable::MissingApiKey);
        }

        let response = self
            .client
            .get(self.url(at))
            .send()
            .await
            .map_err(|e| Unavailable::Request(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(Unavailable::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Unavailable::Request(e.without_url().to_string()))?;

        Self::parse(&body)
    }
}

#[async_trait]
impl WeatherGateway for OpenWeather {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn current(&self, at: Coordinates) -> WeatherLookup {
        match self.fetch(at).await {
            Ok(report) => {
                debug!(place = %report.place, condition = ?report.condition, "Weather fetched");
                WeatherLookup::Available(report)
            }
            Err(Unavailable::MissingApiKey) => {
                debug!("Weather API key not configured, skipping weather check");
                WeatherLookup::Unavailable(Unavailable::MissingApiKey)
            }
            Err(reason) => {
                warn!(%reason, "Weather lookup failed");
                WeatherLookup::Unavailable(reason)
            }
        }
    }
}

//! TomTom search gateway
//!
//! Keyword search around a coordinate via the Search API v2.

use crate::constants::api::TOMTOM_SEARCH_URL;
use crate::error::{Error, Result};
use crate::gateway::{PoiGateway, PointOfInterest};
use crate::geo::Coordinates;
use async_trait::async_trait;
use serde::Deserialize;

/// TomTom search gateway
#[derive(Debug, Clone)]
pub struct TomTom {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    poi: Option<PoiBlock>,
    address: Option<AddressBlock>,
    dist: Option<f64>,
    position: Option<PositionBlock>,
}

#[derive(Debug, Deserialize)]
struct PoiBlock {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressBlock {
    freeform_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PositionBlock {
    lat: Option<f64>,
    lon: Option<f64>,
}

impl SearchResult {
    /// Convert to a point of interest; unnamed results are dropped
    fn into_poi(self) -> Option<PointOfInterest> {
        let name = self.poi.and_then(|p| p.name).filter(|n| !n.is_empty())?;
        let (lat, lon) = match self.position {
            Some(p) => (p.lat, p.lon),
            None => (None, None),
        };

        Some(PointOfInterest {
            name,
            address: self.address.and_then(|a| a.freeform_address),
            distance: self.dist,
            lat,
            lon,
        })
    }
}

impl TomTom {
    /// Create a gateway; an empty key leaves it unconfigured
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: TOMTOM_SEARCH_URL.to_string(),
        }
    }

    /// Point the gateway at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the request URL for a keyword search
    fn url(&self, at: Coordinates, keyword: &str, radius_meters: u32, limit: u32) -> String {
        format!(
            "{}/{}.json?key={}&lat={}&lon={}&radius={}&limit={}",
            self.base_url,
            urlencoding::encode(keyword),
            urlencoding::encode(&self.api_key),
            at.lat,
            at.lon,
            radius_meters,
            limit
        )
    }

    /// Decode a response body
    fn parse(body: &str) -> Result<Vec<PointOfInterest>> {
        let response: SearchResponse = serde_json::from_str(body)
            .map_err(|e| Error::Poi(format!("Failed to parse TomTom response: {}", e)))?;

        Ok(response
            .results
            .into_iter()
            .filter_map(SearchResult::into_poi)
            .collect())
    }
}

#[async_trait]
impl PoiGateway for TomTom {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn search(
        &self,
        at: Coordinates,
        keyword: &str,
        radius_meters: u32,
        limit: u32,
    ) -> Result<Vec<PointOfInterest>> {
        if self.api_key.is_empty() {
            return Err(Error::MissingCredential("poi"));
        }

        let response = self
            .client
            .get(self.url(at, keyword, radius_meters, limit))
            .send()
            .await
            .map_err(|e| Error::Poi(format!("TomTom request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            return Err(Error::Poi(format!(
                "TomTom returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Poi(format!("TomTom response unreadable: {}", e.without_url())))?;

        Self::parse(&body)
    }
}

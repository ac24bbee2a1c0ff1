//! Server shared state
//!
//! Holds the services behind the HTTP handlers.

use crate::attractions::AttractionSearch;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::{self, PoiGateway, WeatherGateway};
use crate::safety::SafetyScorer;
use crate::tracking::{MemoryStore, StateStore, Thresholds, Tracker};
use std::sync::Arc;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState {
    /// Safety scorer backed by the weather gateway
    pub scorer: SafetyScorer,

    /// Attraction search backed by the POI gateway
    pub attractions: AttractionSearch,

    /// Tourist tracker; shared with spawned sweeps
    pub tracker: Arc<Tracker>,

    started_at: Instant,
}

impl AppState {
    /// Create application state with live gateways and an in-memory store
    pub fn new(config: &Config) -> Result<Self> {
        let (weather, poi) = gateway::from_config(config)?;
        Self::with_parts(config, weather, poi, Arc::new(MemoryStore::new()))
    }

    /// Create application state from explicit collaborators
    ///
    /// Fails if the tracking thresholds are out of range.
    pub fn with_parts(
        config: &Config,
        weather: Arc<dyn WeatherGateway>,
        poi: Arc<dyn PoiGateway>,
        store: Arc<dyn StateStore>,
    ) -> Result<Self> {
        let thresholds = Thresholds::try_from(&config.tracking)?;

        Ok(Self {
            scorer: SafetyScorer::new(weather),
            attractions: AttractionSearch::new(poi, config.attractions.clone()),
            tracker: Arc::new(Tracker::new(store, thresholds)),
            started_at: Instant::now(),
        })
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fixtures::{FixedWeather, FixturePoi};

    #[test]
    fn test_out_of_range_thresholds_are_rejected() {
        let mut config = Config::default();
        config.tracking.stale_minutes = i64::MAX / 2;

        let result = AppState::with_parts(
            &config,
            Arc::new(FixedWeather::unavailable()),
            Arc::new(FixturePoi::default()),
            Arc::new(MemoryStore::new()),
        );

        assert!(matches!(result, Err(crate::error::Error::Config(_))));
    }
}

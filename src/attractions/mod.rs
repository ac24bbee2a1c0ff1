//! Nearby attraction search
//!
//! Runs one POI search per category keyword, in keyword order, and merges the
//! results: names are deduplicated with the first keyword to return a name
//! keeping it, then everything is sorted by distance and capped.
//! A failing keyword is logged and skipped.

use crate::config::AttractionsConfig;
use crate::error::{Error, Result};
use crate::gateway::{PoiGateway, PointOfInterest};
use crate::geo::Coordinates;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Merge per-keyword batches into the final list
///
/// Batches must be in keyword order. Entries without a distance sort last.
pub fn aggregate<I>(batches: I, max_results: usize) -> Vec<PointOfInterest>
where
    I: IntoIterator<Item = Vec<PointOfInterest>>,
{
    let mut seen = HashSet::new();
    let mut merged: Vec<PointOfInterest> = batches
        .into_iter()
        .flatten()
        .filter(|poi| seen.insert(poi.name.clone()))
        .collect();

    merged.sort_by(|a, b| compare_distance(a.distance, b.distance));
    merged.truncate(max_results);
    merged
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keyword-driven attraction search over a POI gateway
#[derive(Clone)]
pub struct AttractionSearch {
    gateway: Arc<dyn PoiGateway>,
    settings: AttractionsConfig,
}

impl AttractionSearch {
    pub fn new(gateway: Arc<dyn PoiGateway>, settings: AttractionsConfig) -> Self {
        Self { gateway, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_configured()
    }

    /// Find attractions around `at`, nearest first
    ///
    /// Fails only when the POI service has no credential; individual keyword
    /// failures shrink the result instead.
    pub async fn nearby(&self, at: Coordinates) -> Result<Vec<PointOfInterest>> {
        if !self.gateway.is_configured() {
            return Err(Error::MissingCredential("poi"));
        }

        let mut batches = Vec::with_capacity(self.settings.keywords.len());

        for keyword in &self.settings.keywords {
            match self
                .gateway
                .search(
                    at,
                    keyword,
                    self.settings.radius_meters,
                    self.settings.per_keyword_limit,
                )
                .await
            {
                Ok(mut pois) => {
                    debug!(keyword = %keyword, count = pois.len(), "POI search returned");
                    pois.truncate(self.settings.per_keyword_limit as usize);
                    batches.push(pois);
                }
                Err(e) => {
                    warn!(keyword = %keyword, error = %e, "POI search failed, skipping keyword");
                }
            }
        }

        Ok(aggregate(batches, self.settings.max_results))
    }
}

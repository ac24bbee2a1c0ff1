//! Tourist tracking and movement anomaly detection
//!
//! Each location report is checked against the tourist's last known state
//! before that state is overwritten:
//! - prolonged inactivity: more than 20 minutes since the last report and
//!   less than 50 m moved
//! - route deviation: distance to the destination grew by more than 0.2 km
//!
//! After every report a sweep drops tourists not heard from for 15 minutes
//! and logs a sudden drop-off for each.

pub mod detector;
pub mod store;
pub mod tracker;

pub use detector::detect;
pub use store::{MemoryStore, StateStore};
pub use tracker::{SweepReport, Tracker};

use crate::config::defaults::{
    DEFAULT_DEVIATION_KM, DEFAULT_INACTIVITY_DISTANCE_KM, DEFAULT_INACTIVITY_MINUTES,
    DEFAULT_STALE_MINUTES,
};
use crate::config::TrackingConfig;
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An incoming position report
#[derive(Debug, Clone, PartialEq)]
pub struct LocationReport {
    pub tourist_id: String,
    pub position: Coordinates,
    pub destination: Option<Coordinates>,
}

impl LocationReport {
    pub fn new(tourist_id: impl Into<String>, position: Coordinates) -> Self {
        Self {
            tourist_id: tourist_id.into(),
            position,
            destination: None,
        }
    }

    pub fn with_destination(mut self, destination: Coordinates) -> Self {
        self.destination = Some(destination);
        self
    }
}

/// Last known state of one tourist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouristRecord {
    pub position: Coordinates,
    pub timestamp: DateTime<Utc>,
    pub destination: Option<Coordinates>,
}

impl TouristRecord {
    /// Record built from a report received at `now`
    pub fn from_report(report: &LocationReport, now: DateTime<Utc>) -> Self {
        Self {
            position: report.position,
            timestamp: now,
            destination: report.destination,
        }
    }
}

/// Kinds of movement anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    ProlongedInactivity,
    RouteDeviation,
    SuddenDropOff,
}

/// A detected anomaly for one tourist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub tourist_id: String,
}

impl Anomaly {
    pub fn new(kind: AnomalyKind, tourist_id: impl Into<String>) -> Self {
        Self {
            kind,
            tourist_id: tourist_id.into(),
        }
    }
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            AnomalyKind::ProlongedInactivity => {
                write!(f, "Prolonged inactivity detected for tourist {}.", self.tourist_id)
            }
            AnomalyKind::RouteDeviation => {
                write!(f, "Route deviation detected for tourist {}.", self.tourist_id)
            }
            AnomalyKind::SuddenDropOff => {
                write!(f, "Sudden location drop-off for tourist {}.", self.tourist_id)
            }
        }
    }
}

/// Detection thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Silence longer than this may be inactivity
    pub inactivity_after: Duration,
    /// Movement under this (km) counts as standing still
    pub inactivity_distance_km: f64,
    /// Growth in distance-to-destination (km) above this is a deviation
    pub deviation_km: f64,
    /// Records older than this are dropped by the sweep
    pub stale_after: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            inactivity_after: Duration::minutes(DEFAULT_INACTIVITY_MINUTES),
            inactivity_distance_km: DEFAULT_INACTIVITY_DISTANCE_KM,
            deviation_km: DEFAULT_DEVIATION_KM,
            stale_after: Duration::minutes(DEFAULT_STALE_MINUTES),
        }
    }
}

impl TryFrom<&TrackingConfig> for Thresholds {
    type Error = Error;

    fn try_from(config: &TrackingConfig) -> Result<Self> {
        Ok(Self {
            inactivity_after: config.inactivity_after()?,
            inactivity_distance_km: config.inactivity_distance_km,
            deviation_km: config.deviation_km,
            stale_after: config.stale_after()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_messages() {
        assert_eq!(
            Anomaly::new(AnomalyKind::ProlongedInactivity, "t-1").to_string(),
            "Prolonged inactivity detected for tourist t-1."
        );
        assert_eq!(
            Anomaly::new(AnomalyKind::RouteDeviation, "t-1").to_string(),
            "Route deviation detected for tourist t-1."
        );
        assert_eq!(
            Anomaly::new(AnomalyKind::SuddenDropOff, "t-1").to_string(),
            "Sudden location drop-off for tourist t-1."
        );
    }

    #[test]
    fn test_default_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.inactivity_after, Duration::minutes(20));
        assert_eq!(t.stale_after, Duration::minutes(15));
        assert_eq!(t.inactivity_distance_km, 0.05);
        assert_eq!(t.deviation_km, 0.2);
    }

    #[test]
    fn test_thresholds_from_config() {
        let t = Thresholds::try_from(&TrackingConfig::default()).unwrap();
        assert_eq!(t, Thresholds::default());

        let huge = TrackingConfig {
            stale_minutes: i64::MAX / 2,
            ..TrackingConfig::default()
        };
        assert!(matches!(Thresholds::try_from(&huge), Err(Error::Config(_))));

        let negative = TrackingConfig {
            inactivity_minutes: -1,
            ..TrackingConfig::default()
        };
        assert!(Thresholds::try_from(&negative).is_err());
    }

    #[test]
    fn test_record_from_report() {
        let now = Utc::now();
        let report = LocationReport::new("t-9", Coordinates::new(1.0, 2.0))
            .with_destination(Coordinates::new(3.0, 4.0));
        let record = TouristRecord::from_report(&report, now);
        assert_eq!(record.position, Coordinates::new(1.0, 2.0));
        assert_eq!(record.destination, Some(Coordinates::new(3.0, 4.0)));
        assert_eq!(record.timestamp, now);
    }
}

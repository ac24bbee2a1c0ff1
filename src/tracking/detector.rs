//! Anomaly checks for a single location report

use crate::tracking::{Anomaly, AnomalyKind, LocationReport, Thresholds, TouristRecord};
use chrono::{DateTime, Utc};

/// Compare a report against the tourist's prior record
///
/// Returns anomalies in check order: inactivity, then route deviation.
/// A first report (no prior record) never yields anomalies.
pub fn detect(
    prior: Option<&TouristRecord>,
    report: &LocationReport,
    now: DateTime<Utc>,
    thresholds: &Thresholds,
) -> Vec<Anomaly> {
    let Some(prior) = prior else {
        return Vec::new();
    };

    let mut anomalies = Vec::new();

    if is_inactive(prior, report, now, thresholds) {
        anomalies.push(Anomaly::new(
            AnomalyKind::ProlongedInactivity,
            report.tourist_id.as_str(),
        ));
    }

    if is_deviating(prior, report, thresholds) {
        anomalies.push(Anomaly::new(
            AnomalyKind::RouteDeviation,
            report.tourist_id.as_str(),
        ));
    }

    anomalies
}

fn is_inactive(
    prior: &TouristRecord,
    report: &LocationReport,
    now: DateTime<Utc>,
    thresholds: &Thresholds,
) -> bool {
    let elapsed = now - prior.timestamp;
    let moved_km = prior.position.distance_km(report.position);
    elapsed > thresholds.inactivity_after && moved_km < thresholds.inactivity_distance_km
}

/// Both positions are measured against the new report's destination
fn is_deviating(prior: &TouristRecord, report: &LocationReport, thresholds: &Thresholds) -> bool {
    let (Some(destination), Some(_)) = (report.destination, prior.destination) else {
        return false;
    };

    let current_km = report.position.distance_km(destination);
    let previous_km = prior.position.distance_km(destination);
    current_km > previous_km + thresholds.deviation_km
}

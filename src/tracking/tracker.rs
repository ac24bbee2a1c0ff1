//! Report handling and staleness sweep over a [`StateStore`]
//!
//! Reports for the same tourist are serialized by a per-id async lock held
//! across read, detect and write. Reports for different tourists never wait
//! on each other. The sweep takes the same per-id lock before deleting, and
//! re-checks the record's age under it.

use crate::error::{Error, Result};
use crate::tracking::{
    detect, Anomaly, AnomalyKind, LocationReport, StateStore, Thresholds, TouristRecord,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Outcome of a staleness sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Tourist ids removed, each logged as a sudden drop-off
    pub removed: Vec<String>,
    /// True if another sweep was already running and this one did nothing
    pub skipped: bool,
}

/// Tracks tourists and flags movement anomalies
pub struct Tracker {
    store: Arc<dyn StateStore>,
    thresholds: Thresholds,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
    sweeping: AtomicBool,
}

/// Clears the sweep flag when the sweep ends, however it ends
struct SweepGuard<'a>(&'a AtomicBool);

impl Drop for SweepGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Tracker {
    pub fn new(store: Arc<dyn StateStore>, thresholds: Thresholds) -> Self {
        Self {
            store,
            thresholds,
            locks: Mutex::new(HashMap::new()),
            sweeping: AtomicBool::new(false),
        }
    }

    /// Number of tourists currently tracked
    pub fn tracked_count(&self) -> Result<usize> {
        self.store.len()
    }

    /// Lock handle for one tourist id
    fn key_lock(&self, tourist_id: &str) -> Result<Arc<tokio::sync::Mutex<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| Error::Store("tracker lock table poisoned".to_string()))?;
        Ok(locks
            .entry(tourist_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone())
    }

    /// Drop a lock entry nobody else holds
    fn prune_lock(&self, tourist_id: &str) {
        if let Ok(mut locks) = self.locks.lock() {
            if locks
                .get(tourist_id)
                .is_some_and(|lock| Arc::strong_count(lock) == 1)
            {
                locks.remove(tourist_id);
            }
        }
    }

    /// Check a report against stored state, then store it
    ///
    /// The record is overwritten whether or not anomalies were found.
    pub async fn report(&self, report: &LocationReport, now: DateTime<Utc>) -> Result<Vec<Anomaly>> {
        let lock = self.key_lock(&report.tourist_id)?;
        let _guard = lock.lock().await;

        let prior = self.store.get(&report.tourist_id)?;
        let anomalies = detect(prior.as_ref(), report, now, &self.thresholds);

        for anomaly in &anomalies {
            warn!(
                tourist_id = %report.tourist_id,
                kind = ?anomaly.kind,
                "ANOMALY: {}",
                anomaly
            );
        }

        self.store
            .put(&report.tourist_id, TouristRecord::from_report(report, now))?;

        Ok(anomalies)
    }

    /// Remove every tourist whose last report is older than the stale threshold
    ///
    /// Returns immediately with `skipped` set if a sweep is already running.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport> {
        if self.sweeping.swap(true, Ordering::AcqRel) {
            debug!("Sweep already running, skipping");
            return Ok(SweepReport {
                removed: Vec::new(),
                skipped: true,
            });
        }
        let _running = SweepGuard(&self.sweeping);

        let candidates: Vec<String> = self
            .store
            .snapshot()?
            .into_iter()
            .filter(|(_, record)| self.is_stale(record, now))
            .map(|(id, _)| id)
            .collect();

        let mut report = SweepReport::default();

        for tourist_id in candidates {
            let lock = self.key_lock(&tourist_id)?;
            let removed = {
                let _guard = lock.lock().await;
                match self.store.get(&tourist_id)? {
                    Some(record) if self.is_stale(&record, now) => {
                        self.store.delete(&tourist_id)?.is_some()
                    }
                    _ => false,
                }
            };
            drop(lock);

            if removed {
                let anomaly = Anomaly::new(AnomalyKind::SuddenDropOff, tourist_id.as_str());
                warn!(tourist_id = %tourist_id, kind = ?anomaly.kind, "ANOMALY: {}", anomaly);
                self.prune_lock(&tourist_id);
                report.removed.push(tourist_id);
            }
        }

        Ok(report)
    }

    fn is_stale(&self, record: &TouristRecord, now: DateTime<Utc>) -> bool {
        now - record.timestamp > self.thresholds.stale_after
    }
}

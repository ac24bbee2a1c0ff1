//! Tourist state storage
//!
//! The tracker only talks to [`StateStore`], so the in-process map can be
//! replaced by a shared or persistent backend.

use crate::error::{Error, Result};
use crate::tracking::TouristRecord;
use std::collections::HashMap;
use std::sync::RwLock;

/// Storage for the last known state of each tourist
///
/// Holds at most one record per tourist id; `put` replaces it in full.
pub trait StateStore: Send + Sync {
    /// Fetch a tourist's record
    fn get(&self, tourist_id: &str) -> Result<Option<TouristRecord>>;

    /// Insert or replace a tourist's record
    fn put(&self, tourist_id: &str, record: TouristRecord) -> Result<()>;

    /// Remove a tourist's record, returning it if present
    fn delete(&self, tourist_id: &str) -> Result<Option<TouristRecord>>;

    /// Copy of every (id, record) pair at this moment
    fn snapshot(&self) -> Result<Vec<(String, TouristRecord)>>;

    /// Number of tracked tourists
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-process store; lost on restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, TouristRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Store("state store lock poisoned".to_string())
}

impl StateStore for MemoryStore {
    fn get(&self, tourist_id: &str) -> Result<Option<TouristRecord>> {
        Ok(self.records.read().map_err(poisoned)?.get(tourist_id).cloned())
    }

    fn put(&self, tourist_id: &str, record: TouristRecord) -> Result<()> {
        self.records
            .write()
            .map_err(poisoned)?
            .insert(tourist_id.to_string(), record);
        Ok(())
    }

    fn delete(&self, tourist_id: &str) -> Result<Option<TouristRecord>> {
        Ok(self.records.write().map_err(poisoned)?.remove(tourist_id))
    }

    fn snapshot(&self) -> Result<Vec<(String, TouristRecord)>> {
        Ok(self
            .records
            .read()
            .map_err(poisoned)?
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }
}

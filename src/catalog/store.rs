//! Versioned catalog storage with optimistic concurrency control.
//!
//! The store hands out values tagged with a version and accepts saves only
//! when the caller's expected version still matches. A mismatched save fails
//! with [`StoreError::Contention`], the signal the merge engine and scan
//! workers retry on. This mirrors a transactional datastore's
//! refresh-then-modify discipline without holding any long-lived locks.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use crate::catalog::record::{CatalogKey, CatalogRecord, ScanState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The value changed since it was loaded; reload and retry.
    #[error("save aborted due to concurrent modification")]
    Contention,
    /// No scan state has been created yet.
    #[error("scan state missing")]
    Missing,
}

/// A value plus the storage version it was loaded at.
///
/// Version 0 means "not yet stored"; passing 0 as the expected version
/// creates the value if and only if it is still absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    pub fn new(value: T, version: u64) -> Self {
        Versioned { value, version }
    }
}

/// Keyed storage for catalog records and the scan state.
///
/// Implementations must make each load and each save individually atomic and
/// must reject saves whose expected version is stale. They do not need to
/// provide any cross-key transactional guarantees; callers only ever mutate
/// one value per save.
pub trait CatalogStore: Send + Sync {
    fn load_record(&self, key: &CatalogKey) -> Option<Versioned<CatalogRecord>>;

    /// Saves a record if the stored version still equals `expected_version`.
    fn save_record(
        &self,
        record: CatalogRecord,
        expected_version: u64,
    ) -> Result<(), StoreError>;

    /// Loads the single scan state slot, or `None` before it is created.
    fn load_scan_state(&self) -> Option<Versioned<ScanState>>;

    fn save_scan_state(&self, state: ScanState, expected_version: u64) -> Result<(), StoreError>;
}

/// In-memory store used by the CLI and tests.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<CatalogKey, Versioned<CatalogRecord>>>,
    scan_state: Mutex<Option<Versioned<ScanState>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a fresh scan state, as the bootstrap collaborator would
    /// before a scan begins.
    pub fn create_scan_state(&self) {
        let mut slot = self.scan_state.lock().unwrap();
        *slot = Some(Versioned::new(ScanState::default(), 1));
    }

    /// Snapshot of all records, sorted by key for deterministic output.
    pub fn records(&self) -> Vec<CatalogRecord> {
        let records = self.records.lock().unwrap();
        let mut all: Vec<CatalogRecord> =
            records.values().map(|v| v.value.clone()).collect();
        all.sort_by(|a, b| a.key.cmp(&b.key));
        all
    }
}

impl CatalogStore for MemoryStore {
    fn load_record(&self, key: &CatalogKey) -> Option<Versioned<CatalogRecord>> {
        self.records.lock().unwrap().get(key).cloned()
    }

    fn save_record(&self, record: CatalogRecord, expected_version: u64) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let current = records.get(&record.key).map(|v| v.version).unwrap_or(0);
        if current != expected_version {
            return Err(StoreError::Contention);
        }
        records.insert(record.key.clone(), Versioned::new(record, current + 1));
        Ok(())
    }

    fn load_scan_state(&self) -> Option<Versioned<ScanState>> {
        self.scan_state.lock().unwrap().clone()
    }

    fn save_scan_state(&self, state: ScanState, expected_version: u64) -> Result<(), StoreError> {
        let mut slot = self.scan_state.lock().unwrap();
        let current = slot.as_ref().map(|v| v.version).unwrap_or(0);
        if current != expected_version {
            return Err(StoreError::Contention);
        }
        *slot = Some(Versioned::new(state, current + 1));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key() -> CatalogKey {
        CatalogKey::new("Hello", "", "en")
    }

    #[test]
    fn create_then_load_record() {
        let store = MemoryStore::new();
        assert_eq!(store.load_record(&key()), None);

        let record = CatalogRecord::new(key());
        store.save_record(record.clone(), 0).unwrap();

        let loaded = store.load_record(&key()).unwrap();
        assert_eq!(loaded.value, record);
        assert_eq!(loaded.version, 1);
    }

    #[test]
    fn stale_record_save_is_contention() {
        let store = MemoryStore::new();
        store.save_record(CatalogRecord::new(key()), 0).unwrap();

        // A second create against version 0 must lose.
        assert_eq!(
            store.save_record(CatalogRecord::new(key()), 0),
            Err(StoreError::Contention)
        );

        // Saving at the current version succeeds and bumps it.
        let loaded = store.load_record(&key()).unwrap();
        store.save_record(loaded.value, loaded.version).unwrap();
        assert_eq!(store.load_record(&key()).unwrap().version, 2);
    }

    #[test]
    fn scan_state_slot() {
        let store = MemoryStore::new();
        assert_eq!(store.load_scan_state(), None);

        store.create_scan_state();
        let loaded = store.load_scan_state().unwrap();
        assert_eq!(loaded.value, ScanState::default());

        let mut state = loaded.value;
        state.files_left = 42;
        store.save_scan_state(state.clone(), loaded.version).unwrap();
        assert_eq!(store.load_scan_state().unwrap().value, state);

        // Stale version is rejected.
        assert_eq!(
            store.save_scan_state(ScanState::default(), loaded.version),
            Err(StoreError::Contention)
        );
    }
}

//! Per-batch scan worker.
//!
//! Processes one batch of files: read, extract, merge every entry into the
//! catalog, then decrement the shared remaining-file counter. The whole batch
//! is idempotent with respect to re-execution, so the executor may safely
//! re-run it after a failure.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use uuid::Uuid;

use crate::catalog::merge::{backoff, merge_entry};
use crate::catalog::store::{CatalogStore, StoreError};
use crate::core::extract::parse_file;
use crate::core::file_scanner::file_extension;

/// Attempts to decrement the counter before the batch is surfaced as failed
/// to the executor, whose own retry policy then governs the batch.
const DECREMENT_ATTEMPTS: u32 = 3;

pub struct ScanWorker {
    store: Arc<dyn CatalogStore>,
    language_code: String,
    markup_extensions: Vec<String>,
}

impl ScanWorker {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        language_code: impl Into<String>,
        markup_extensions: Vec<String>,
    ) -> Self {
        ScanWorker {
            store,
            language_code: language_code.into(),
            markup_extensions,
        }
    }

    /// Extracts and merges every file of the batch, then decrements
    /// `files_left` by the batch length.
    ///
    /// Files that no longer exist are skipped: a deploy or cleanup racing the
    /// scan can legitimately remove files between discovery and processing.
    pub fn process_batch(&self, scan_id: Uuid, files: &[PathBuf]) -> Result<()> {
        for path in files {
            let Ok(bytes) = fs::read(path) else {
                continue;
            };
            let content = String::from_utf8_lossy(&bytes);
            let extension = file_extension(path).unwrap_or_default();

            for entry in parse_file(&content, &extension, &self.markup_extensions) {
                merge_entry(&*self.store, &entry, scan_id, &self.language_code)?;
            }
        }

        self.decrement_files_left(files.len())
    }

    /// Refresh-then-modify decrement with bounded retry.
    ///
    /// Each attempt re-reads the state so a concurrent decrement is never
    /// overwritten; collisions are resolved by randomized backoff rather than
    /// blocking.
    fn decrement_files_left(&self, batch_len: usize) -> Result<()> {
        for attempt in 1..=DECREMENT_ATTEMPTS {
            let versioned = self
                .store
                .load_scan_state()
                .ok_or(StoreError::Missing)
                .context("decrementing files_left")?;

            let mut state = versioned.value;
            state.files_left = state.files_left.saturating_sub(batch_len);

            match self.store.save_scan_state(state, versioned.version) {
                Ok(()) => return Ok(()),
                Err(StoreError::Contention) if attempt < DECREMENT_ATTEMPTS => {
                    eprintln!(
                        "{} Contention decrementing 'files_left' on scan state, retrying...",
                        "warning:".bold().yellow()
                    );
                    backoff();
                }
                Err(err) => {
                    eprintln!(
                        "{} Contention decrementing 'files_left' on scan state, giving up; \
                         the batch will error and retry.",
                        "warning:".bold().yellow()
                    );
                    return Err(err).context("decrementing files_left");
                }
            }
        }

        unreachable!("decrement loop either returns or propagates the final error")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::catalog::record::ScanState;
    use crate::catalog::store::{MemoryStore, Versioned};
    use crate::catalog::CatalogRecord;
    use crate::core::DEFAULT_TRANSLATION_GROUP;

    fn markup() -> Vec<String> {
        vec![".html".to_string()]
    }

    fn store_with_state(files_left: usize) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.create_scan_state();
        let versioned = store.load_scan_state().unwrap();
        let mut state = versioned.value;
        state.files_left = files_left;
        state.total_files = files_left;
        store.save_scan_state(state, versioned.version).unwrap();
        store
    }

    #[test]
    fn batch_extracts_merges_and_decrements() {
        let tmp = TempDir::new().unwrap();
        let html = tmp.path().join("page.html");
        let py = tmp.path().join("views.py");
        fs::write(&html, "{% trans 'Hello' %}").unwrap();
        fs::write(&py, "_('Bye')").unwrap();

        let store = store_with_state(2);
        let worker = ScanWorker::new(store.clone(), "en", markup());
        worker
            .process_batch(Uuid::new_v4(), &[html, py])
            .unwrap();

        let texts: Vec<String> = store.records().iter().map(|r| r.text.clone()).collect();
        assert_eq!(texts, vec!["Bye".to_string(), "Hello".to_string()]);
        for record in store.records() {
            assert_eq!(
                record.groups.iter().collect::<Vec<_>>(),
                vec![DEFAULT_TRANSLATION_GROUP]
            );
        }
        assert_eq!(store.load_scan_state().unwrap().value.files_left, 0);
    }

    #[test]
    fn missing_files_are_skipped_but_counted() {
        let store = store_with_state(3);
        let worker = ScanWorker::new(store.clone(), "en", markup());

        let ghosts = vec![
            PathBuf::from("/nonexistent/a.html"),
            PathBuf::from("/nonexistent/b.py"),
            PathBuf::from("/nonexistent/c.py"),
        ];
        worker.process_batch(Uuid::new_v4(), &ghosts).unwrap();

        assert_eq!(store.records().len(), 0);
        assert_eq!(store.load_scan_state().unwrap().value.files_left, 0);
    }

    #[test]
    fn counter_never_goes_negative() {
        let store = store_with_state(1);
        let worker = ScanWorker::new(store.clone(), "en", markup());

        let ghosts = vec![
            PathBuf::from("/nonexistent/a.py"),
            PathBuf::from("/nonexistent/b.py"),
        ];
        worker.process_batch(Uuid::new_v4(), &ghosts).unwrap();

        assert_eq!(store.load_scan_state().unwrap().value.files_left, 0);
    }

    #[test]
    fn missing_scan_state_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        let worker = ScanWorker::new(store, "en", markup());

        let result = worker.process_batch(Uuid::new_v4(), &[]);
        assert!(result.is_err());
    }

    /// Store wrapper that fails scan-state saves a fixed number of times.
    struct FlakyStore {
        inner: MemoryStore,
        failures_left: std::sync::Mutex<u32>,
    }

    impl FlakyStore {
        fn new(failures: u32, files_left: usize) -> Self {
            let inner = MemoryStore::new();
            inner.create_scan_state();
            let versioned = inner.load_scan_state().unwrap();
            let mut state = versioned.value;
            state.files_left = files_left;
            inner.save_scan_state(state, versioned.version).unwrap();
            FlakyStore {
                inner,
                failures_left: std::sync::Mutex::new(failures),
            }
        }
    }

    impl CatalogStore for FlakyStore {
        fn load_record(
            &self,
            key: &crate::catalog::CatalogKey,
        ) -> Option<Versioned<CatalogRecord>> {
            self.inner.load_record(key)
        }

        fn save_record(
            &self,
            record: CatalogRecord,
            expected_version: u64,
        ) -> Result<(), StoreError> {
            self.inner.save_record(record, expected_version)
        }

        fn load_scan_state(&self) -> Option<Versioned<ScanState>> {
            self.inner.load_scan_state()
        }

        fn save_scan_state(
            &self,
            state: ScanState,
            expected_version: u64,
        ) -> Result<(), StoreError> {
            let mut failures = self.failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(StoreError::Contention);
            }
            self.inner.save_scan_state(state, expected_version)
        }
    }

    #[test]
    fn decrement_retries_through_transient_contention() {
        let store = Arc::new(FlakyStore::new(2, 5));
        let worker = ScanWorker::new(store.clone(), "en", markup());

        worker
            .process_batch(Uuid::new_v4(), &[PathBuf::from("/nonexistent/a.py")])
            .unwrap();
        assert_eq!(store.load_scan_state().unwrap().value.files_left, 4);
    }

    #[test]
    fn decrement_gives_up_after_bounded_retries() {
        let store = Arc::new(FlakyStore::new(u32::MAX, 5));
        let worker = ScanWorker::new(store.clone(), "en", markup());

        let result = worker.process_batch(Uuid::new_v4(), &[PathBuf::from("/nonexistent/a.py")]);
        assert!(result.is_err());
        // The counter is untouched; re-running the batch stays correct.
        assert_eq!(store.load_scan_state().unwrap().value.files_left, 5);
    }
}

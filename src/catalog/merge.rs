//! Catalog merge engine.
//!
//! Upserts one extracted entry into the catalog under a scan id. The
//! read-modify-write runs as an optimistic transaction against the store:
//! load the record at a version, modify, save at that version, and retry
//! from scratch on contention. Re-merging identical arguments is idempotent,
//! which makes whole-batch re-execution by the task executor safe.

use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use rand::Rng;
use uuid::Uuid;

use crate::catalog::record::{CatalogKey, CatalogRecord};
use crate::catalog::store::{CatalogStore, StoreError};
use crate::core::ExtractedEntry;

/// Attempts per merge before the contention failure is propagated.
const MERGE_ATTEMPTS: u32 = 3;

/// Upper bound for the randomized backoff between colliding attempts.
const BACKOFF_MAX_MS: u64 = 1000;

/// Sleeps a uniformly random interval to desynchronize colliding retriers.
pub(crate) fn backoff() {
    let ms = rand::thread_rng().gen_range(0..=BACKOFF_MAX_MS);
    thread::sleep(Duration::from_millis(ms));
}

/// Merges one entry into the catalog for `scan_id`.
///
/// Within a single scan pass, groups accumulate across occurrences of the
/// same key; a later scan pass replaces the group set instead, so stale group
/// associations from previous scans do not survive.
///
/// Entries with empty text are logged and skipped, never stored.
pub fn merge_entry(
    store: &dyn CatalogStore,
    entry: &ExtractedEntry,
    scan_id: Uuid,
    language_code: &str,
) -> Result<()> {
    if entry.text.is_empty() {
        eprintln!(
            "{} Empty translation discovered: '{}', '{}', '{}', '{}'",
            "warning:".bold().yellow(),
            entry.text,
            entry.plural_text,
            entry.hint,
            entry.group
        );
        return Ok(());
    }

    let key = CatalogKey::new(&entry.text, &entry.hint, language_code);

    for attempt in 1..=MERGE_ATTEMPTS {
        let (mut record, version) = match store.load_record(&key) {
            Some(versioned) => (versioned.value, versioned.version),
            None => (CatalogRecord::new(key.clone()), 0),
        };

        // By the very act of getting here, this is true.
        record.used_in_scan = true;

        if !entry.plural_text.is_empty() {
            record.plural_text = entry.plural_text.clone();
        }

        // If we last updated during this scan, append; otherwise replace.
        if record.last_scan_id == Some(scan_id) {
            record.groups.insert(entry.group.clone());
        } else {
            record.groups = BTreeSet::from([entry.group.clone()]);
        }
        record.last_scan_id = Some(scan_id);

        match store.save_record(record, version) {
            Ok(()) => return Ok(()),
            Err(StoreError::Contention) if attempt < MERGE_ATTEMPTS => backoff(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("merging catalog record for '{}'", entry.text));
            }
        }
    }

    unreachable!("merge loop either returns or propagates the final error")
}

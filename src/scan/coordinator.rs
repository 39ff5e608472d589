//! Scan lifecycle coordination.
//!
//! `begin_scan` registers the total file count on the shared scan state and
//! only then dispatches batches. The ordering is mandatory: if batches were
//! dispatched while the count was still being incremented, an early batch
//! could decrement `files_left` back to zero and make the scan look complete
//! while later batches were still unregistered.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use rand::Rng;
use uuid::Uuid;

use crate::catalog::merge::backoff;
use crate::catalog::store::{CatalogStore, StoreError};
use crate::scan::executor::{BatchJob, Executor};

/// Attempts to register the total before the scan fails.
const REGISTER_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Files per dispatched batch.
    pub batch_size: usize,
    /// Upper bound for the per-batch random dispatch delay. Zero disables
    /// the jitter; non-zero spreads out batch completions so they don't all
    /// collide on the counter at once.
    pub dispatch_jitter: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            batch_size: 100,
            dispatch_jitter: Duration::ZERO,
        }
    }
}

/// Starts one scan pass over the discovered files.
///
/// Returns the scan id, or `None` when the scan state is missing, in which
/// case the scan is abandoned without dispatching anything.
pub fn begin_scan(
    store: &dyn CatalogStore,
    executor: &dyn Executor,
    files: &[PathBuf],
    options: &ScanOptions,
) -> Result<Option<Uuid>> {
    if store.load_scan_state().is_none() {
        eprintln!(
            "{} Not starting scan as scan state was missing",
            "warning:".bold().yellow()
        );
        return Ok(None);
    }

    let scan_id = Uuid::new_v4();
    register_total(store, scan_id, files.len())?;

    let batch_size = options.batch_size.max(1);
    for batch in files.chunks(batch_size) {
        let delay = random_delay(options.dispatch_jitter);
        executor.submit(BatchJob {
            scan_id,
            files: batch.to_vec(),
            delay,
        });
    }

    Ok(Some(scan_id))
}

/// Adds the total file count to `files_left` under refresh-then-modify,
/// strictly before any batch is dispatched.
fn register_total(store: &dyn CatalogStore, scan_id: Uuid, total: usize) -> Result<()> {
    for attempt in 1..=REGISTER_ATTEMPTS {
        let versioned = store
            .load_scan_state()
            .ok_or(StoreError::Missing)
            .context("registering scan total")?;

        let mut state = versioned.value;
        state.scan_id = Some(scan_id);
        state.total_files = total;
        state.files_left += total;

        match store.save_scan_state(state, versioned.version) {
            Ok(()) => return Ok(()),
            Err(StoreError::Contention) if attempt < REGISTER_ATTEMPTS => backoff(),
            Err(err) => return Err(err).context("registering scan total"),
        }
    }

    unreachable!("register loop either returns or propagates the final error")
}

fn random_delay(jitter: Duration) -> Option<Duration> {
    if jitter.is_zero() {
        return None;
    }
    let ms = rand::thread_rng().gen_range(0..=jitter.as_millis() as u64);
    Some(Duration::from_millis(ms))
}

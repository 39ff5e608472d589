//! Batch execution boundary.
//!
//! The coordinator hands batch jobs across this message-passing seam and
//! assumes nothing about where they run, only that delivery is reliable and
//! may be retried (at-least-once). [`RayonExecutor`] runs batches on rayon's
//! thread pool with a bounded whole-batch retry; [`InlineExecutor`] runs them
//! synchronously on the calling thread for `--serial` runs and tests.

use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use uuid::Uuid;

use crate::scan::worker::ScanWorker;

/// One unit of work: a scan id plus a batch of files, with an optional
/// dispatch delay used to desynchronize batch completions.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub scan_id: Uuid,
    pub files: Vec<PathBuf>,
    pub delay: Option<Duration>,
}

/// Accepts batch jobs for eventual, at-least-once execution.
pub trait Executor {
    fn submit(&self, job: BatchJob);
}

/// Times a batch is attempted before it is dropped with a warning. Batch
/// processing is idempotent, so re-running a failed batch cannot corrupt the
/// catalog or the counter.
const BATCH_ATTEMPTS: u32 = 3;

fn run_with_retries(worker: &ScanWorker, job: &BatchJob) {
    for attempt in 1..=BATCH_ATTEMPTS {
        match worker.process_batch(job.scan_id, &job.files) {
            Ok(()) => return,
            Err(err) if attempt < BATCH_ATTEMPTS => {
                eprintln!(
                    "{} Batch of {} files failed (attempt {}/{}): {}",
                    "warning:".bold().yellow(),
                    job.files.len(),
                    attempt,
                    BATCH_ATTEMPTS,
                    err
                );
            }
            Err(err) => {
                eprintln!(
                    "{} Batch of {} files failed permanently: {}",
                    "warning:".bold().yellow(),
                    job.files.len(),
                    err
                );
            }
        }
    }
}

/// Runs each submitted batch synchronously, ignoring dispatch delays.
pub struct InlineExecutor {
    worker: Arc<ScanWorker>,
}

impl InlineExecutor {
    pub fn new(worker: Arc<ScanWorker>) -> Self {
        InlineExecutor { worker }
    }
}

impl Executor for InlineExecutor {
    fn submit(&self, job: BatchJob) {
        run_with_retries(&self.worker, &job);
    }
}

#[derive(Default)]
struct Pending {
    count: Mutex<usize>,
    all_done: Condvar,
}

impl Pending {
    fn add(&self) {
        *self.count.lock().unwrap() += 1;
    }

    fn done(&self) {
        let mut count = self.count.lock().unwrap();
        *count -= 1;
        if *count == 0 {
            self.all_done.notify_all();
        }
    }

    fn wait(&self) {
        let mut count = self.count.lock().unwrap();
        while *count > 0 {
            count = self.all_done.wait(count).unwrap();
        }
    }
}

/// Runs batches concurrently on rayon's global thread pool.
pub struct RayonExecutor {
    worker: Arc<ScanWorker>,
    pending: Arc<Pending>,
}

impl RayonExecutor {
    pub fn new(worker: Arc<ScanWorker>) -> Self {
        RayonExecutor {
            worker,
            pending: Arc::new(Pending::default()),
        }
    }

    /// Blocks until every submitted batch has finished.
    pub fn wait(&self) {
        self.pending.wait();
    }
}

impl Executor for RayonExecutor {
    fn submit(&self, job: BatchJob) {
        self.pending.add();
        let worker = Arc::clone(&self.worker);
        let pending = Arc::clone(&self.pending);

        rayon::spawn(move || {
            if let Some(delay) = job.delay {
                thread::sleep(delay);
            }
            run_with_retries(&worker, &job);
            pending.done();
        });
    }
}

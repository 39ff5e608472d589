//! Scan coordination: batching, dispatch, and per-batch workers.
//!
//! A scan pass registers the total discovered file count on the shared
//! [`crate::catalog::ScanState`] counter, partitions the file list into
//! fixed-size batches, and hands each batch to an executor. Batches run
//! concurrently; each one extracts and merges its files and then decrements
//! the counter under optimistic retry. External observers may consider the
//! scan complete once `files_left` reaches zero.

pub mod coordinator;
pub mod executor;
pub mod worker;

pub use coordinator::{ScanOptions, begin_scan};
pub use executor::{BatchJob, Executor, InlineExecutor, RayonExecutor};
pub use worker::ScanWorker;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::catalog::store::{CatalogStore, MemoryStore};
use crate::cli::args::ScanCommand;
use crate::cli::exit_status::ExitStatus;
use crate::cli::report;
use crate::config::load_config;
use crate::core::file_scanner::scan_files;
use crate::scan::coordinator::{ScanOptions, begin_scan};
use crate::scan::executor::{InlineExecutor, RayonExecutor};
use crate::scan::worker::ScanWorker;

/// Outcome of one full scan, for reporting.
pub struct ScanSummary {
    pub total_files: usize,
    pub skipped_files: usize,
    pub record_count: usize,
    pub files_left: usize,
}

pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let args = &cmd.common;
    let loaded = load_config(&args.path)?;
    let config = loaded.config;

    let language_code = args
        .language_code
        .clone()
        .unwrap_or_else(|| config.language_code.clone());
    let batch_size = cmd.batch_size.unwrap_or(config.batch_size);

    let source_root = args.path.join(&config.source_root);
    let discovered = scan_files(
        &source_root,
        &config.includes,
        &config.ignores,
        &config.extensions(),
        args.verbose,
    );

    let store = Arc::new(MemoryStore::new());
    store.create_scan_state();

    let worker_store: Arc<dyn CatalogStore> = store.clone();
    let worker = Arc::new(ScanWorker::new(
        worker_store,
        language_code,
        config.markup_extensions.clone(),
    ));

    let options = ScanOptions {
        batch_size,
        dispatch_jitter: Duration::from_millis(cmd.jitter_ms),
    };

    let scan_id = if cmd.serial {
        let executor = InlineExecutor::new(worker);
        begin_scan(&*store, &executor, &discovered.files, &options)?
    } else {
        let executor = RayonExecutor::new(worker);
        let scan_id = begin_scan(&*store, &executor, &discovered.files, &options)?;
        executor.wait();
        scan_id
    };

    if scan_id.is_none() {
        // The state was created above; reaching this means it vanished.
        return Ok(ExitStatus::Error);
    }

    let files_left = store
        .load_scan_state()
        .map(|v| v.value.files_left)
        .context("scan state disappeared mid-scan")?;

    let records = store.records();
    let summary = ScanSummary {
        total_files: discovered.files.len(),
        skipped_files: discovered.skipped_count,
        record_count: records.len(),
        files_left,
    };

    if args.json {
        report::print_records_json(&records)?;
    } else {
        report::print_scan_summary(&summary, &records, args.verbose, &args.path);
    }

    if files_left > 0 {
        return Ok(ExitStatus::Failure);
    }
    Ok(ExitStatus::Success)
}

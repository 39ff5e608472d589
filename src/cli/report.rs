//! Report formatting and printing.
//!
//! Human output goes to stdout in a compact colored format; `--json` prints
//! machine-readable output instead, one document per invocation.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::commands::scan::ScanSummary;
use crate::catalog::record::CatalogRecord;
use crate::core::extract::ExtractedEntry;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print_scan_summary(
    summary: &ScanSummary,
    records: &[CatalogRecord],
    verbose: bool,
    path: &Path,
) {
    let mark = if summary.files_left == 0 {
        SUCCESS_MARK.green()
    } else {
        FAILURE_MARK.red()
    };

    println!(
        "{} Scanned {} files in {} ({} skipped)",
        mark,
        summary.total_files,
        path.display(),
        summary.skipped_files,
    );
    println!(
        "  {} catalog records ({} translatable strings observed)",
        summary.record_count,
        records.iter().filter(|r| r.used_in_scan).count(),
    );

    if summary.files_left > 0 {
        println!(
            "  {} {} files left unprocessed (some batches failed)",
            "warning:".bold().yellow(),
            summary.files_left
        );
    }

    if verbose {
        for record in records {
            let hint = if record.hint.is_empty() {
                String::new()
            } else {
                format!(" ({})", record.hint.dimmed())
            };
            let groups: Vec<&str> = record.groups.iter().map(String::as_str).collect();
            println!(
                "  {}{} [{}]",
                record.text.bold(),
                hint,
                groups.join(", ")
            );
        }
    }
}

pub fn print_records_json(records: &[CatalogRecord]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

pub fn print_entries(file: &Path, entries: &[ExtractedEntry]) {
    if entries.is_empty() {
        println!("{} No translatable strings in {}", SUCCESS_MARK.green(), file.display());
        return;
    }

    println!(
        "{} {} translatable strings in {}",
        SUCCESS_MARK.green(),
        entries.len(),
        file.display()
    );
    for entry in entries {
        let mut extras = Vec::new();
        if !entry.plural_text.is_empty() {
            extras.push(format!("plural: {}", entry.plural_text));
        }
        if !entry.hint.is_empty() {
            extras.push(format!("hint: {}", entry.hint));
        }
        extras.push(format!("group: {}", entry.group));

        println!("  {} ({})", entry.text.bold(), extras.join(", ").dimmed());
    }
}

pub fn print_entries_json(entries: &[ExtractedEntry]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(entries)?);
    Ok(())
}

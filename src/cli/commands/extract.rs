use std::fs;

use anyhow::{Context, Result};

use crate::cli::args::ExtractCommand;
use crate::cli::exit_status::ExitStatus;
use crate::cli::report;
use crate::config::load_config;
use crate::core::extract::parse_file;
use crate::core::file_scanner::file_extension;

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let args = &cmd.common;
    let loaded = load_config(&args.path)?;

    let content = fs::read(&cmd.file)
        .with_context(|| format!("Failed to read {}", cmd.file.display()))?;
    let content = String::from_utf8_lossy(&content);
    let extension = file_extension(&cmd.file).unwrap_or_default();

    let entries = parse_file(&content, &extension, &loaded.config.markup_extensions);

    if args.json {
        report::print_entries_json(&entries)?;
    } else {
        report::print_entries(&cmd.file, &entries);
    }

    Ok(ExitStatus::Success)
}

//! Source-tree discovery.
//!
//! Walks the configured include directories and collects every file whose
//! extension is recognized (markup or general source), applying ignore
//! patterns along the way. Ignore patterns come in two flavors: literal
//! directory paths (prefix match) and glob patterns.

use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning a source tree.
pub struct ScanResult {
    /// Discovered files with a recognized extension, sorted for determinism.
    pub files: Vec<PathBuf>,
    /// Files skipped due to ignore patterns.
    pub skipped_count: usize,
}

/// The dot-prefixed extension of a path (`".html"`), lowercased.
pub fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    extensions: &[String],
    verbose: bool,
) -> ScanResult {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        includes.iter().map(|inc| base_dir.join(inc)).collect()
    };

    for dir in dirs_to_scan {
        if !dir.is_dir() {
            continue;
        }

        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(ext) = file_extension(path) else {
                continue;
            };
            if !extensions.iter().any(|e| *e == ext) {
                continue;
            }

            let path_str = path.to_string_lossy();
            let ignored = literal_ignore_paths.iter().any(|p| path.starts_with(p))
                || glob_patterns.iter().any(|p| p.matches(&path_str));
            if ignored {
                skipped_count += 1;
                continue;
            }

            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();

    ScanResult {
        files,
        skipped_count,
    }
}

//! Catalog record and scan state types.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;

/// Content identity of a catalog record.
///
/// Two entries with identical text, hint and language code collapse to one
/// record, regardless of which file or group produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CatalogKey {
    pub text: String,
    pub hint: String,
    pub language_code: String,
}

impl CatalogKey {
    pub fn new(text: &str, hint: &str, language_code: &str) -> Self {
        CatalogKey {
            text: text.to_string(),
            hint: hint.to_string(),
            language_code: language_code.to_string(),
        }
    }
}

/// One canonical translation record.
///
/// Created on first observation of its key, updated on every later
/// observation. Records are never deleted by the scanner; pruning entries no
/// longer produced by any scan is a known limitation left to external tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRecord {
    pub key: CatalogKey,
    pub text: String,
    pub plural_text: String,
    pub hint: String,
    pub language_code: String,
    /// True once any scan has observed this string in code or templates.
    pub used_in_scan: bool,
    /// Groups that referenced this string during the most recent scan.
    pub groups: BTreeSet<String>,
    pub last_scan_id: Option<Uuid>,
}

impl CatalogRecord {
    pub fn new(key: CatalogKey) -> Self {
        CatalogRecord {
            text: key.text.clone(),
            plural_text: String::new(),
            hint: key.hint.clone(),
            language_code: key.language_code.clone(),
            key,
            used_in_scan: false,
            groups: BTreeSet::new(),
            last_scan_id: None,
        }
    }
}

/// Shared progress counter for one scan pass.
///
/// At most one live instance exists per active scan. `files_left` starts at
/// zero, is incremented once by the total file count before any batch is
/// dispatched, and is decremented by each completed batch. It reaches exactly
/// zero once every batch has completed and is never observably negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanState {
    pub scan_id: Option<Uuid>,
    pub total_files: usize,
    pub files_left: usize,
}

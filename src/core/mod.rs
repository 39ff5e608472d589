//! Extraction engine for translatable strings.
//!
//! This module implements the dual-mode extraction pipeline:
//!
//! - `tokenizer`: splits markup content into a Text/Variable/Block/Comment
//!   token stream, preserving raw tag text byte-exactly
//! - `blocks`: a finite-state reducer that reassembles `{% blocktrans %}`
//!   constructs (and matches inline `{% trans %}` tags) from the token stream
//! - `calls`: regex extraction of gettext-style calls from general source text
//! - `placeholders`: rewrites `{{ var }}` references into `%(var)s` templates
//! - `extract`: per-file entry point dispatching on file extension
//! - `file_scanner`: source-tree discovery with include/ignore filtering
//! - `utils`: quote-aware splitting and whitespace helpers

pub mod blocks;
pub mod calls;
pub mod extract;
pub mod file_scanner;
pub mod placeholders;
pub mod tokenizer;
pub mod utils;

pub use extract::{ExtractedEntry, Origin, parse_file};

/// Group assigned to entries that don't name one explicitly.
pub const DEFAULT_TRANSLATION_GROUP: &str = "website";

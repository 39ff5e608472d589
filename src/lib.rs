//! Transcan - translatable-string scanner for Django-style projects
//!
//! Transcan is a CLI tool and library that scans template and source files for
//! translatable strings (`{% trans %}`, `{% blocktrans %}`, gettext-style
//! calls) and consolidates them into a deduplicated translation catalog.
//! Scans fan out over a thread pool in fixed-size file batches and join on a
//! shared remaining-file counter with optimistic, contention-tolerant updates.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (tokenizer, block reducer, call extractors)
//! - `catalog`: Translation catalog records, storage, and the merge engine
//! - `scan`: Scan coordination (batching, dispatch, per-batch workers)

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod scan;

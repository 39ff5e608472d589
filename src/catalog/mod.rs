//! Translation catalog: canonical records, storage, and merging.
//!
//! - `record`: catalog record and scan state types
//! - `store`: versioned storage trait with optimistic concurrency control
//! - `merge`: the upsert/merge engine applied per extracted entry

pub mod merge;
pub mod record;
pub mod store;

pub use merge::merge_entry;
pub use record::{CatalogKey, CatalogRecord, ScanState};
pub use store::{CatalogStore, MemoryStore, StoreError, Versioned};

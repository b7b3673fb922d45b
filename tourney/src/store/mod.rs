//! Persistence of registry snapshots.
//!
//! The core never persists anything on its own; callers decide when to save.
//! Snapshots carry a format version and every field of every record, so a
//! saved registry restores exactly.

pub mod errors;
pub mod file;
pub mod snapshot;

pub use errors::{StoreError, StoreResult};
pub use file::JsonStore;
pub use snapshot::{SNAPSHOT_VERSION, Snapshot};

//! Permission snapshots
//!
//! The snapshot is the last approved permission set. It is stored as a JSON
//! array of `{"json_class": ..., "data": [name]}` records.

mod storage;

pub use storage::SnapshotStorage;

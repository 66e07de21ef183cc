//! Comparing permission sets
//!
//! - `Comparator` - set differences between the snapshot and the current set
//! - `Inspector` - turns those differences into a `Verdict`

mod comparator;
mod inspector;

pub use comparator::Comparator;
pub use inspector::Inspector;

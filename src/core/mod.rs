//! Core types for permission checks
//!
//! - `Permission` / `PermissionSet` - declared permissions
//! - `Verdict` - outcome of a check
//! - `GuardError` - error types

pub mod error;
pub mod permission;
pub mod verdict;

pub use error::{GuardError, GuardResult};
pub use permission::{Permission, PermissionSet, PERMISSION_TYPE_TAG};
pub use verdict::Verdict;

//! Verdict of a permission check

use super::permission::PermissionSet;

/// Outcome of comparing the current permissions against the snapshot
///
/// Each variant carries only the sets its report needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing changed
    Pass,

    /// New permissions appeared
    Fail {
        /// Permissions requested now but absent from the snapshot
        more: PermissionSet,
        /// Permissions in the snapshot that are no longer requested
        less: PermissionSet,
    },

    /// Permissions only went away; the snapshot should follow
    PassWithAttention {
        /// Permissions in the snapshot that are no longer requested
        less: PermissionSet,
    },
}

impl Verdict {
    /// Check if the verdict lets the build through
    pub fn is_pass(&self) -> bool {
        !matches!(self, Verdict::Fail { .. })
    }

    /// Process exit status for this verdict
    pub fn exit_code(&self) -> u8 {
        if self.is_pass() {
            0
        } else {
            1
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail { more, .. } => write!(f, "FAIL ({} added)", more.len()),
            Verdict::PassWithAttention { less } => {
                write!(f, "PASS WITH ATTENTION ({} removed)", less.len())
            }
        }
    }
}

use crate::core::PermissionSet;

/// Differences between a baseline and the current permission set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    more: PermissionSet,
    less: PermissionSet,
}

impl Comparator {
    /// Compare the snapshot (`old`) against the current set (`new`)
    pub fn new(old: &PermissionSet, new: &PermissionSet) -> Self {
        Self {
            more: new.difference(old),
            less: old.difference(new),
        }
    }

    /// Permissions present now but absent from the snapshot
    pub fn more(&self) -> &PermissionSet {
        &self.more
    }

    /// Permissions in the snapshot that are no longer requested
    pub fn less(&self) -> &PermissionSet {
        &self.less
    }

    /// Check if both sets were identical
    pub fn is_unchanged(&self) -> bool {
        self.more.is_empty() && self.less.is_empty()
    }
}

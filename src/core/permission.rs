//! Permission value type and permission sets

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::GuardError;

/// Type tag stored alongside every permission in a snapshot file
///
/// Matches snapshots written by earlier releases of the tool.
pub const PERMISSION_TYPE_TAG: &str = "NoNewPermission::Permission";

/// A single permission declared by an application package
///
/// Equality, ordering and hashing all go through the name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "PermissionRecord", try_from = "PermissionRecord")]
pub struct Permission {
    name: String,
}

impl Permission {
    /// Create a permission from its dotted name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The dotted name, e.g. `android.permission.CAMERA`
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// On-disk shape of a permission: `{"json_class": ..., "data": [name]}`
#[derive(Debug, Serialize, Deserialize)]
struct PermissionRecord {
    json_class: String,
    data: [String; 1],
}

impl From<Permission> for PermissionRecord {
    fn from(permission: Permission) -> Self {
        Self {
            json_class: PERMISSION_TYPE_TAG.to_string(),
            data: [permission.name],
        }
    }
}

impl TryFrom<PermissionRecord> for Permission {
    type Error = GuardError;

    fn try_from(record: PermissionRecord) -> Result<Self, Self::Error> {
        if record.json_class != PERMISSION_TYPE_TAG {
            return Err(GuardError::InvalidPermission(format!(
                "unexpected type tag '{}'",
                record.json_class
            )));
        }

        let [name] = record.data;
        if name.is_empty() {
            return Err(GuardError::InvalidPermission("empty name".to_string()));
        }

        Ok(Permission::new(name))
    }
}

/// A deduplicated collection of permissions
///
/// Iteration is always sorted by name, so anything rendered from a set comes
/// out in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    permissions: BTreeSet<Permission>,
}

impl PermissionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a permission, returning false if its name was already present
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Check whether a permission is in the set
    pub fn contains(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// Permissions in `self` that are absent from `other`
    pub fn difference(&self, other: &PermissionSet) -> PermissionSet {
        self.permissions
            .difference(&other.permissions)
            .cloned()
            .collect()
    }

    /// Permissions present in either set
    pub fn union(&self, other: &PermissionSet) -> PermissionSet {
        self.permissions
            .union(&other.permissions)
            .cloned()
            .collect()
    }

    /// Iterate in name order
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    /// Sorted permission names
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(Permission::name).collect()
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<I: IntoIterator<Item = Permission>>(&mut self, iter: I) {
        self.permissions.extend(iter);
    }
}

impl IntoIterator for PermissionSet {
    type Item = Permission;
    type IntoIter = std::collections::btree_set::IntoIter<Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.into_iter()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::collections::btree_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}

//! Verdict handling
//!
//! Each verdict maps to one report, one exit status and, for
//! `PassWithAttention` only, a snapshot rewrite:
//!
//! | Verdict | Action | Exit |
//! |---|---|---|
//! | `Pass` | report no change | 0 |
//! | `Fail` | report added and removed permissions | 1 |
//! | `PassWithAttention` | report removals, rewrite snapshot from the current set | 0 |

use crate::cli::Console;
use crate::core::{GuardResult, PermissionSet, Verdict};
use crate::snapshot::SnapshotStorage;

/// Dispatches side effects for a verdict
pub struct Handler<'a> {
    console: &'a Console,
    storage: &'a SnapshotStorage,
}

impl<'a> Handler<'a> {
    pub fn new(console: &'a Console, storage: &'a SnapshotStorage) -> Self {
        Self { console, storage }
    }

    /// Act on a verdict and return the process exit status
    ///
    /// `current` is the permission set the verdict was computed from; it
    /// becomes the new snapshot when permissions only went away.
    pub fn handle(&self, verdict: &Verdict, current: &PermissionSet) -> GuardResult<u8> {
        match verdict {
            Verdict::Pass => self.console.report_pass(),
            Verdict::Fail { more, less } => {
                tracing::warn!("{} new permissions requested", more.len());
                self.console.report_fail(more, less);
            }
            Verdict::PassWithAttention { less } => {
                self.console.report_attention(less);
                self.storage.generate(current)?;
                self.console
                    .report_snapshot_updated(self.storage.path(), current.len());
            }
        }

        Ok(verdict.exit_code())
    }

    /// Record `current` as the snapshot regardless of what was there
    pub fn take_snapshot(&self, current: &PermissionSet) -> GuardResult<u8> {
        let existed = self.storage.exists();
        self.storage.generate(current)?;
        self.console
            .report_snapshot_taken(self.storage.path(), current.len(), existed);
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Permission;
    use tempfile::TempDir;

    fn set(names: &[&str]) -> PermissionSet {
        names.iter().map(|n| Permission::new(*n)).collect()
    }

    fn create_test_storage() -> (SnapshotStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = SnapshotStorage::new(temp_dir.path().join("permissions.json"));
        (storage, temp_dir)
    }

    #[test]
    fn test_pass_leaves_snapshot_alone() {
        let (storage, _temp) = create_test_storage();
        let console = Console::new();
        let handler = Handler::new(&console, &storage);

        let code = handler.handle(&Verdict::Pass, &set(&["X.Y"])).unwrap();
        assert_eq!(code, 0);
        assert!(!storage.exists());
    }

    #[test]
    fn test_fail_exits_one_without_writing() {
        let (storage, _temp) = create_test_storage();
        storage.generate(&set(&["X.Y"])).unwrap();
        let console = Console::new();
        let handler = Handler::new(&console, &storage);

        let verdict = Verdict::Fail {
            more: set(&["A.B.C"]),
            less: PermissionSet::new(),
        };
        let code = handler.handle(&verdict, &set(&["X.Y", "A.B.C"])).unwrap();

        assert_eq!(code, 1);
        assert_eq!(storage.parse().unwrap(), set(&["X.Y"]));
    }

    #[test]
    fn test_attention_rewrites_snapshot_with_current_set() {
        let (storage, _temp) = create_test_storage();
        storage.generate(&set(&["X.Y", "A.B.C"])).unwrap();
        let console = Console::new();
        let handler = Handler::new(&console, &storage);

        let verdict = Verdict::PassWithAttention {
            less: set(&["A.B.C"]),
        };
        let code = handler.handle(&verdict, &set(&["X.Y"])).unwrap();

        assert_eq!(code, 0);
        assert_eq!(storage.parse().unwrap(), set(&["X.Y"]));
    }

    #[test]
    fn test_take_snapshot_creates_and_overwrites() {
        let (storage, _temp) = create_test_storage();
        let console = Console::new();
        let handler = Handler::new(&console, &storage);

        assert_eq!(handler.take_snapshot(&set(&["a.A", "b.B"])).unwrap(), 0);
        assert_eq!(storage.parse().unwrap(), set(&["a.A", "b.B"]));

        assert_eq!(handler.take_snapshot(&set(&["c.C"])).unwrap(), 0);
        assert_eq!(storage.parse().unwrap(), set(&["c.C"]));
    }
}

//! Command drivers
//!
//! Wire a permission source, the snapshot storage and the console together
//! for each command. Every driver returns the process exit status.

use crate::cli::Console;
use crate::compare::{Comparator, Inspector};
use crate::core::GuardResult;
use crate::detector::PermissionSource;
use crate::handler::Handler;
use crate::snapshot::SnapshotStorage;

/// Compare the current permissions against the snapshot
///
/// The snapshot is loaded before the source runs, so a missing baseline
/// fails fast without invoking the inspection tool.
pub async fn check<S>(source: &S, storage: &SnapshotStorage, console: &Console) -> GuardResult<u8>
where
    S: PermissionSource + ?Sized,
{
    let old = storage.parse()?;
    let new = source.collect().await?;

    let comparator = Comparator::new(&old, &new);
    let verdict = Inspector::check(&comparator);

    Handler::new(console, storage).handle(&verdict, &new)
}

/// Print the current permissions
pub async fn list<S>(source: &S, console: &Console) -> GuardResult<u8>
where
    S: PermissionSource + ?Sized,
{
    let permissions = source.collect().await?;
    console.report_list(&permissions);
    Ok(0)
}

/// Record the current permissions as the snapshot
pub async fn snapshot<S>(source: &S, storage: &SnapshotStorage, console: &Console) -> GuardResult<u8>
where
    S: PermissionSource + ?Sized,
{
    let permissions = source.collect().await?;
    Handler::new(console, storage).take_snapshot(&permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GuardError, Permission, PermissionSet};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// In-memory source that counts how often it was asked
    struct StaticSource {
        permissions: PermissionSet,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn new(names: &[&str]) -> Self {
            Self {
                permissions: set(names),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PermissionSource for StaticSource {
        async fn collect(&self) -> GuardResult<PermissionSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.permissions.clone())
        }
    }

    /// Source that fails the way a crashing inspection tool does
    struct FailingSource;

    #[async_trait]
    impl PermissionSource for FailingSource {
        async fn collect(&self) -> GuardResult<PermissionSet> {
            Err(GuardError::ExitStatus {
                code: 2,
                stderr: "permission denied".to_string(),
            })
        }
    }

    fn set(names: &[&str]) -> PermissionSet {
        names.iter().map(|n| Permission::new(*n)).collect()
    }

    fn empty_storage() -> (SnapshotStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = SnapshotStorage::new(temp_dir.path().join("permissions.json"));
        (storage, temp_dir)
    }

    fn storage_with(names: &[&str]) -> (SnapshotStorage, TempDir) {
        let (storage, temp_dir) = empty_storage();
        storage.generate(&set(names)).unwrap();
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn test_unchanged_permissions_pass() {
        let (storage, _temp) = storage_with(&["X.Y"]);
        let before = std::fs::metadata(storage.path()).unwrap().modified().unwrap();

        let code = check(&StaticSource::new(&["X.Y"]), &storage, &Console::new())
            .await
            .unwrap();

        assert_eq!(code, 0);
        let after = std::fs::metadata(storage.path()).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_new_permission_fails() {
        let (storage, _temp) = storage_with(&["X.Y"]);

        let code = check(&StaticSource::new(&["X.Y", "A.B.C"]), &storage, &Console::new())
            .await
            .unwrap();

        assert_eq!(code, 1);
        assert_eq!(storage.parse().unwrap(), set(&["X.Y"]));
    }

    #[tokio::test]
    async fn test_removed_permission_updates_snapshot() {
        let (storage, _temp) = storage_with(&["X.Y", "A.B.C"]);

        let code = check(&StaticSource::new(&["X.Y"]), &storage, &Console::new())
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(storage.parse().unwrap(), set(&["X.Y"]));
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_fatal_before_detection() {
        let (storage, _temp) = empty_storage();
        let source = StaticSource::new(&["X.Y"]);

        let err = check(&source, &storage, &Console::new()).await.unwrap_err();

        assert!(matches!(err, GuardError::SnapshotMissing(_)));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(source.calls(), 0);
        assert!(!storage.exists());
    }

    #[tokio::test]
    async fn test_detection_failure_propagates() {
        let (storage, _temp) = storage_with(&["X.Y"]);

        let err = check(&FailingSource, &storage, &Console::new())
            .await
            .unwrap_err();

        assert!(matches!(err, GuardError::ExitStatus { code: 2, .. }));
        assert_eq!(storage.parse().unwrap(), set(&["X.Y"]));
    }

    #[tokio::test]
    async fn test_snapshot_then_check() {
        let (storage, _temp) = empty_storage();
        let source = StaticSource::new(&["android.permission.CAMERA"]);
        let console = Console::new();

        assert_eq!(snapshot(&source, &storage, &console).await.unwrap(), 0);
        assert_eq!(check(&source, &storage, &console).await.unwrap(), 0);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_list_does_not_touch_snapshot() {
        let (storage, _temp) = empty_storage();

        let code = list(&StaticSource::new(&["a.A", "b.B"]), &Console::new())
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert!(!storage.exists());
    }
}

//! Snapshot storage
//!
//! Reads and writes the permission snapshot as JSON.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::{GuardError, GuardResult, PermissionSet};

/// Snapshot file manager
#[derive(Debug, Clone)]
pub struct SnapshotStorage {
    path: PathBuf,
}

impl SnapshotStorage {
    /// Create a storage for the snapshot at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the snapshot file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot
    ///
    /// A missing file is reported as `SnapshotMissing`, never as an empty set.
    pub fn parse(&self) -> GuardResult<PermissionSet> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(GuardError::SnapshotMissing(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let reader = BufReader::new(file);
        let permissions: PermissionSet = serde_json::from_reader(reader)?;

        tracing::debug!(
            "Loaded {} permissions from {}",
            permissions.len(),
            self.path.display()
        );
        Ok(permissions)
    }

    /// Replace the snapshot with `permissions`
    ///
    /// The data goes to a temporary file in the same directory first and is
    /// renamed over the target, so readers never see a half-written file.
    pub fn generate(&self, permissions: &PermissionSet) -> GuardResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let temp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, permissions)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        if let Some(mode) = self.target_permissions()? {
            temp.as_file().set_permissions(mode)?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| GuardError::Io(e.error))?;

        tracing::info!(
            "Wrote {} permissions to {}",
            permissions.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Mode for the replacement file: the current snapshot's, or 0644 for a new one
    ///
    /// Temporary files are created owner-only, which must not leak into the snapshot.
    fn target_permissions(&self) -> GuardResult<Option<fs::Permissions>> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(meta.permissions())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(new_file_permissions()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

//! Runtime configuration
//!
//! Settings for locating the inspection tool, the package and the snapshot.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::{GuardError, GuardResult};

/// Inspection tool shipped with the Android build tools
pub const DEFAULT_TOOL_NAME: &str = "aapt";

/// Default bound on how long the inspection tool may run
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Snapshot file name, resolved next to the executable
pub const SNAPSHOT_FILE_NAME: &str = "permissions.json";

/// Configuration for a single inspection run
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Directory containing the inspection tool
    pub toolchain_path: String,

    /// Application package to inspect
    pub package_path: String,

    /// Name of the inspection binary inside the toolchain directory
    pub tool_name: String,

    /// Maximum time the tool may run before it is killed
    pub timeout: Duration,
}

impl DetectorConfig {
    /// Create a configuration with the default tool and timeout
    pub fn new(toolchain_path: impl Into<String>, package_path: impl Into<String>) -> Self {
        Self {
            toolchain_path: toolchain_path.into(),
            package_path: package_path.into(),
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the inspection binary name
    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = tool_name.into();
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full path of the inspection binary
    ///
    /// Trailing separators on the toolchain path are dropped before joining.
    pub fn tool_path(&self) -> String {
        let toolchain = self
            .toolchain_path
            .trim_end_matches(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR);
        format!("{}/{}", toolchain, self.tool_name)
    }
}

/// Top-level configuration assembled from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct GuardConfig {
    /// Directory containing the inspection tool
    pub toolchain_path: String,

    /// Application package to inspect
    pub package_path: String,

    /// Name of the inspection binary
    pub tool_name: String,

    /// Bound on the inspection run
    pub timeout: Duration,

    /// Explicit snapshot location (None = beside the executable)
    pub snapshot_path: Option<PathBuf>,
}

impl GuardConfig {
    /// Create a configuration with defaults for everything but the inputs
    pub fn new(toolchain_path: impl Into<String>, package_path: impl Into<String>) -> Self {
        Self {
            toolchain_path: toolchain_path.into(),
            package_path: package_path.into(),
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            snapshot_path: None,
        }
    }

    /// Set the inspection binary name
    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = tool_name.into();
        self
    }

    /// Set the timeout in seconds
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set an explicit snapshot path
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Reject settings the detector cannot work with
    pub fn validate(&self) -> GuardResult<()> {
        if self.timeout.is_zero() {
            return Err(GuardError::invalid_config("timeout must be greater than zero"));
        }
        if self.tool_name.trim().is_empty() {
            return Err(GuardError::invalid_config("tool name must not be empty"));
        }
        Ok(())
    }

    /// Detector settings derived from this configuration
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig::new(&self.toolchain_path, &self.package_path)
            .with_tool_name(&self.tool_name)
            .with_timeout(self.timeout)
    }

    /// Resolve where the snapshot lives
    pub fn snapshot_path(&self) -> GuardResult<PathBuf> {
        match &self.snapshot_path {
            Some(path) => Ok(path.clone()),
            None => default_snapshot_path(),
        }
    }
}

/// `permissions.json` in the directory holding the running executable
pub fn default_snapshot_path() -> GuardResult<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(SNAPSHOT_FILE_NAME))
}

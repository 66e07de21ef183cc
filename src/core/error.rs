//! Error types for permission checks

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that abort a permission check
///
/// Every variant is fatal: the process reports it and exits with status 1.
#[derive(Error, Debug)]
pub enum GuardError {
    /// The inspection tool could not be started
    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        /// Rendered command line
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The inspection tool was terminated by a signal
    #[error("Inspection tool terminated by signal {signal}")]
    Signaled {
        /// Signal name, e.g. `SIGKILL`
        signal: String,
    },

    /// The inspection tool exited with a non-zero status
    #[error("Inspection tool exited with status {code}")]
    ExitStatus {
        /// Exit code reported by the tool
        code: i32,
        /// Everything the tool wrote to stderr
        stderr: String,
    },

    /// The inspection tool did not finish in time
    #[error("Inspection tool timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// No baseline snapshot at the expected location
    #[error("Snapshot not found: {}", .0.display())]
    SnapshotMissing(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The permission pattern failed to compile
    #[error("Invalid permission pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A snapshot record could not be turned into a permission
    #[error("Invalid permission record: {0}")]
    InvalidPermission(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GuardError {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        GuardError::InvalidConfig(msg.into())
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type alias for permission checks
pub type GuardResult<T> = Result<T, GuardError>;

//! Permission detection
//!
//! Runs the Android packaging tool against an application package and
//! collects every permission it reports.
//!
//! ## Example
//!
//! ```rust,ignore
//! use no_new_permission::config::DetectorConfig;
//! use no_new_permission::detector::{Detector, PermissionSource};
//!
//! let detector = Detector::new(DetectorConfig::new("/sdk/build-tools/34.0.0", "app.apk"))?;
//! let permissions = detector.collect().await?;
//! ```

mod command;
mod parser;

pub use command::InspectCommand;
pub use parser::PermissionParser;

use async_trait::async_trait;

use crate::config::DetectorConfig;
use crate::core::{GuardResult, PermissionSet};

/// Anything that can report the permissions currently declared by a package
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Collect the current permission set
    async fn collect(&self) -> GuardResult<PermissionSet>;
}

/// Detects permissions by running the inspection tool
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
    parser: PermissionParser,
}

impl Detector {
    /// Create a detector for the given configuration
    pub fn new(config: DetectorConfig) -> GuardResult<Self> {
        Ok(Self {
            config,
            parser: PermissionParser::new()?,
        })
    }

    /// The command this detector will run
    pub fn command_line(&self) -> InspectCommand {
        InspectCommand::from_config(&self.config)
    }
}

#[async_trait]
impl PermissionSource for Detector {
    async fn collect(&self) -> GuardResult<PermissionSet> {
        let command = self.command_line();
        let mut permissions = PermissionSet::new();

        let result = command
            .run(self.config.timeout, |line| {
                if let Some(permission) = self.parser.parse_line(line) {
                    tracing::trace!("Matched permission {}", permission);
                    permissions.insert(permission);
                }
            })
            .await;

        if let Err(e) = result {
            if !permissions.is_empty() {
                tracing::warn!(
                    "Discarding {} permissions parsed before failure: {}",
                    permissions.len(),
                    e
                );
            }
            return Err(e);
        }

        tracing::info!(
            "Detected {} permissions in {}",
            permissions.len(),
            self.config.package_path
        );
        Ok(permissions)
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{GuardConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_TOOL_NAME};

/// Detects permission changes in an Android package between builds.
#[derive(Parser, Debug)]
#[command(name = "no-new-permission")]
#[command(version)]
#[command(about = "Fail the build when an APK requests new permissions.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Snapshot file (default: permissions.json next to the executable)
    #[arg(long, global = true, env = "NNP_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Inspection binary inside the toolchain directory
    #[arg(long, global = true, env = "NNP_TOOL", default_value = DEFAULT_TOOL_NAME)]
    pub tool: String,

    /// Seconds to wait for the inspection tool
    #[arg(long, global = true, env = "NNP_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the package against the snapshot
    Check(Target),

    /// Print the permissions the package declares
    List(Target),

    /// Record the package's permissions as the new snapshot
    Snapshot(Target),
}

/// Inputs shared by every command
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Android build-tools directory containing the inspection binary
    pub toolchain: String,

    /// Application package to inspect
    pub package: String,
}

impl Commands {
    pub fn target(&self) -> &Target {
        match self {
            Commands::Check(target) | Commands::List(target) | Commands::Snapshot(target) => {
                target
            }
        }
    }
}

impl Cli {
    /// Build the runtime configuration from parsed arguments
    pub fn to_config(&self) -> GuardConfig {
        let target = self.command.target();
        let mut config = GuardConfig::new(&target.toolchain, &target.package)
            .with_tool_name(&self.tool)
            .with_timeout_secs(self.timeout_secs);
        if let Some(path) = &self.snapshot {
            config = config.with_snapshot_path(path);
        }
        config
    }
}

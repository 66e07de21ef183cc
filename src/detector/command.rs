//! Running the inspection tool
//!
//! Spawns `<toolchain>/<tool> dump permissions <package>`, feeds stdout to a
//! line callback as it arrives and keeps stderr until the exit status says
//! whether it matters.

use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::DetectorConfig;
use crate::core::{GuardError, GuardResult};

/// Arguments passed to the inspection tool before the package path
const DUMP_ARGS: [&str; 2] = ["dump", "permissions"];

/// A fully resolved inspection command
#[derive(Debug, Clone, PartialEq)]
pub struct InspectCommand {
    program: String,
    args: Vec<String>,
}

impl InspectCommand {
    /// Build the command for a detector configuration
    pub fn from_config(config: &DetectorConfig) -> Self {
        let mut args: Vec<String> = DUMP_ARGS.iter().map(|s| s.to_string()).collect();
        args.push(config.package_path.clone());

        Self {
            program: config.tool_path(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the command, handing each stdout line to `on_line`
    ///
    /// The exit status is only checked once stdout has been drained, so lines
    /// printed before a failure still reach `on_line`.
    pub async fn run<F>(&self, limit: std::time::Duration, mut on_line: F) -> GuardResult<()>
    where
        F: FnMut(&str),
    {
        tracing::debug!("Executing inspection command: {}", self);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| GuardError::Launch {
                command: self.to_string(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| GuardError::Io(std::io::Error::other("stdout was not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| GuardError::Io(std::io::Error::other("stderr was not captured")))?;

        let consume = async {
            let read_stdout = async {
                let mut lines = BufReader::new(stdout).split(b'\n');
                let mut count = 0usize;
                while let Some(segment) = lines.next_segment().await? {
                    let line = String::from_utf8_lossy(&segment);
                    on_line(line.trim_end_matches('\r'));
                    count += 1;
                }
                Ok::<_, std::io::Error>(count)
            };

            let read_stderr = async {
                let mut buf = Vec::new();
                BufReader::new(stderr).read_to_end(&mut buf).await?;
                Ok::<_, std::io::Error>(String::from_utf8_lossy(&buf).into_owned())
            };

            let (line_count, stderr_text) = tokio::try_join!(read_stdout, read_stderr)?;
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((line_count, stderr_text, status))
        };

        let (line_count, stderr_text, status) = match timeout(limit, consume).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!("Inspection command timed out after {:?}", limit);
                return Err(GuardError::Timeout(limit));
            }
        };

        tracing::debug!("Inspection command produced {} lines", line_count);
        check_status(status, stderr_text)
    }
}

impl std::fmt::Display for InspectCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Turn a finished process status into success or the matching error
///
/// A signal wins over stderr when both are present.
fn check_status(status: ExitStatus, stderr: String) -> GuardResult<()> {
    if let Some(signal) = terminating_signal(&status) {
        return Err(GuardError::Signaled {
            signal: signal_name(signal),
        });
    }

    if status.success() {
        return Ok(());
    }

    Err(GuardError::ExitStatus {
        code: status.code().unwrap_or(-1),
        stderr,
    })
}

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Conventional name for a signal number
fn signal_name(signal: i32) -> String {
    let name = match signal {
        1 => "SIGHUP",
        2 => "SIGINT",
        3 => "SIGQUIT",
        4 => "SIGILL",
        6 => "SIGABRT",
        8 => "SIGFPE",
        9 => "SIGKILL",
        11 => "SIGSEGV",
        13 => "SIGPIPE",
        14 => "SIGALRM",
        15 => "SIGTERM",
        _ => return format!("signal {}", signal),
    };
    name.to_string()
}

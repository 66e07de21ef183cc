use colored::*;
use std::error::Error as _;
use std::path::Path;

use crate::core::{GuardError, PermissionSet};

/// Frame around every report block
pub const DELIMITER: &str = "============================================================";

/// Indentation for permission names inside a block
const INDENT: &str = "    ";

/// Console handles all terminal output with colored formatting
pub struct Console {
    pass_color: Color,
    fail_color: Color,
    attention_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            pass_color: Color::Green,
            fail_color: Color::Red,
            attention_color: Color::Yellow,
        }
    }

    /// Print a delimiter line
    pub fn print_delimiter(&self) {
        println!("{}", DELIMITER.bright_black());
    }

    /// Report that nothing changed
    pub fn report_pass(&self) {
        self.print_delimiter();
        println!("{}", "PASS: no permission changes".color(self.pass_color).bold());
        self.print_delimiter();
    }

    /// Report newly requested and dropped permissions
    pub fn report_fail(&self, more: &PermissionSet, less: &PermissionSet) {
        self.print_delimiter();
        println!(
            "{}",
            "FAIL: new permissions were requested".color(self.fail_color).bold()
        );
        print!("{}", format_permission_block("Added", more));
        if !less.is_empty() {
            print!("{}", format_permission_block("Removed", less));
        }
        self.print_delimiter();
    }

    /// Report permissions that went away
    pub fn report_attention(&self, less: &PermissionSet) {
        self.print_delimiter();
        println!(
            "{}",
            "ATTENTION: permissions were removed"
                .color(self.attention_color)
                .bold()
        );
        print!("{}", format_permission_block("Removed", less));
        self.print_delimiter();
    }

    /// Report that the snapshot now matches the package
    pub fn report_snapshot_updated(&self, path: &Path, count: usize) {
        println!(
            "{} snapshot updated at {} ({} permissions)",
            "PASS:".color(self.pass_color).bold(),
            path.display(),
            count
        );
    }

    /// Report the result of an explicit snapshot
    pub fn report_snapshot_taken(&self, path: &Path, count: usize, existed: bool) {
        let action = if existed { "Updated" } else { "Created" };
        self.print_delimiter();
        println!(
            "{} snapshot at {}",
            action.color(self.pass_color).bold(),
            path.display()
        );
        println!("Total: {}", count);
        self.print_delimiter();
    }

    /// Print every permission followed by the total
    pub fn report_list(&self, permissions: &PermissionSet) {
        for permission in permissions {
            println!("{}", permission);
        }
        println!("Total: {}", permissions.len());
    }

    /// Print a fatal error
    pub fn print_error(&self, error: &GuardError) {
        eprintln!("{} {}", "Error:".red().bold(), error);
        eprint!("{}", render_error_details(error));
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// A titled, indented list of permission names
pub fn format_permission_block(title: &str, permissions: &PermissionSet) -> String {
    let mut out = format!("{} ({}):\n", title, permissions.len());
    for permission in permissions {
        out.push_str(INDENT);
        out.push_str(permission.name());
        out.push('\n');
    }
    out
}

/// Extra lines printed under the one-line error message
pub fn render_error_details(error: &GuardError) -> String {
    match error {
        GuardError::SnapshotMissing(path) => framed(&format!(
            "No permission snapshot found at {}.\n\
             This is expected on the first run. Record the current permissions with:\n\
             {}no-new-permission snapshot <TOOLCHAIN> <PACKAGE>",
            path.display(),
            INDENT
        )),
        GuardError::Signaled { signal } => framed(signal),
        GuardError::ExitStatus { stderr, .. } => {
            let stderr = stderr.trim_end();
            if stderr.is_empty() {
                framed("(no output on stderr)")
            } else {
                framed(stderr)
            }
        }
        other => {
            let mut out = String::new();
            let mut source = other.source();
            while let Some(cause) = source {
                out.push_str(&format!("Caused by: {}\n", cause));
                source = cause.source();
            }
            out
        }
    }
}

fn framed(body: &str) -> String {
    format!("{}\n{}\n{}\n", DELIMITER, body, DELIMITER)
}

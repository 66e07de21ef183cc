//! Command-line surface: argument parsing and terminal output

mod args;
mod console;

pub use args::{Cli, Commands, Target};
pub use console::{format_permission_block, render_error_details, Console, DELIMITER};

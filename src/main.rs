use std::process::ExitCode;

use clap::Parser;

use no_new_permission::cli::{Cli, Commands, Console};
use no_new_permission::core::GuardResult;
use no_new_permission::detector::Detector;
use no_new_permission::logging;
use no_new_permission::runner;
use no_new_permission::snapshot::SnapshotStorage;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Held until exit so buffered file logs are flushed
    let _log_guard = match logging::init_logging(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    let console = Console::new();

    match run(&cli, &console).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::debug!("Permission check aborted: {}", e);
            console.print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli, console: &Console) -> GuardResult<u8> {
    let config = cli.to_config();
    config.validate()?;

    let detector = Detector::new(config.detector_config())?;
    tracing::debug!("Inspection command: {}", detector.command_line());

    match &cli.command {
        Commands::Check(_) => {
            let storage = SnapshotStorage::new(config.snapshot_path()?);
            runner::check(&detector, &storage, console).await
        }
        Commands::List(_) => runner::list(&detector, console).await,
        Commands::Snapshot(_) => {
            let storage = SnapshotStorage::new(config.snapshot_path()?);
            runner::snapshot(&detector, &storage, console).await
        }
    }
}

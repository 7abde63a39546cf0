//! Command-line arguments and the conversion run.

use std::path::PathBuf;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use gbfr_converter::{BatchProcessor, discover_convertible_files};
use gbfr_core::config::{AppConfig, DEFAULT_CONFIG_FILE};
use gbfr_core::error::{AppError, ErrorKind};
use gbfr_core::result::AppResult;

use crate::output::{self, ConsoleProgress};
use crate::{logging, prompt};

/// Batch-convert GBFR .msg files to JSON and .bxm files to XML
#[derive(Debug, Parser)]
#[command(name = "gbfr-data-converter", version, about, long_about = None)]
pub struct Args {
    /// Directory to convert (prompted for when omitted)
    pub path: Option<PathBuf>,

    /// Path to the settings file
    #[arg(short, long, env = "GBFR_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Exit without waiting for a keypress
    #[arg(long)]
    pub no_pause: bool,
}

/// Run one conversion pass.
///
/// Errors returned here are the pre-flight failures that end the run
/// before any file is touched. Per-file failures only show up in the
/// summary.
pub async fn run(args: &Args) -> AppResult<()> {
    output::print_banner();

    let config = AppConfig::load(&args.config)?;
    println!("Configuration loaded successfully");
    println!();

    logging::init(&config.logging);
    tracing::debug!(
        path = %args.config.display(),
        timeout_s = config.conversion.timeout_seconds,
        "Configuration loaded"
    );

    config.tool_settings.validate_paths()?;

    let root = match &args.path {
        Some(path) => prompt::check_directory(&path.to_string_lossy())?,
        None => prompt::ask_directory()?,
    };

    let files = discover_convertible_files(&root).await;
    if files.is_empty() {
        println!("No convertible files found (.msg or .bxm)");
        return Ok(());
    }

    println!("Found {} file(s) to convert", files.len());
    println!();

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            watcher.cancel();
        }
    });

    let processor = BatchProcessor::new(&config);
    let mut progress = ConsoleProgress::default();
    let result = processor.run(&files, &mut progress, &cancel).await;

    if cancel.is_cancelled() {
        output::print_warning(&format!(
            "Conversion cancelled: {} of {} file(s) processed",
            result.total(),
            files.len()
        ));
        println!();
    }

    output::print_summary(&result);
    Ok(())
}

/// Print a pre-flight failure the way the user needs to see it.
///
/// The caller exits with status 1 after this, so scripts can tell an
/// aborted run from a completed one. A completed run exits 0 even when
/// individual files failed.
pub fn report_error(err: &AppError, args: &Args) {
    match err.kind {
        ErrorKind::Configuration => {
            output::print_error(&format!("Error loading configuration: {}", err.message));
            println!(
                "Please ensure {} exists and is properly formatted.",
                args.config.display()
            );
        }
        _ => output::print_error(&format!("Error: {}", err.message)),
    }
}

//! Console output for the conversion run.

use std::fmt::Write as _;
use std::path::Path;

use gbfr_converter::{ConversionResult, FileOutcome, ProgressObserver};

/// Print the startup banner.
pub fn print_banner() {
    println!("=== GBFR Data Converter ===");
    println!();
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print the final tally.
pub fn print_summary(result: &ConversionResult) {
    print!("{}", render_summary(result));
}

/// Format the final tally.
pub fn render_summary(result: &ConversionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Conversion Complete ===");
    let _ = writeln!(out, "Success: {} file(s)", result.succeeded);
    let _ = writeln!(out, "Failed: {} file(s)", result.failed);
    let _ = writeln!(out, "Skipped: {} file(s)", result.skipped);
    let _ = writeln!(out, "Total: {} file(s)", result.total());
    out
}

/// Per-file progress lines on stdout.
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ConsoleProgress {
    fn describe(outcome: &FileOutcome, path: &Path) -> Vec<String> {
        match outcome {
            FileOutcome::Converted {
                output,
                source_deleted,
            } => {
                let mut lines = vec![format!("  Success: Converted to {}", output.display())];
                if *source_deleted {
                    lines.push(format!("  Deleted: {}", path.display()));
                }
                lines
            }
            FileOutcome::AlreadyConverted { output, label } => vec![format!(
                "  Skipped: {} file already exists at {}",
                label,
                output.display()
            )],
            FileOutcome::Failed { error } => vec![format!("  Conversion failed: {}", error)],
            FileOutcome::Skipped { reason } => vec![format!("  Skipped: {}", reason)],
        }
    }
}

impl ProgressObserver for ConsoleProgress {
    fn file_started(&mut self, index: usize, total: usize, path: &Path) {
        println!("Processing [{}/{}]: {}", index, total, path.display());
    }

    fn file_finished(&mut self, path: &Path, outcome: &FileOutcome) {
        for line in Self::describe(outcome, path) {
            println!("{}", line);
        }
        println!();
    }
}

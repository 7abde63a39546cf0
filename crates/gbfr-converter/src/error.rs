//! Per-file conversion error type.
//!
//! Every failure inside the convert, verify and delete sequence for one
//! file is a `ConversionError`. The dispatcher turns it into a failed
//! tally entry; it never aborts the batch.

use gbfr_core::error::{AppError, ErrorKind};
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for a single file conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    // --- Process execution errors ---
    /// The converter process could not be started.
    #[error("Unable to start {tool}: {source}")]
    LaunchFailed {
        /// Display name of the converter.
        tool: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The converter exited with a non-zero status.
    #[error("{tool} exited with code {code}: {}", diagnostic(.stderr, .stdout))]
    ToolFailed {
        /// Display name of the converter.
        tool: String,
        /// The exit code (`-1` when terminated by a signal).
        code: i32,
        /// Captured stderr output.
        stderr: String,
        /// Captured stdout output.
        stdout: String,
    },

    /// The converter exceeded the configured timeout and was killed.
    #[error("{tool} timed out after {timeout_seconds}s")]
    Timeout {
        /// Display name of the converter.
        tool: String,
        /// The timeout that was exceeded.
        timeout_seconds: u64,
    },

    /// The batch was cancelled while the converter was running.
    #[error("Conversion was cancelled")]
    Cancelled,

    // --- Output verification errors ---
    /// The converter reported success but the output file is missing.
    #[error("Output file is missing: {path}")]
    OutputNotCreated {
        /// Expected output path.
        path: PathBuf,
    },

    /// The output file is smaller than the configured minimum.
    #[error("Output file is empty ({size} bytes): {path}")]
    OutputEmpty {
        /// Path to the output file.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
    },

    /// The output was verified but the original could not be removed.
    #[error("Converted to {output} but failed to delete {source_path}: {source}")]
    SourceNotDeleted {
        /// The input file that is still on disk.
        source_path: PathBuf,
        /// The verified output file.
        output: PathBuf,
        /// Underlying removal error.
        #[source]
        source: std::io::Error,
    },

    // --- Generic errors ---
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output reader task join error.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ConversionError {
    /// The error category used for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LaunchFailed { .. } => ErrorKind::ProcessLaunch,
            Self::ToolFailed { .. } => ErrorKind::ToolExit,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::OutputNotCreated { .. }
            | Self::OutputEmpty { .. }
            | Self::SourceNotDeleted { .. }
            | Self::Io(_)
            | Self::Join(_) => ErrorKind::OutputVerification,
        }
    }
}

/// Prefer stderr; fall back to stdout when the tool wrote nothing there.
fn diagnostic<'a>(stderr: &'a str, stdout: &'a str) -> &'a str {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        stdout.trim()
    } else {
        stderr
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        AppError::new(err.kind(), err.to_string())
    }
}

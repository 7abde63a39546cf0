//! Unified application error types.
//!
//! Pre-flight failures (configuration, tool paths, input directory) are
//! reported as [`AppError`] and end the run. Per-file conversion errors
//! live in `gbfr-converter` and map into the same [`ErrorKind`] set.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The settings file is missing, malformed, or incomplete.
    Configuration,
    /// A configured external converter does not exist on disk.
    MissingTool,
    /// User input was rejected (e.g. the directory to convert).
    Validation,
    /// A directory could not be read while scanning for files.
    DirectoryScan,
    /// An external converter could not be started.
    ProcessLaunch,
    /// An external converter exited with a non-zero status.
    ToolExit,
    /// The converter reported success but produced no usable output.
    OutputVerification,
    /// An external converter exceeded its time budget.
    Timeout,
    /// The batch was cancelled by the user.
    Cancelled,
    /// A generic file system error.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::MissingTool => write!(f, "MISSING_TOOL"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::DirectoryScan => write!(f, "DIRECTORY_SCAN"),
            Self::ProcessLaunch => write!(f, "PROCESS_LAUNCH"),
            Self::ToolExit => write!(f, "TOOL_EXIT"),
            Self::OutputVerification => write!(f, "OUTPUT_VERIFICATION"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Io => write!(f, "IO"),
        }
    }
}

/// The unified application error.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a missing-tool error.
    pub fn missing_tool(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingTool, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Invalid configuration: {err}"),
            err,
        )
    }
}

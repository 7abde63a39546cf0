//! Subprocess and output verification settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for running the external converters.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Timeout in seconds for a single converter invocation.
    #[serde(rename = "TimeoutSeconds", alias = "timeoutseconds")]
    #[validate(range(min = 1, max = 86400))]
    pub timeout_seconds: u64,

    /// Minimum output file size (bytes) to consider a conversion successful.
    #[serde(rename = "MinOutputBytes", alias = "minoutputbytes")]
    #[validate(range(min = 1))]
    pub min_output_bytes: u64,

    /// Whether to delete the source file after a verified conversion.
    #[serde(rename = "DeleteSource", alias = "deletesource")]
    pub delete_source: bool,

    /// Whether to capture converter stdout/stderr for diagnostics.
    #[serde(rename = "CaptureOutput", alias = "captureoutput")]
    pub capture_output: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            min_output_bytes: default_min_output_bytes(),
            delete_source: true,
            capture_output: true,
        }
    }
}

fn default_timeout_seconds() -> u64 {
    600
}

fn default_min_output_bytes() -> u64 {
    1
}

impl ConversionConfig {
    /// The per-invocation timeout as a [`std::time::Duration`].
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}

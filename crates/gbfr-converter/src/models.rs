//! Domain models: file formats, per-file outcomes, and the batch tally.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

// ---------------------------------------------------------------------------
// Extension map macro
// ---------------------------------------------------------------------------

macro_rules! define_file_formats {
    ($($variant:ident => $ext:literal),* $(,)?) => {
        static EXTENSION_MAP: LazyLock<HashMap<&'static str, FileFormat>> = LazyLock::new(|| {
            HashMap::from([$(($ext, FileFormat::$variant),)*])
        });

        impl FileFormat {
            /// All source extensions recognized by the converter (lower-case, no dot).
            pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &[$($ext,)*];
        }
    };
}

define_file_formats! {
    MessagePack => "msg",
    BinaryXml   => "bxm",
}

/// Recognized source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    /// MessagePack-encoded table (`.msg`), converted to JSON.
    MessagePack,
    /// PlatinumGames binary XML (`.bxm`), converted to XML.
    BinaryXml,
}

impl FileFormat {
    /// Determine the format from a path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        EXTENSION_MAP.get(ext.as_str()).copied()
    }

    /// The source extension for this format (no dot).
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::MessagePack => "msg",
            FileFormat::BinaryXml => "bxm",
        }
    }

    /// Human-readable name of the produced text format.
    pub fn target_label(&self) -> &'static str {
        match self {
            FileFormat::MessagePack => "JSON",
            FileFormat::BinaryXml => "XML",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

// ---------------------------------------------------------------------------
// FileOutcome
// ---------------------------------------------------------------------------

/// What happened to one discovered file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The converter ran and produced verified output.
    Converted {
        /// The verified output file.
        output: PathBuf,
        /// Whether the original was removed.
        source_deleted: bool,
    },
    /// The output already existed; the converter was not run.
    AlreadyConverted {
        /// The pre-existing output file.
        output: PathBuf,
        /// Format label of the output (`JSON`/`XML`).
        label: &'static str,
    },
    /// The conversion failed; the original is still on disk.
    Failed {
        /// The reason.
        error: ConversionError,
    },
    /// The file is not a recognized format.
    Skipped {
        /// Why nothing was done.
        reason: String,
    },
}

impl FileOutcome {
    /// Whether this outcome counts toward the success tally.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            FileOutcome::Converted { .. } | FileOutcome::AlreadyConverted { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// ConversionResult
// ---------------------------------------------------------------------------

/// Tally of a conversion batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Files converted or already converted.
    pub succeeded: usize,
    /// Files whose conversion failed.
    pub failed: usize,
    /// Files that were not processed.
    pub skipped: usize,
}

impl ConversionResult {
    /// Total number of files processed.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }

    /// Count one outcome in exactly one bucket.
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Converted { .. } | FileOutcome::AlreadyConverted { .. } => {
                self.succeeded += 1
            }
            FileOutcome::Failed { .. } => self.failed += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
        }
    }
}

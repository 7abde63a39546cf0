//! Batch dispatcher: per-file convert, verify, and source cleanup.

use std::path::{Path, PathBuf};

use gbfr_core::config::AppConfig;
use gbfr_core::config::conversion::ConversionConfig;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::converter::{Converter, ConverterSet};
use crate::error::ConversionError;
use crate::executor::ToolExecutor;
use crate::filesystem::{output_exists, verify_output};
use crate::models::{ConversionResult, FileOutcome};

/// Receives per-file progress from [`BatchProcessor::run`].
///
/// All methods default to doing nothing.
pub trait ProgressObserver {
    /// Called before a file is processed. `index` is 1-based.
    fn file_started(&mut self, _index: usize, _total: usize, _path: &Path) {}

    /// Called once the outcome for a file is known.
    fn file_finished(&mut self, _path: &Path, _outcome: &FileOutcome) {}
}

impl ProgressObserver for () {}

/// Converts discovered files one at a time.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Converter per source format.
    converters: ConverterSet,
    /// Subprocess runner.
    executor: ToolExecutor,
    /// Verification and cleanup settings.
    config: ConversionConfig,
}

impl BatchProcessor {
    /// Create a processor from the loaded application configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_parts(
            ConverterSet::from_settings(&config.tool_settings),
            ToolExecutor::from_config(&config.conversion),
            config.conversion.clone(),
        )
    }

    /// Create a processor from explicit parts.
    pub fn with_parts(
        converters: ConverterSet,
        executor: ToolExecutor,
        config: ConversionConfig,
    ) -> Self {
        Self {
            converters,
            executor,
            config,
        }
    }

    /// Process `files` sequentially and return the tally.
    ///
    /// Each processed file lands in exactly one counter. When `cancel`
    /// fires, the running converter is killed (that file counts as failed)
    /// and the remaining files are left untouched and uncounted.
    pub async fn run(
        &self,
        files: &[PathBuf],
        observer: &mut dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> ConversionResult {
        let mut result = ConversionResult::default();
        let total = files.len();

        for (index, path) in files.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(
                    remaining = total - index,
                    "Batch cancelled, remaining files not processed"
                );
                break;
            }

            observer.file_started(index + 1, total, path);
            let outcome = self.process_file(path, cancel).await;
            result.record(&outcome);
            observer.file_finished(path, &outcome);
        }

        info!(
            succeeded = result.succeeded,
            failed = result.failed,
            skipped = result.skipped,
            total = result.total(),
            "Batch finished"
        );
        result
    }

    /// Convert a single file, catching every error into the outcome.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn process_file(&self, path: &Path, cancel: &CancellationToken) -> FileOutcome {
        let Some(converter) = self.converters.for_path(path) else {
            return FileOutcome::Skipped {
                reason: "Unsupported file type".to_string(),
            };
        };

        match self.convert(converter, path, cancel).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(error = %error, kind = %error.kind(), "Conversion failed");
                FileOutcome::Failed { error }
            }
        }
    }

    /// Shared sequence for every converter: skip-if-exists, run, verify, delete.
    async fn convert(
        &self,
        converter: &dyn Converter,
        input: &Path,
        cancel: &CancellationToken,
    ) -> Result<FileOutcome, ConversionError> {
        let output = converter.output_path(input);

        if output_exists(&output).await {
            info!(output = %output.display(), "Output already exists, not converting");
            return Ok(FileOutcome::AlreadyConverted {
                output,
                label: converter.format().target_label(),
            });
        }

        let execution = match self.executor.run(converter, input, &output, cancel).await {
            Ok(execution) => execution,
            Err(error) => {
                if matches!(
                    error,
                    ConversionError::Timeout { .. } | ConversionError::Cancelled
                ) {
                    discard_partial_output(&output).await;
                }
                return Err(error);
            }
        };

        if !execution.stdout.is_empty() {
            debug!(tool = converter.tool_name(), stdout = %execution.stdout.trim_end(), "Converter stdout");
        }
        if !execution.stderr.is_empty() {
            debug!(tool = converter.tool_name(), stderr = %execution.stderr.trim_end(), "Converter stderr");
        }

        let size = verify_output(&output, self.config.min_output_bytes).await?;
        info!(
            output = %output.display(),
            bytes = size,
            elapsed_ms = execution.duration.as_millis() as u64,
            "Output verified"
        );

        if !self.config.delete_source {
            return Ok(FileOutcome::Converted {
                output,
                source_deleted: false,
            });
        }

        if let Err(source) = tokio::fs::remove_file(input).await {
            return Err(ConversionError::SourceNotDeleted {
                source_path: input.to_path_buf(),
                output,
                source,
            });
        }

        Ok(FileOutcome::Converted {
            output,
            source_deleted: true,
        })
    }
}

/// Remove whatever a killed converter left at `output`.
///
/// Only called after the existence check found nothing there, so any file
/// now present was written by the interrupted run.
async fn discard_partial_output(output: &Path) {
    match tokio::fs::remove_file(output).await {
        Ok(()) => info!(output = %output.display(), "Removed partial output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            output = %output.display(),
            error = %e,
            "Failed to remove partial output"
        ),
    }
}

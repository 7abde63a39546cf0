//! Subprocess execution for the external converters.
//!
//! Each invocation races the child's exit against a timeout and a
//! cancellation token. Stdout and stderr are drained on separate tasks
//! while the child runs so a verbose tool cannot stall on a full pipe.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use gbfr_core::config::conversion::ConversionConfig;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::converter::Converter;
use crate::error::ConversionError;

/// Captured result of a converter run that exited successfully.
#[derive(Debug, Clone)]
pub struct ExecutionOutput {
    /// Standard output from the process.
    pub stdout: String,
    /// Standard error from the process.
    pub stderr: String,
    /// Wall-clock duration of the run, including draining the pipes.
    pub duration: Duration,
}

/// Runs converter executables one at a time.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    /// Maximum time a single invocation may run.
    timeout: Duration,
    /// Whether stdout/stderr are piped back or discarded.
    capture_output: bool,
}

impl ToolExecutor {
    /// Create an executor with an explicit timeout.
    pub fn new(timeout: Duration, capture_output: bool) -> Self {
        Self {
            timeout,
            capture_output,
        }
    }

    /// Create an executor from the `Conversion` settings.
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(config.timeout(), config.capture_output)
    }

    /// The per-invocation timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `converter` on `input`, writing `output`.
    ///
    /// Returns the captured output when the tool exits with status 0.
    /// A non-zero exit, a spawn failure, the timeout, or cancellation are
    /// errors; in the last two cases the child is killed. The timeout
    /// also bounds draining stdout and stderr after the child exits.
    pub async fn run(
        &self,
        converter: &dyn Converter,
        input: &Path,
        output: &Path,
        cancel: &CancellationToken,
    ) -> Result<ExecutionOutput, ConversionError> {
        if cancel.is_cancelled() {
            return Err(ConversionError::Cancelled);
        }

        let tool = converter.tool_name();
        let args = converter.args(input, output);

        let mut cmd = Command::new(converter.tool_path());

        #[cfg(windows)]
        {
            const CREATE_NO_WINDOW: u32 = 0x08000000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        let (stdout_cfg, stderr_cfg) = if self.capture_output {
            (Stdio::piped(), Stdio::piped())
        } else {
            (Stdio::null(), Stdio::null())
        };

        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(stdout_cfg)
            .stderr(stderr_cfg)
            .kill_on_drop(true);

        debug!(
            tool = tool,
            path = %converter.tool_path().display(),
            args = ?args,
            timeout_s = self.timeout.as_secs(),
            "Spawning converter"
        );

        let start = Instant::now();
        let deadline = start + self.timeout;

        let mut child = cmd.spawn().map_err(|source| {
            error!(tool = tool, error = %source, "Failed to start converter");
            ConversionError::LaunchFailed {
                tool: tool.to_string(),
                source,
            }
        })?;

        let mut stdout_task = tokio::spawn(read_stream(child.stdout.take()));
        let mut stderr_task = tokio::spawn(read_stream(child.stderr.take()));

        // Race: process completion vs timeout vs cancellation
        let status = tokio::select! {
            result = child.wait() => result?,
            _ = tokio::time::sleep_until(deadline) => {
                error!(
                    tool = tool,
                    timeout_s = self.timeout.as_secs(),
                    input = %input.display(),
                    "Converter timed out, killing"
                );
                let _ = child.kill().await;
                stdout_task.abort();
                stderr_task.abort();
                return Err(self.timed_out(tool));
            }
            _ = cancel.cancelled() => {
                info!(tool = tool, "Conversion cancelled, killing converter");
                let _ = child.kill().await;
                stdout_task.abort();
                stderr_task.abort();
                return Err(ConversionError::Cancelled);
            }
        };

        // A detached grandchild can keep the pipes open after the tool exits.
        let drained = tokio::time::timeout_at(deadline, async {
            let stdout = (&mut stdout_task).await?;
            let stderr = (&mut stderr_task).await?;
            Ok::<_, tokio::task::JoinError>((stdout, stderr))
        })
        .await;

        let (stdout, stderr) = match drained {
            Ok(joined) => joined?,
            Err(_) => {
                error!(
                    tool = tool,
                    timeout_s = self.timeout.as_secs(),
                    input = %input.display(),
                    "Converter output still open at deadline"
                );
                stdout_task.abort();
                stderr_task.abort();
                return Err(self.timed_out(tool));
            }
        };
        let duration = start.elapsed();

        if status.success() {
            info!(
                tool = tool,
                input = %input.display(),
                elapsed_ms = duration.as_millis() as u64,
                "Converter completed"
            );
            Ok(ExecutionOutput {
                stdout,
                stderr,
                duration,
            })
        } else {
            let code = status.code().unwrap_or(-1);
            warn!(
                tool = tool,
                code = code,
                elapsed_ms = duration.as_millis() as u64,
                stderr = %stderr.trim_end(),
                "Converter failed"
            );
            Err(ConversionError::ToolFailed {
                tool: tool.to_string(),
                code,
                stderr,
                stdout,
            })
        }
    }

    fn timed_out(&self, tool: &str) -> ConversionError {
        ConversionError::Timeout {
            tool: tool.to_string(),
            timeout_seconds: self.timeout.as_secs(),
        }
    }
}

/// Read a captured pipe to the end; an absent pipe yields an empty string.
async fn read_stream<R>(stream: Option<R>) -> String
where
    R: AsyncRead + Unpin,
{
    let Some(mut stream) = stream else {
        return String::new();
    };

    let mut buf = Vec::new();
    if let Err(e) = stream.read_to_end(&mut buf).await {
        debug!(error = %e, "Failed to read converter output");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

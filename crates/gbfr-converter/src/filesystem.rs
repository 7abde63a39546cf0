//! Filesystem utilities: discovery of convertible files and output checks.

use std::path::{Path, PathBuf};

use gbfr_core::error::ErrorKind;
use tracing::{debug, warn};

use crate::error::ConversionError;
use crate::models::FileFormat;

/// Recursively collect every `.msg` and `.bxm` file under `root`.
///
/// Extension matching is case-insensitive. The order is the walk order.
/// A directory that cannot be read is logged and skipped, so the caller
/// always receives whatever was found, possibly nothing. Symbolic links to
/// directories are not followed.
pub async fn discover_convertible_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut dirs_to_visit = vec![root.to_path_buf()];

    while let Some(current_dir) = dirs_to_visit.pop() {
        let mut entries = match tokio::fs::read_dir(&current_dir).await {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    dir = %current_dir.display(),
                    error = %e,
                    kind = %ErrorKind::DirectoryScan,
                    "Error scanning directory, skipping"
                );
                continue;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(
                        dir = %current_dir.display(),
                        error = %e,
                        kind = %ErrorKind::DirectoryScan,
                        "Error scanning directory, keeping partial results"
                    );
                    break;
                }
            };

            let file_type = match entry.file_type().await {
                Ok(t) => t,
                Err(e) => {
                    warn!(
                        path = %entry.path().display(),
                        error = %e,
                        kind = %ErrorKind::DirectoryScan,
                        "Cannot stat entry, skipping"
                    );
                    continue;
                }
            };

            let path = entry.path();
            if file_type.is_dir() {
                dirs_to_visit.push(path);
            } else if is_file_like(&path, file_type).await
                && FileFormat::from_path(&path).is_some()
            {
                files.push(path);
            }
        }
    }

    debug!(root = %root.display(), count = files.len(), "Directory scan finished");
    files
}

/// Regular files, plus symbolic links that resolve to regular files.
async fn is_file_like(path: &Path, file_type: std::fs::FileType) -> bool {
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        return tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
    }
    false
}

/// Check that `output` exists and holds at least `min_bytes` bytes.
///
/// Returns the output size on success.
pub async fn verify_output(output: &Path, min_bytes: u64) -> Result<u64, ConversionError> {
    let metadata = match tokio::fs::metadata(output).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConversionError::OutputNotCreated {
                path: output.to_path_buf(),
            });
        }
        Err(e) => return Err(ConversionError::Io(e)),
    };

    if !metadata.is_file() {
        return Err(ConversionError::OutputNotCreated {
            path: output.to_path_buf(),
        });
    }

    let size = metadata.len();
    if size < min_bytes {
        return Err(ConversionError::OutputEmpty {
            path: output.to_path_buf(),
            size,
        });
    }

    Ok(size)
}

/// Whether something already exists at `path`.
pub async fn output_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

//! External converter paths.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Display name of the `.msg` converter.
pub const MSGPACK2JSON_TOOL: &str = "MsgPack2Json";

/// Display name of the `.bxm` converter.
pub const NIER_CLI_TOOL: &str = "nier_cli";

/// Locations of the two external converter executables.
///
/// Both fields are required in the `ToolSettings` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Path to `MsgPack2Json.exe`.
    #[serde(rename = "MsgPack2JsonPath", alias = "msgpack2jsonpath")]
    pub msgpack2json_path: PathBuf,
    /// Path to `nier_cli.exe`.
    #[serde(rename = "NierCliPath", alias = "nierclipath")]
    pub nier_cli_path: PathBuf,
}

impl ToolSettings {
    /// Create settings from two explicit paths.
    pub fn new(msgpack2json_path: impl Into<PathBuf>, nier_cli_path: impl Into<PathBuf>) -> Self {
        Self {
            msgpack2json_path: msgpack2json_path.into(),
            nier_cli_path: nier_cli_path.into(),
        }
    }

    /// Reject settings with an empty path value.
    pub fn ensure_configured(&self) -> AppResult<()> {
        for (key, path) in [
            ("MsgPack2JsonPath", &self.msgpack2json_path),
            ("NierCliPath", &self.nier_cli_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(AppError::configuration(format!(
                    "ToolSettings.{key} is not set"
                )));
            }
        }
        Ok(())
    }

    /// Confirm both converters exist as regular files.
    ///
    /// `MsgPack2Json` is checked first. The error names the tool and the
    /// configured path.
    pub fn validate_paths(&self) -> AppResult<()> {
        check_tool(MSGPACK2JSON_TOOL, &self.msgpack2json_path)?;
        check_tool(NIER_CLI_TOOL, &self.nier_cli_path)?;

        tracing::info!(
            msgpack2json = %self.msgpack2json_path.display(),
            nier_cli = %self.nier_cli_path.display(),
            "External converters found"
        );
        Ok(())
    }
}

fn check_tool(tool: &str, path: &Path) -> AppResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AppError::missing_tool(format!(
            "Cannot find {tool} at {}",
            path.display()
        )))
    }
}

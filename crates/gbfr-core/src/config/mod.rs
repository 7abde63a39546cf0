//! Application configuration schemas.
//!
//! The settings file (`appsettings.json` by default) is read once at
//! startup via the `config` crate. Each sub-module represents a logical
//! section of that file. Keys are PascalCase; lower-case spellings are
//! accepted as aliases.

pub mod conversion;
pub mod logging;
pub mod tools;

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::conversion::ConversionConfig;
use self::logging::LoggingConfig;
use self::tools::ToolSettings;

use crate::error::AppError;
use crate::result::AppResult;

/// Default settings file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "appsettings.json";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Paths to the external converters.
    #[serde(rename = "ToolSettings", alias = "toolsettings")]
    pub tool_settings: ToolSettings,
    /// Subprocess and verification settings.
    #[serde(rename = "Conversion", alias = "conversion", default)]
    pub conversion: ConversionConfig,
    /// Logging settings.
    #[serde(rename = "Logging", alias = "logging", default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a settings file.
    ///
    /// The file is required. Its format is inferred from the extension.
    /// Both tool paths must be non-empty and the `Conversion` section must
    /// pass validation.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();

        let config = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .build()
            .map_err(|e| {
                AppError::configuration(format!(
                    "Failed to read settings file '{}': {e}",
                    path.display()
                ))
            })?;

        let app_config: Self = config.try_deserialize().map_err(|e| {
            AppError::configuration(format!(
                "Failed to deserialize settings file '{}': {e}",
                path.display()
            ))
        })?;

        app_config.tool_settings.ensure_configured()?;
        app_config.conversion.validate()?;

        Ok(app_config)
    }
}

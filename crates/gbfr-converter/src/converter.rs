//! The converter capability: one implementation per source format.
//!
//! A [`Converter`] only knows how to name its output and how to call its
//! tool. Running, verifying and cleaning up is shared and lives in
//! [`crate::processor::BatchProcessor`].

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use gbfr_core::config::tools::{MSGPACK2JSON_TOOL, NIER_CLI_TOOL, ToolSettings};

use crate::models::FileFormat;

/// A source format backed by an external converter executable.
pub trait Converter: fmt::Debug + Send + Sync {
    /// The source format this converter accepts.
    fn format(&self) -> FileFormat;

    /// Display name of the external tool.
    fn tool_name(&self) -> &str;

    /// Path to the external tool.
    fn tool_path(&self) -> &Path;

    /// Where the converted file for `input` is written.
    fn output_path(&self, input: &Path) -> PathBuf;

    /// Command-line arguments for converting `input` into `output`.
    fn args(&self, input: &Path, output: &Path) -> Vec<OsString>;
}

/// `.msg` → `.json` via `MsgPack2Json json <input> <output>`.
#[derive(Debug, Clone)]
pub struct MsgPackConverter {
    tool_path: PathBuf,
}

impl MsgPackConverter {
    /// Subcommand selecting JSON output.
    const MODE: &'static str = "json";

    /// Create a converter using the tool at `tool_path`.
    pub fn new(tool_path: impl Into<PathBuf>) -> Self {
        Self {
            tool_path: tool_path.into(),
        }
    }
}

impl Converter for MsgPackConverter {
    fn format(&self) -> FileFormat {
        FileFormat::MessagePack
    }

    fn tool_name(&self) -> &str {
        MSGPACK2JSON_TOOL
    }

    fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    fn output_path(&self, input: &Path) -> PathBuf {
        input.with_extension("json")
    }

    fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            OsString::from(Self::MODE),
            input.as_os_str().to_owned(),
            output.as_os_str().to_owned(),
        ]
    }
}

/// `.bxm` → `.bxm.xml` via `nier_cli <input> -o <output>`.
#[derive(Debug, Clone)]
pub struct BxmConverter {
    tool_path: PathBuf,
}

impl BxmConverter {
    /// Suffix appended to the full input file name.
    const OUTPUT_SUFFIX: &'static str = ".xml";
    /// Output flag understood by `nier_cli`.
    const OUTPUT_FLAG: &'static str = "-o";

    /// Create a converter using the tool at `tool_path`.
    pub fn new(tool_path: impl Into<PathBuf>) -> Self {
        Self {
            tool_path: tool_path.into(),
        }
    }
}

impl Converter for BxmConverter {
    fn format(&self) -> FileFormat {
        FileFormat::BinaryXml
    }

    fn tool_name(&self) -> &str {
        NIER_CLI_TOOL
    }

    fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    fn output_path(&self, input: &Path) -> PathBuf {
        let mut name = input.as_os_str().to_owned();
        name.push(Self::OUTPUT_SUFFIX);
        PathBuf::from(name)
    }

    fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            input.as_os_str().to_owned(),
            OsString::from(Self::OUTPUT_FLAG),
            output.as_os_str().to_owned(),
        ]
    }
}

/// The configured converters, selected by source format.
#[derive(Debug, Clone)]
pub struct ConverterSet {
    msgpack: MsgPackConverter,
    bxm: BxmConverter,
}

impl ConverterSet {
    /// Build both converters from the configured tool paths.
    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            msgpack: MsgPackConverter::new(&settings.msgpack2json_path),
            bxm: BxmConverter::new(&settings.nier_cli_path),
        }
    }

    /// The converter for `format`.
    pub fn for_format(&self, format: FileFormat) -> &dyn Converter {
        match format {
            FileFormat::MessagePack => &self.msgpack,
            FileFormat::BinaryXml => &self.bxm,
        }
    }

    /// The converter for a path, or `None` for unrecognized extensions.
    pub fn for_path(&self, path: &Path) -> Option<&dyn Converter> {
        FileFormat::from_path(path).map(|format| self.for_format(format))
    }
}

//! # GBFR Converter
//!
//! Drives the two external converters that turn GBFR binary data into
//! editable text:
//!
//! - `.msg` (MessagePack) files go through `MsgPack2Json` and become `.json`
//! - `.bxm` (binary XML) files go through `nier_cli` and become `.bxm.xml`
//!
//! Files are discovered recursively, converted one at a time, verified,
//! and the originals removed once their output is confirmed.

pub mod converter;
pub mod error;
pub mod executor;
pub mod filesystem;
pub mod models;
pub mod processor;

pub use converter::{BxmConverter, Converter, ConverterSet, MsgPackConverter};
pub use error::ConversionError;
pub use executor::{ExecutionOutput, ToolExecutor};
pub use filesystem::discover_convertible_files;
pub use models::{ConversionResult, FileFormat, FileOutcome};
pub use processor::{BatchProcessor, ProgressObserver};

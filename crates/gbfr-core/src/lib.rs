//! # gbfr-core
//!
//! Core crate for the GBFR data converter. Contains the configuration
//! schemas loaded from `appsettings.json` and the unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;

pub use config::AppConfig;
pub use error::{AppError, ErrorKind};
pub use result::AppResult;

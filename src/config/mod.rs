//! Run configuration and constants.
//!
//! This module provides:
//! - Default values (source URL, file names, table name, timeout)
//! - The `Config` options struct (CLI and programmatic)
//! - Date-stamped output paths

mod constants;
mod paths;
mod types;

// Re-export all constants
pub use constants::*;
pub use paths::RunPaths;
pub use types::{validate_table_name, validate_url, Config, LogFormat, LogLevel};

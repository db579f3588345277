//! Error handling.
//!
//! Error types are categorized into:
//! - **Fatal**: configuration, extraction, transform, storage and initialization errors,
//!   which end the run
//! - **Row faults**: a single malformed table row, logged and skipped

mod types;

// Re-export public API
pub use types::{
    ConfigError, ExtractError, ExtractErrorKind, InitializationError, PipelineError, RowFault,
    StorageError, TransformError,
};

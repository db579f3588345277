//! Main application modules.
//!
//! This module provides the milestone log used by every pipeline stage.

pub mod logging;

// Re-export public API
pub use logging::{
    format_progress_line, FileProgressLog, MemoryProgressLog, ProgressLog,
    PROGRESS_TIMESTAMP_FORMAT,
};

//! Pipeline milestone log.
//!
//! Components report milestones through [`ProgressLog`] instead of writing to
//! a global file. Production runs append to the run's `code_log.txt`; tests
//! collect messages in memory.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDateTime;
use log::{info, warn};

/// Timestamp layout of milestone log lines, e.g. `2024-Oct-01-09:27`.
pub const PROGRESS_TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M";

/// Sink for pipeline milestones.
pub trait ProgressLog: Send + Sync {
    /// Records one milestone. Never fails; sinks report their own write errors.
    fn record(&self, message: &str);
}

/// Formats one log line: `<YYYY-Mon-DD-HH:MM>: <message>\n`.
pub fn format_progress_line(timestamp: NaiveDateTime, message: &str) -> String {
    format!(
        "{}: {}\n",
        timestamp.format(PROGRESS_TIMESTAMP_FORMAT),
        message
    )
}

/// Appends milestones to a text file, one line per call.
#[derive(Debug, Clone)]
pub struct FileProgressLog {
    path: PathBuf,
}

impl FileProgressLog {
    /// Logs to `path`. The file is created on first write; the parent
    /// directory must already exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl ProgressLog for FileProgressLog {
    fn record(&self, message: &str) {
        info!("{}", message);
        let line = format_progress_line(chrono::Local::now().naive_local(), message);
        if let Err(e) = self.append(&line) {
            warn!(
                "Failed to append to progress log {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Keeps milestones in memory.
#[derive(Debug, Default)]
pub struct MemoryProgressLog {
    messages: Mutex<Vec<String>>,
}

impl MemoryProgressLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl ProgressLog for MemoryProgressLog {
    fn record(&self, message: &str) {
        info!("{}", message);
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

//! Date-stamped output locations.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::constants::{CSV_FILE_NAME, DB_FILE_NAME, LOG_FILE_NAME, RUN_DIR_DATE_FORMAT};
use crate::config::Config;
use crate::error_handling::StorageError;

/// Where one run writes its CSV, database and progress log.
///
/// Resolved once from the configuration and an explicit run date:
///
/// ```text
/// <output_dir>/<dd-mm-yy>/Largest_banks_data.csv
/// <output_dir>/<dd-mm-yy>/Banks.db
/// <log_dir>/<dd-mm-yy>/code_log.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    /// Directory holding the CSV and database
    pub target_dir: PathBuf,
    /// CSV output file
    pub csv_path: PathBuf,
    /// SQLite database file
    pub db_path: PathBuf,
    /// Directory holding the progress log
    pub log_dir: PathBuf,
    /// Progress log file
    pub log_path: PathBuf,
}

impl RunPaths {
    /// Resolves the run's paths for `date`.
    pub fn for_date(config: &Config, date: NaiveDate) -> Self {
        let stamp = date.format(RUN_DIR_DATE_FORMAT).to_string();
        let target_dir = config.output_dir.join(&stamp);
        let log_dir = config.log_dir.join(&stamp);
        Self {
            csv_path: target_dir.join(CSV_FILE_NAME),
            db_path: target_dir.join(DB_FILE_NAME),
            log_path: log_dir.join(LOG_FILE_NAME),
            target_dir,
            log_dir,
        }
    }

    /// Creates the output directory if needed.
    pub fn ensure_output_dir(&self) -> Result<(), StorageError> {
        create_dir(&self.target_dir)
    }

    /// Creates the log directory if needed.
    pub fn ensure_log_dir(&self) -> Result<(), StorageError> {
        create_dir(&self.log_dir)
    }
}

fn create_dir(dir: &Path) -> Result<(), StorageError> {
    std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

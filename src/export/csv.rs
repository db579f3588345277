//! CSV sink.
//!
//! Writes one header row and one row per record, columns
//! `Name, MC_USD_Billion, MC_EUR_Billion, MC_GBP_Billion, MC_INR_Billion`.

use std::io::Write;
use std::path::Path;

use csv::Writer;
use log::info;
use tempfile::NamedTempFile;

use crate::error_handling::StorageError;
use crate::models::{ConvertedRecord, COLUMN_NAMES};

/// Writes `records` to `csv_path`, replacing any existing file.
///
/// Rows go to a temporary file in the same directory which is renamed over
/// `csv_path` only after every row is flushed; on failure the previous file
/// (if any) is left as it was.
///
/// # Returns
///
/// The number of data rows written.
pub fn load_to_csv(records: &[ConvertedRecord], csv_path: &Path) -> Result<usize, StorageError> {
    let io_error = |source: std::io::Error| StorageError::Io {
        path: csv_path.to_path_buf(),
        source,
    };
    let dir = match csv_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let staging = NamedTempFile::new_in(dir).map_err(io_error)?;
    let mut writer = Writer::from_writer(staging);
    write_records(&mut writer, records)?;
    let staging = writer
        .into_inner()
        .map_err(|e| io_error(e.into_error()))?;
    staging.as_file().sync_all().map_err(io_error)?;
    staging
        .persist(csv_path)
        .map_err(|e| io_error(e.error))?;

    info!("Wrote {} rows to {}", records.len(), csv_path.display());
    Ok(records.len())
}

/// Serializes header and records to any writer.
pub fn write_records<W: Write>(
    writer: &mut Writer<W>,
    records: &[ConvertedRecord],
) -> Result<(), StorageError> {
    writer.write_record(COLUMN_NAMES)?;
    for record in records {
        writer.write_record([
            record.name.clone(),
            record.market_cap_usd.to_string(),
            record.market_cap_eur.to_string(),
            record.market_cap_gbp.to_string(),
            record.market_cap_inr.to_string(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

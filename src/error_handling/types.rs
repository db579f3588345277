//! Error type definitions.
//!
//! Fatal errors (configuration, extraction, storage) propagate to the caller
//! and end the run. Row faults are the only non-fatal kind: the extractor logs
//! them and moves on to the next row.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use rust_decimal::Decimal;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::rates::Currency;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid or missing run configuration.
///
/// Raised before any network or storage work starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The exchange-rate file could not be opened or read.
    #[error("Cannot read exchange-rate file {}: {source}", path.display())]
    RateFileUnreadable {
        /// Rate file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The exchange-rate file is not a `Currency,Rate` table.
    #[error("Malformed exchange-rate file {}: {detail}", path.display())]
    RateFileMalformed {
        /// Rate file path
        path: PathBuf,
        /// What was wrong with it
        detail: String,
    },

    /// A required currency has no rate.
    #[error("No exchange rate for {0}")]
    MissingRate(Currency),

    /// A rate that is not a positive decimal.
    #[error("Invalid exchange rate for {currency}: '{value}'")]
    InvalidRate {
        /// Currency the rate belongs to
        currency: Currency,
        /// Raw rate text
        value: String,
    },

    /// The same currency appears twice in the rate file.
    #[error("Duplicate exchange rate for {0}")]
    DuplicateRate(Currency),

    /// The source URL does not parse or is not HTTP(S).
    #[error("Invalid source URL '{url}': {detail}")]
    InvalidUrl {
        /// URL as configured
        url: String,
        /// What was wrong with it
        detail: String,
    },

    /// Table name is not a plain SQL identifier.
    #[error("Invalid table name '{0}': expected letters, digits and underscores")]
    InvalidTableName(String),

    /// The table selector is not valid CSS.
    #[error("Invalid table selector '{selector}': {detail}")]
    InvalidSelector {
        /// Selector text as configured
        selector: String,
        /// Parser message
        detail: String,
    },

    /// Column indices that cannot describe a bank row.
    #[error("Invalid table layout: {0}")]
    InvalidLayout(String),

    /// Request timeout of zero seconds.
    #[error("timeout_seconds must be greater than 0")]
    ZeroTimeout,
}

/// Structural extraction failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ExtractErrorKind {
    /// Transport failure, timeout or non-success HTTP status.
    Network,
    /// The page has no table matching the selector.
    TableNotFound,
}

impl ExtractErrorKind {
    /// Returns a human-readable label for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractErrorKind::Network => "network error",
            ExtractErrorKind::TableNotFound => "table not found",
        }
    }
}

impl std::fmt::Display for ExtractErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extraction failure that aborts the run. No partial record set is returned.
#[derive(Error, Debug)]
#[error("Extraction failed ({kind}): {detail}")]
pub struct ExtractError {
    /// Failure category
    pub kind: ExtractErrorKind,
    /// Human-readable detail
    pub detail: String,
    timed_out: bool,
}

impl ExtractError {
    /// Builds a network error from a reqwest failure, remembering whether it was a timeout.
    pub fn network(error: &ReqwestError) -> Self {
        Self {
            kind: ExtractErrorKind::Network,
            detail: error.to_string(),
            timed_out: error.is_timeout(),
        }
    }

    /// Builds a `TableNotFound` error for the given selector.
    pub fn table_not_found(selector: &str) -> Self {
        Self {
            kind: ExtractErrorKind::TableNotFound,
            detail: format!("no element matches '{selector}'"),
            timed_out: false,
        }
    }

    /// Whether the request exceeded the configured timeout.
    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

/// Why a single table row was dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowFault {
    /// Not enough `td` cells to reach the name and market-cap columns.
    #[error("row has {found} data cells, need at least {needed}")]
    TooFewCells {
        /// Cells present
        found: usize,
        /// Cells required
        needed: usize,
    },

    /// The name cell is blank.
    #[error("bank name is empty")]
    EmptyName,

    /// The market-cap cell is not a number.
    #[error("market cap '{0}' is not a decimal number")]
    InvalidMarketCap(String),

    /// The market-cap cell is negative.
    #[error("market cap '{0}' is negative")]
    NegativeMarketCap(String),
}

/// Failure converting extracted records into the target currencies.
#[derive(Error, Debug)]
pub enum TransformError {
    /// A required rate is missing.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The converted amount does not fit in a decimal.
    #[error("Market cap {amount} of '{name}' is too large to convert into {currency}")]
    Overflow {
        /// Bank whose market cap overflowed
        name: String,
        /// USD market cap as extracted
        amount: Decimal,
        /// Target currency
        currency: Currency,
    },
}

/// Error types for sink writes and queries.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem failure on the given path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// A statement passed to the query runner that could modify data.
    #[error("Only SELECT/WITH statements may be run as queries: '{0}'")]
    ReadOnlyViolation(String),
}

/// Any fatal failure of a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Bad configuration or rate file.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Page fetch or table lookup failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Currency conversion failed.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// CSV or database write failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Resource setup failed.
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_extract_error_kind_as_str() {
        assert_eq!(ExtractErrorKind::Network.as_str(), "network error");
        assert_eq!(ExtractErrorKind::TableNotFound.as_str(), "table not found");
    }

    #[test]
    fn test_all_extract_error_kinds_have_string_representation() {
        for kind in ExtractErrorKind::iter() {
            assert!(!kind.as_str().is_empty(), "{:?} should have a label", kind);
        }
    }

    #[test]
    fn test_table_not_found_message_names_selector() {
        let err = ExtractError::table_not_found("table.wikitable");
        assert_eq!(err.kind, ExtractErrorKind::TableNotFound);
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("table.wikitable"));
    }

    #[test]
    fn test_row_fault_messages() {
        assert_eq!(
            RowFault::TooFewCells {
                found: 1,
                needed: 3
            }
            .to_string(),
            "row has 1 data cells, need at least 3"
        );
        assert_eq!(
            RowFault::InvalidMarketCap("n/a".into()).to_string(),
            "market cap 'n/a' is not a decimal number"
        );
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: PipelineError = ConfigError::MissingRate(Currency::Gbp).into();
        assert_eq!(err.to_string(), "No exchange rate for GBP");
    }
}

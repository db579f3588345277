//! banks_etl library: largest-banks ETL pipeline
//!
//! This library extracts the ranking table of the world's largest banks from
//! a web page, converts each market cap from USD into EUR, GBP and INR using a
//! local exchange-rate file, and loads the result into a CSV file and a
//! SQLite table, replacing whatever a previous run left there.
//!
//! # Example
//!
//! ```no_run
//! use banks_etl::{run_pipeline, Config, MemoryProgressLog, RunPaths};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     timeout_seconds: 10,
//!     ..Default::default()
//! };
//! let paths = RunPaths::for_date(&config, chrono::Local::now().date_naive());
//! let progress = MemoryProgressLog::new();
//!
//! let report = run_pipeline(&config, &paths, &progress).await?;
//! println!("Loaded {} banks into {}", report.records_loaded, report.db_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
mod error_handling;
pub mod export;
mod fetch;
pub mod initialization;
mod models;
mod parse;
mod rates;
pub mod storage;
mod transform;
mod utils;

// Re-export public API
pub use app::{format_progress_line, FileProgressLog, MemoryProgressLog, ProgressLog};
pub use config::{Config, LogFormat, LogLevel, RunPaths};
pub use error_handling::{
    ConfigError, ExtractError, ExtractErrorKind, InitializationError, PipelineError, RowFault,
    StorageError, TransformError,
};
pub use export::load_to_csv;
pub use fetch::Extractor;
pub use models::{BankRecord, ConvertedRecord, RecordSet, COLUMN_NAMES};
pub use parse::{parse_bank_table, parse_market_cap, SkippedRow, TableExtraction, TableLayout};
pub use rates::{Currency, RateTable};
pub use run::{run_pipeline, PipelineReport, VerificationQuery};
pub use storage::{load_to_db, run_query, QueryResult, QueryValue};
pub use transform::{convert, transform};

// Internal run module (contains the pipeline orchestration)
mod run {
    use std::path::PathBuf;
    use std::time::Instant;

    use log::info;
    use sqlx::SqlitePool;

    use crate::app::ProgressLog;
    use crate::config::{Config, RunPaths};
    use crate::error_handling::PipelineError;
    use crate::export::load_to_csv;
    use crate::fetch::Extractor;
    use crate::models::ConvertedRecord;
    use crate::rates::RateTable;
    use crate::storage::{init_db_pool_with_path, load_to_db, run_query, QueryResult};
    use crate::transform::transform;

    /// One verification query and its result.
    #[derive(Debug, Clone)]
    pub struct VerificationQuery {
        /// Statement as executed
        pub sql: String,
        /// Rows returned
        pub result: QueryResult,
    }

    /// Results of a pipeline run.
    #[derive(Debug, Clone)]
    pub struct PipelineReport {
        /// Number of records written to both sinks
        pub records_loaded: usize,
        /// CSV file written
        pub csv_path: PathBuf,
        /// SQLite database written
        pub db_path: PathBuf,
        /// Table replaced in the database
        pub table_name: String,
        /// Verification query results, in execution order
        pub verification: Vec<VerificationQuery>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the whole pipeline once.
    ///
    /// Strictly sequential: rate table, extract, transform, CSV, database,
    /// verification queries. The database connection is closed on every exit
    /// path once it has been opened. Any failure is also recorded to
    /// `progress` before it is returned.
    ///
    /// # Errors
    ///
    /// - `PipelineError::Config` for invalid settings or rate file, before any
    ///   request is made
    /// - `PipelineError::Extract` when the page cannot be fetched or has no
    ///   matching table; no sink is touched in that case
    /// - `PipelineError::Transform` when a market cap cannot be converted
    /// - `PipelineError::Storage` when writing the CSV or the database fails
    pub async fn run_pipeline(
        config: &Config,
        paths: &RunPaths,
        progress: &dyn ProgressLog,
    ) -> Result<PipelineReport, PipelineError> {
        let result = run_stages(config, paths, progress).await;
        if let Err(e) = &result {
            progress.record(&format!("ETL process failed: {e}"));
        }
        result
    }

    async fn run_stages(
        config: &Config,
        paths: &RunPaths,
        progress: &dyn ProgressLog,
    ) -> Result<PipelineReport, PipelineError> {
        let start_time = Instant::now();
        config.validate()?;
        let rates = RateTable::load(&config.rates_path)?;
        let extractor = Extractor::new(config)?;
        progress.record("Preliminaries complete. Initiating ETL process");

        let records = extractor.extract(&config.url, progress).await?;
        progress.record("Data extraction complete. Initiating Transformation process");

        let converted = transform(&records, &rates, progress)?;
        progress.record("Data transformation complete. Initiating Loading process");

        paths.ensure_output_dir()?;
        load_to_csv(&converted, &paths.csv_path)?;
        progress.record("Data saved to CSV file");

        let pool = init_db_pool_with_path(&paths.db_path).await?;
        progress.record("SQL Connection initiated");
        let outcome = load_and_verify(config, paths, &converted, &pool, progress).await;
        pool.close().await;
        progress.record("Server Connection closed");
        let verification = outcome?;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!(
            "Loaded {} records in {:.2}s",
            converted.len(),
            elapsed_seconds
        );
        Ok(PipelineReport {
            records_loaded: converted.len(),
            csv_path: paths.csv_path.clone(),
            db_path: paths.db_path.clone(),
            table_name: config.table_name.clone(),
            verification,
            elapsed_seconds,
        })
    }

    async fn load_and_verify(
        config: &Config,
        paths: &RunPaths,
        converted: &[ConvertedRecord],
        pool: &SqlitePool,
        progress: &dyn ProgressLog,
    ) -> Result<Vec<VerificationQuery>, PipelineError> {
        load_to_db(converted, pool, &config.table_name).await?;
        progress.record(&format!(
            "Loaded transformed data into table {} at {}",
            config.table_name,
            paths.db_path.display()
        ));

        let mut verification = Vec::new();
        if !config.skip_verification {
            progress.record("Executing verification queries");
            for sql in config.verification_queries() {
                let result = run_query(pool, &sql).await?;
                verification.push(VerificationQuery { sql, result });
            }
        }
        progress.record("Process Complete");
        Ok(verification)
    }
}

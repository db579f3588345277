//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `banks_etl` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Date-stamped path setup
//! - Printing verification query results
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use banks_etl::initialization::init_logger_with;
use banks_etl::{run_pipeline, Config, FileProgressLog, RunPaths};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let paths = RunPaths::for_date(&config, chrono::Local::now().date_naive());
    paths
        .ensure_log_dir()
        .context("Failed to create log directory")?;
    let progress = FileProgressLog::new(&paths.log_path);

    match run_pipeline(&config, &paths, &progress).await {
        Ok(report) => {
            for query in &report.verification {
                println!("Query: {}", query.sql);
                println!();
                println!("{}", query.result);
            }
            println!(
                "Loaded {} bank{} in {:.1}s",
                report.records_loaded,
                if report.records_loaded == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            println!("CSV saved in {}", report.csv_path.display());
            println!(
                "Table {} saved in {}",
                report.table_name,
                report.db_path.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("banks_etl error: {:#}", anyhow::Error::from(e));
            process::exit(1);
        }
    }
}

// Shared test helpers for pipeline integration tests.
//
// Each test gets its own scratch directory holding the rate file, outputs and logs.

use std::path::PathBuf;

use banks_etl::{Config, LogFormat, LogLevel, RunPaths};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Ranking page with a header row and three well-formed banks.
#[allow(dead_code)] // Used by other test files
pub const THREE_BANKS_HTML: &str = r#"<!DOCTYPE html>
<html><head><title>List of largest banks</title></head>
<body>
  <table class="wikitable sortable">
    <tbody>
      <tr><th>Rank</th><th>Bank name</th><th>Market cap<br>(US$ billion)</th></tr>
      <tr><td>1</td><td><span class="flagicon"><img alt="" src="flag.png"></span> <a href="/wiki/Bank_A">Bank A</a></td><td>100.00
</td></tr>
      <tr><td>2</td><td><a href="/wiki/Bank_B">Bank B</a></td><td>50.5
</td></tr>
      <tr><td>3</td><td><a href="/wiki/Bank_C">Bank C</a></td><td>75.25
</td></tr>
    </tbody>
  </table>
</body></html>"#;

/// Rates used across the integration tests.
#[allow(dead_code)] // Used by other test files
pub const RATES_CSV: &str = "Currency,Rate\nEUR,0.93\nGBP,0.8\nINR,83.0\n";

/// Fixed run date so paths are predictable.
pub fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 1).expect("valid date")
}

/// Scratch directory with a rate file, plus a config pointing all outputs into it.
pub struct TestRun {
    /// Keeps the directory alive for the duration of the test
    #[allow(dead_code)]
    pub dir: TempDir,
    pub config: Config,
    pub paths: RunPaths,
}

/// Creates a scratch run targeting `url`, with `rates` as the rate file contents.
pub fn create_test_run(url: String, rates: &str) -> TestRun {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let rates_path: PathBuf = dir.path().join("exchange_rate.csv");
    std::fs::write(&rates_path, rates).expect("Failed to write rate file");

    let config = Config {
        url,
        rates_path,
        output_dir: dir.path().join("prepared_data"),
        log_dir: dir.path().join("log_data"),
        timeout_seconds: 5,
        user_agent: "banks_etl_test/1.0".to_string(),
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        ..Default::default()
    };
    let paths = RunPaths::for_date(&config, run_date());
    TestRun { dir, config, paths }
}

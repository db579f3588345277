//! Configuration constants.
//!
//! Defaults for the run configuration and the fixed names of the run's
//! output files.

/// Archived copy of the Wikipedia "List of largest banks" page.
pub const DATA_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";

/// Default exchange-rate file.
pub const RATES_CSV_PATH: &str = "rates_data/exchange_rate.csv";

/// Root of the date-stamped output directories.
pub const OUTPUT_DIR: &str = "prepared_data";

/// Root of the date-stamped log directories.
pub const LOG_DIR: &str = "log_data";

/// Table the records are loaded into.
pub const TABLE_NAME: &str = "Largest_banks";

/// CSS selector of the ranking table.
pub const TABLE_SELECTOR: &str = "table.wikitable";

/// Zero-based `td` index of the bank name.
pub const NAME_COLUMN: usize = 1;

/// Zero-based `td` index of the market cap in billions of USD.
pub const MARKET_CAP_COLUMN: usize = 2;

/// Largest accepted column index for the name and market cap.
pub const MAX_COLUMN_INDEX: usize = 255;

/// Page request timeout in seconds.
pub const FETCH_TIMEOUT_SECS: u64 = 5;

/// CSV file name inside the date-stamped output directory.
pub const CSV_FILE_NAME: &str = "Largest_banks_data.csv";

/// SQLite file name inside the date-stamped output directory.
pub const DB_FILE_NAME: &str = "Banks.db";

/// Progress log name inside the date-stamped log directory.
pub const LOG_FILE_NAME: &str = "code_log.txt";

/// Date layout of the run directories, e.g. `08-09-23`.
pub const RUN_DIR_DATE_FORMAT: &str = "%d-%m-%y";

/// Default User-Agent string for HTTP requests.
///
/// Wikipedia and the Wayback Machine reject requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("banks_etl/", env!("CARGO_PKG_VERSION"));

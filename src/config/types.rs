//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::config::constants::*;
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Run configuration.
///
/// Parsed from the command line by the binary, or built programmatically by
/// library users. Constructed once per run and passed to every stage.
///
/// # Examples
///
/// ```no_run
/// use banks_etl::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     rates_path: PathBuf::from("rates/latest.csv"),
///     timeout_seconds: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "banks_etl",
    about = "Extracts the largest-banks table, converts market caps and loads them into CSV and SQLite."
)]
pub struct Config {
    /// Page containing the bank ranking table
    #[arg(long, default_value = DATA_URL)]
    pub url: String,

    /// Exchange-rate CSV file (Currency,Rate)
    #[arg(long, value_parser, default_value = RATES_CSV_PATH)]
    pub rates_path: PathBuf,

    /// Root directory for the date-stamped CSV and database
    #[arg(long, value_parser, default_value = OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Root directory for the date-stamped progress log
    #[arg(long, value_parser, default_value = LOG_DIR)]
    pub log_dir: PathBuf,

    /// Database table to replace with the results
    #[arg(long, default_value = TABLE_NAME)]
    pub table_name: String,

    /// CSS selector of the ranking table (first match is used)
    #[arg(long, default_value = TABLE_SELECTOR)]
    pub table_selector: String,

    /// Zero-based data-cell index of the bank name
    #[arg(long, default_value_t = NAME_COLUMN)]
    pub name_column: usize,

    /// Zero-based data-cell index of the USD market cap
    #[arg(long, default_value_t = MARKET_CAP_COLUMN)]
    pub market_cap_column: usize,

    /// Page request timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Skip the verification queries after loading
    #[arg(long)]
    pub skip_verification: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DATA_URL.to_string(),
            rates_path: PathBuf::from(RATES_CSV_PATH),
            output_dir: PathBuf::from(OUTPUT_DIR),
            log_dir: PathBuf::from(LOG_DIR),
            table_name: TABLE_NAME.to_string(),
            table_selector: TABLE_SELECTOR.to_string(),
            name_column: NAME_COLUMN,
            market_cap_column: MARKET_CAP_COLUMN,
            timeout_seconds: FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            skip_verification: false,
        }
    }
}

impl Config {
    /// Checks the settings that can be validated without I/O.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl`, `ConfigError::InvalidTableName`,
    /// `ConfigError::ZeroTimeout` or `ConfigError::InvalidLayout`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.url)?;
        validate_table_name(&self.table_name)?;
        if self.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        for (label, column) in [
            ("name", self.name_column),
            ("market cap", self.market_cap_column),
        ] {
            if column > MAX_COLUMN_INDEX {
                return Err(ConfigError::InvalidLayout(format!(
                    "{label} column {column} exceeds the maximum of {MAX_COLUMN_INDEX}"
                )));
            }
        }
        if self.name_column == self.market_cap_column {
            return Err(ConfigError::InvalidLayout(format!(
                "name and market cap both read from column {}",
                self.name_column
            )));
        }
        Ok(())
    }

    /// The verification queries run after loading, in order.
    pub fn verification_queries(&self) -> Vec<String> {
        let table = &self.table_name;
        vec![
            format!("SELECT * FROM {table}"),
            format!("SELECT AVG(MC_GBP_Billion) FROM {table}"),
            format!("SELECT Name FROM {table} LIMIT 5"),
        ]
    }
}

/// Accepts absolute `http` and `https` URLs.
pub fn validate_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |detail: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        detail,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// Accepts plain SQL identifiers only: a letter or underscore, then letters,
/// digits or underscores.
pub fn validate_table_name(name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidTableName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_cli_defaults() {
        let parsed = Config::parse_from(["banks_etl"]);
        let default = Config::default();
        assert_eq!(parsed.url, default.url);
        assert_eq!(parsed.rates_path, default.rates_path);
        assert_eq!(parsed.table_name, default.table_name);
        assert_eq!(parsed.name_column, default.name_column);
        assert_eq!(parsed.market_cap_column, default.market_cap_column);
        assert_eq!(parsed.timeout_seconds, 5);
        assert!(!parsed.skip_verification);
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::parse_from([
            "banks_etl",
            "--url",
            "http://localhost/banks",
            "--table-name",
            "Banks_2024",
            "--timeout-seconds",
            "2",
            "--skip-verification",
        ]);
        assert_eq!(config.url, "http://localhost/banks");
        assert_eq!(config.table_name, "Banks_2024");
        assert_eq!(config.timeout_seconds, 2);
        assert!(config.skip_verification);
    }

    #[test]
    fn test_table_name_validation() {
        assert!(validate_table_name("Largest_banks").is_ok());
        assert!(validate_table_name("_t1").is_ok());
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("1banks").is_err());
        assert!(validate_table_name("banks; DROP TABLE x").is_err());
        assert!(validate_table_name("banks\"").is_err());
    }

    #[test]
    fn test_url_validation() {
        assert!(validate_url("https://en.wikipedia.org/wiki/List_of_largest_banks").is_ok());
        assert!(validate_url("http://127.0.0.1:8080/banks").is_ok());
        assert!(matches!(
            validate_url("ftp://example.com/banks"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_same_column_for_name_and_cap_is_invalid() {
        let config = Config {
            name_column: 2,
            market_cap_column: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_column_beyond_maximum_is_invalid() {
        let config = Config {
            market_cap_column: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLayout(ref msg)) if msg.contains("market cap column")
        ));

        let config = Config {
            name_column: MAX_COLUMN_INDEX + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            market_cap_column: MAX_COLUMN_INDEX,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_verification_queries_use_table_name() {
        let config = Config::default();
        assert_eq!(
            config.verification_queries(),
            [
                "SELECT * FROM Largest_banks",
                "SELECT AVG(MC_GBP_Billion) FROM Largest_banks",
                "SELECT Name FROM Largest_banks LIMIT 5",
            ]
        );
    }
}

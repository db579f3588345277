//! Exchange-rate table.
//!
//! Rates are read once per run from a `Currency,Rate` CSV file and never
//! change afterwards. Each rate is a USD multiplier: `amount_usd * rate`
//! gives the amount in that currency.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};
use rust_decimal::Decimal;
use serde::Deserialize;
use strum_macros::EnumIter;

use crate::error_handling::ConfigError;

/// Currencies the pipeline converts market caps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Currency {
    /// Euro
    Eur,
    /// Pound sterling
    Gbp,
    /// Indian rupee
    Inr,
}

impl Currency {
    /// ISO 4217 code as it appears in the rate file.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
        }
    }

    /// Matches a rate-file code, ignoring case and surrounding whitespace.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "EUR" => Some(Currency::Eur),
            "GBP" => Some(Currency::Gbp),
            "INR" => Some(Currency::Inr),
            _ => None,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Rate")]
    rate: String,
}

/// Immutable mapping from currency to its USD multiplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: HashMap<Currency, Decimal>,
}

impl RateTable {
    /// Builds a table from already-parsed pairs.
    ///
    /// Does not require every currency to be present; `transform` reports
    /// the missing one. Rates must still be positive.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Currency, Decimal)>,
    {
        let mut rates = HashMap::new();
        for (currency, rate) in pairs {
            if rate <= Decimal::ZERO {
                return Err(ConfigError::InvalidRate {
                    currency,
                    value: rate.to_string(),
                });
            }
            if rates.insert(currency, rate).is_some() {
                return Err(ConfigError::DuplicateRate(currency));
            }
        }
        Ok(Self { rates })
    }

    /// Loads and validates the rate file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file is missing or unreadable, is not a
    /// `Currency,Rate` table, holds a non-positive rate, or lacks any of
    /// EUR, GBP or INR.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::RateFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, path)?;
        info!("Loaded {} exchange rates from {}", table.rates.len(), path.display());
        Ok(table)
    }

    /// Parses a rate table from any reader. `origin` is only used in error messages.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, ConfigError> {
        let malformed = |detail: String| ConfigError::RateFileMalformed {
            path: origin.to_path_buf(),
            detail,
        };

        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut pairs = Vec::new();
        for row in csv_reader.deserialize::<RateRow>() {
            let row = row.map_err(|e| malformed(e.to_string()))?;
            let Some(currency) = Currency::from_code(&row.currency) else {
                debug!("Ignoring rate for unsupported currency '{}'", row.currency);
                continue;
            };
            let rate = Decimal::from_str(&row.rate).map_err(|_| ConfigError::InvalidRate {
                currency,
                value: row.rate.clone(),
            })?;
            pairs.push((currency, rate));
        }

        let table = Self::from_pairs(pairs)?;
        table.require_all()?;
        Ok(table)
    }

    /// Rate for `currency`, or `ConfigError::MissingRate`.
    pub fn get(&self, currency: Currency) -> Result<Decimal, ConfigError> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or(ConfigError::MissingRate(currency))
    }

    fn require_all(&self) -> Result<(), ConfigError> {
        use strum::IntoEnumIterator;
        for currency in Currency::iter() {
            self.get(currency)?;
        }
        Ok(())
    }
}

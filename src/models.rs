//! Pipeline record types.

use rust_decimal::Decimal;

/// One row of the ranking table: a bank and its market cap in billions of USD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankRecord {
    /// Bank name as shown in the table
    pub name: String,
    /// Market capitalization, billions of USD
    pub market_cap_usd: Decimal,
}

/// Records in table row order.
pub type RecordSet = Vec<BankRecord>;

/// A bank record with its market cap converted into EUR, GBP and INR.
///
/// Derived columns are rounded half-to-even to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedRecord {
    /// Bank name as shown in the table
    pub name: String,
    /// Market capitalization, billions of USD (as extracted)
    pub market_cap_usd: Decimal,
    /// Market capitalization, billions of EUR
    pub market_cap_eur: Decimal,
    /// Market capitalization, billions of GBP
    pub market_cap_gbp: Decimal,
    /// Market capitalization, billions of INR
    pub market_cap_inr: Decimal,
}

/// Column names shared by the CSV header and the database table.
pub const COLUMN_NAMES: [&str; 5] = [
    "Name",
    "MC_USD_Billion",
    "MC_EUR_Billion",
    "MC_GBP_Billion",
    "MC_INR_Billion",
];

//! HTML parsing module.
//!
//! Turns the fetched ranking page into bank records.

mod table;

pub use table::{parse_bank_table, parse_market_cap, SkippedRow, TableExtraction, TableLayout};

//! Shared test helpers for storage module tests.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::models::ConvertedRecord;
use crate::storage::init_memory_pool;

/// Creates a single-connection in-memory database.
pub async fn create_test_pool() -> SqlitePool {
    init_memory_pool()
        .await
        .expect("Failed to create test database pool")
}

/// Builds a converted record from decimal strings.
pub fn converted(name: &str, usd: &str, eur: &str, gbp: &str, inr: &str) -> ConvertedRecord {
    let dec = |s: &str| Decimal::from_str(s).expect("valid decimal in test");
    ConvertedRecord {
        name: name.to_string(),
        market_cap_usd: dec(usd),
        market_cap_eur: dec(eur),
        market_cap_gbp: dec(gbp),
        market_cap_inr: dec(inr),
    }
}

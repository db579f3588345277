//! Loading converted records into SQLite.

use log::info;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::config::validate_table_name;
use crate::error_handling::{PipelineError, StorageError};
use crate::models::{ConvertedRecord, COLUMN_NAMES};

/// Replaces `table_name` with `records`.
///
/// Drop, create and every insert run in one transaction: either the new
/// table is committed in full or the previous contents are left untouched.
/// Market caps are stored as `REAL`; no index column is written.
///
/// # Errors
///
/// `PipelineError::Config` for an invalid table name, `PipelineError::Storage`
/// for SQL failures.
pub async fn load_to_db(
    records: &[ConvertedRecord],
    pool: &SqlitePool,
    table_name: &str,
) -> Result<(), PipelineError> {
    validate_table_name(table_name)?;
    replace_table(records, pool, table_name).await?;
    info!("Loaded {} rows into table {}", records.len(), table_name);
    Ok(())
}

async fn replace_table(
    records: &[ConvertedRecord],
    pool: &SqlitePool,
    table_name: &str,
) -> Result<(), StorageError> {
    let [name, usd, eur, gbp, inr] = COLUMN_NAMES;
    let mut tx = pool.begin().await?;

    sqlx::query(&format!("DROP TABLE IF EXISTS \"{table_name}\""))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&format!(
        "CREATE TABLE \"{table_name}\" (
            {name} TEXT NOT NULL,
            {usd} REAL NOT NULL,
            {eur} REAL NOT NULL,
            {gbp} REAL NOT NULL,
            {inr} REAL NOT NULL
        )"
    ))
    .execute(&mut *tx)
    .await?;

    let insert =
        format!("INSERT INTO \"{table_name}\" ({name}, {usd}, {eur}, {gbp}, {inr}) VALUES (?, ?, ?, ?, ?)");
    for record in records {
        sqlx::query(&insert)
            .bind(&record.name)
            .bind(to_real(record.market_cap_usd))
            .bind(to_real(record.market_cap_eur))
            .bind(to_real(record.market_cap_gbp))
            .bind(to_real(record.market_cap_inr))
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

// Every Decimal in market-cap range is representable as f64 (possibly rounded).
fn to_real(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ConfigError;
    use crate::storage::test_helpers::{converted, create_test_pool};
    use sqlx::Row;

    async fn dump(pool: &SqlitePool) -> Vec<(String, f64, f64, f64, f64)> {
        sqlx::query("SELECT * FROM Largest_banks")
            .fetch_all(pool)
            .await
            .unwrap()
            .iter()
            .map(|r| {
                (
                    r.get::<String, _>("Name"),
                    r.get::<f64, _>("MC_USD_Billion"),
                    r.get::<f64, _>("MC_EUR_Billion"),
                    r.get::<f64, _>("MC_GBP_Billion"),
                    r.get::<f64, _>("MC_INR_Billion"),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_loads_all_records_in_order() {
        let pool = create_test_pool().await;
        let records = vec![
            converted("Bank A", "100.00", "93.00", "80.00", "8300.00"),
            converted("Bank B", "50.5", "46.96", "40.40", "4191.50"),
        ];
        load_to_db(&records, &pool, "Largest_banks").await.unwrap();

        let rows = dump(&pool).await;
        assert_eq!(
            rows,
            [
                ("Bank A".to_string(), 100.0, 93.0, 80.0, 8300.0),
                ("Bank B".to_string(), 50.5, 46.96, 40.4, 4191.5),
            ]
        );
    }

    #[tokio::test]
    async fn test_reload_replaces_instead_of_appending() {
        let pool = create_test_pool().await;
        let records = vec![converted("Bank A", "100.00", "93.00", "80.00", "8300.00")];
        load_to_db(&records, &pool, "Largest_banks").await.unwrap();
        let first = dump(&pool).await;
        load_to_db(&records, &pool, "Largest_banks").await.unwrap();
        assert_eq!(dump(&pool).await, first);

        load_to_db(&[], &pool, "Largest_banks").await.unwrap();
        assert!(dump(&pool).await.is_empty());
    }

    #[tokio::test]
    async fn test_table_has_only_record_columns() {
        let pool = create_test_pool().await;
        load_to_db(&[], &pool, "Largest_banks").await.unwrap();
        let columns: Vec<String> = sqlx::query("SELECT name FROM pragma_table_info('Largest_banks')")
            .fetch_all(&pool)
            .await
            .unwrap()
            .iter()
            .map(|r| r.get::<String, _>(0))
            .collect();
        assert_eq!(columns, COLUMN_NAMES);
    }

    #[tokio::test]
    async fn test_invalid_table_name_is_rejected_before_sql() {
        let pool = create_test_pool().await;
        let err = load_to_db(&[], &pool, "x\"; DROP TABLE y; --").await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Config(ConfigError::InvalidTableName(_))
        ));
    }
}

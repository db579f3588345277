//! Read-only verification queries.
//!
//! Statements must start with `SELECT` or `WITH` and run with SQLite's
//! `query_only` pragma switched on, so every statement in the string,
//! including ones after a `;`, is refused any write.

use std::fmt;

use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};

use crate::error_handling::StorageError;

/// One cell of a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// SQL `NULL`
    Null,
    /// 64-bit integer
    Integer(i64),
    /// Floating point
    Real(f64),
    /// Text
    Text(String),
    /// Binary data, reported by length
    Blob(usize),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Null => f.write_str("NULL"),
            QueryValue::Integer(v) => write!(f, "{v}"),
            QueryValue::Real(v) => write!(f, "{v:?}"),
            QueryValue::Text(v) => f.write_str(v),
            QueryValue::Blob(len) => write!(f, "<{len} bytes>"),
        }
    }
}

/// Tabular query output.
///
/// Column names come from the first row; an empty result has no columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Column names, in select order
    pub columns: Vec<String>,
    /// Rows, each with one value per column
    pub rows: Vec<Vec<QueryValue>>,
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "(no rows)");
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write_line(f, self.columns.iter().map(String::as_str), &widths)?;
        for row in &cells {
            write_line(f, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> fmt::Result {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(f, "{}", line.join("  ").trim_end())
}

/// Runs a read-only statement and collects its rows.
///
/// # Errors
///
/// `StorageError::ReadOnlyViolation` for statements not starting with
/// `SELECT`/`WITH`, `StorageError::SqlError` for anything SQLite rejects,
/// including any attempted write.
pub async fn run_query(pool: &SqlitePool, sql: &str) -> Result<QueryResult, StorageError> {
    ensure_read_only(sql)?;

    let mut conn = pool.acquire().await?;
    sqlx::query("PRAGMA query_only = ON")
        .execute(&mut *conn)
        .await?;
    let fetched = sqlx::query(sql).fetch_all(&mut *conn).await;
    let restored = sqlx::query("PRAGMA query_only = OFF")
        .execute(&mut *conn)
        .await;
    let rows = fetched?;
    restored?;

    let columns: Vec<String> = rows
        .first()
        .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();
    let rows = rows
        .iter()
        .map(decode_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(QueryResult { columns, rows })
}

fn ensure_read_only(sql: &str) -> Result<(), StorageError> {
    let keyword = sql
        .trim_start()
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or("");
    if keyword.eq_ignore_ascii_case("select") || keyword.eq_ignore_ascii_case("with") {
        Ok(())
    } else {
        Err(StorageError::ReadOnlyViolation(sql.trim().to_string()))
    }
}

fn decode_row(row: &SqliteRow) -> Result<Vec<QueryValue>, sqlx::Error> {
    (0..row.len()).map(|i| decode_value(row, i)).collect()
}

// SQLite is dynamically typed: dispatch on the storage class of the value
// itself, not on the declared column type.
fn decode_value(row: &SqliteRow, index: usize) -> Result<QueryValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(QueryValue::Null);
    }
    let type_name = raw.type_info().name().to_string();
    let value = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => QueryValue::Integer(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => QueryValue::Real(row.try_get_unchecked::<f64, _>(index)?),
        "BLOB" => QueryValue::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?.len()),
        _ => QueryValue::Text(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}

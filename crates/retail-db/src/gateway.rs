//! # Query Gateway
//!
//! Untyped access to the database: run a parameterized statement and get
//! strings back. Reports and diagnostics use this; screens with a fixed
//! shape use the typed repositories instead.
//!
//! ## Result Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SELECT productName, COUNT(*) AS orders FROM Orders ...                 │
//! │                                                                         │
//! │  execute           → 3                       (rows affected)            │
//! │  fetch_table       → Table { headers: [productname, orders],            │
//! │                              rows: [[Widget, 12], [Gadget, 4]] }        │
//! │  fetch_rows        → [[Widget, 12], [Gadget, 4]]                        │
//! │  fetch_last_value  → Some("4")               (last column, last row)    │
//! │  count_rows        → 2                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every statement takes its values as bound parameters (`$1`, `$2`, ...).
//! Nothing is ever spliced into SQL text.

use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, AnyPool, Column, Row};
use tracing::debug;

use crate::error::DbResult;

/// Rendering of SQL NULL.
pub const NULL_TEXT: &str = "null";

// =============================================================================
// Parameters
// =============================================================================

/// A value bound to a `$N` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(i64::from(v))
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        SqlParam::Float(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Any, AnyArguments<'q>>,
    params: &'q [SqlParam],
) -> Query<'q, Any, AnyArguments<'q>> {
    for param in params {
        query = match param {
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Float(v) => query.bind(*v),
            SqlParam::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

// =============================================================================
// Table
// =============================================================================

/// A query result rendered to strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Renders one cell. NULL becomes [`NULL_TEXT`].
///
/// The Any driver only knows a handful of value kinds, so each is tried in
/// turn: text, integer, float, boolean.
fn cell_to_string(row: &AnyRow, index: usize) -> String {
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return v.unwrap_or_else(|| NULL_TEXT.to_string());
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return v.map_or_else(|| NULL_TEXT.to_string(), |v| v.to_string());
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return v.map_or_else(|| NULL_TEXT.to_string(), |v| v.to_string());
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(index) {
        return v.map_or_else(|| NULL_TEXT.to_string(), |v| v.to_string());
    }
    NULL_TEXT.to_string()
}

fn row_to_strings(row: &AnyRow) -> Vec<String> {
    (0..row.len()).map(|i| cell_to_string(row, i)).collect()
}

// =============================================================================
// Gateway
// =============================================================================

/// Generic statement execution over the shared pool.
///
/// ## Usage
/// ```rust,ignore
/// let table = db.gateway()
///     .fetch_table("SELECT name FROM Store WHERE managerID = $1", &[7.into()])
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Gateway {
    pool: AnyPool,
}

impl Gateway {
    pub fn new(pool: AnyPool) -> Self {
        Gateway { pool }
    }

    /// Runs a mutating statement.
    ///
    /// ## Returns
    /// Number of rows affected.
    pub async fn execute(&self, sql: &str, params: &[SqlParam]) -> DbResult<u64> {
        debug!(sql, params = params.len(), "execute");

        let result = bind_all(sqlx::query(sql), params)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Runs a query and renders every cell, keeping the column headers.
    pub async fn fetch_table(&self, sql: &str, params: &[SqlParam]) -> DbResult<Table> {
        debug!(sql, params = params.len(), "fetch_table");

        let rows = bind_all(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;

        // Headers come from the first row; an empty result has none
        let headers = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();

        let rows = rows.iter().map(row_to_strings).collect();

        Ok(Table { headers, rows })
    }

    /// Runs a query and returns each row as an ordered list of strings.
    pub async fn fetch_rows(&self, sql: &str, params: &[SqlParam]) -> DbResult<Vec<Vec<String>>> {
        debug!(sql, params = params.len(), "fetch_rows");

        let rows = bind_all(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_strings).collect())
    }

    /// Runs a query and returns the last column of the last row.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - At least one row came back
    /// * `Ok(None)` - The query returned no rows
    pub async fn fetch_last_value(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> DbResult<Option<String>> {
        let rows = self.fetch_rows(sql, params).await?;

        Ok(rows.into_iter().last().and_then(|row| row.into_iter().last()))
    }

    /// Runs a query and returns how many rows it produced.
    pub async fn count_rows(&self, sql: &str, params: &[SqlParam]) -> DbResult<usize> {
        debug!(sql, params = params.len(), "count_rows");

        let rows = bind_all(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Report Repository
//!
//! Popularity reports for managers and admins. Results come back as a
//! [`Table`] from the gateway so the terminal can print them as-is.
//!
//! ## Scope
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportScope::ManagedBy(7)  → only orders at stores WHERE managerID = 7 │
//! │  ReportScope::AllStores     → every order (admins)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::AnyPool;
use tracing::debug;

use crate::error::DbResult;
use crate::gateway::{Gateway, SqlParam, Table};

/// Which orders a report counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// Orders at stores managed by this user.
    ManagedBy(i32),
    /// Orders at every store.
    AllStores,
}

impl ReportScope {
    /// `WHERE` clause and its parameters. The limit always binds last.
    fn filter(&self) -> (&'static str, Vec<SqlParam>) {
        match self {
            ReportScope::ManagedBy(manager_id) => {
                ("WHERE s.managerID = $1", vec![SqlParam::from(*manager_id)])
            }
            ReportScope::AllStores => ("", Vec::new()),
        }
    }
}

/// Repository for aggregate reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    gateway: Gateway,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: AnyPool) -> Self {
        ReportRepository {
            gateway: Gateway::new(pool),
        }
    }

    /// Products with the most orders.
    ///
    /// Columns: `product`, `orders`, `units`. Ties are broken by name.
    pub async fn popular_products(&self, scope: ReportScope, limit: i64) -> DbResult<Table> {
        let (filter, mut params) = scope.filter();
        let limit_at = params.len() + 1;
        params.push(SqlParam::from(limit));

        let sql = format!(
            r#"
            SELECT o.productName AS product,
                   COUNT(*) AS orders,
                   SUM(o.unitsOrdered) AS units
            FROM Orders o
            JOIN Store s ON s.storeID = o.storeID
            {filter}
            GROUP BY o.productName
            ORDER BY COUNT(*) DESC, o.productName
            LIMIT ${limit_at}
            "#
        );

        debug!(?scope, limit, "Popular products report");
        self.gateway.fetch_table(&sql, &params).await
    }

    /// Customers with the most orders. Passwords are never selected.
    ///
    /// Columns: `id`, `name`, `orders`. Ties are broken by user id.
    pub async fn popular_customers(&self, scope: ReportScope, limit: i64) -> DbResult<Table> {
        let (filter, mut params) = scope.filter();
        let limit_at = params.len() + 1;
        params.push(SqlParam::from(limit));

        let sql = format!(
            r#"
            SELECT u.userID AS id,
                   u.name AS name,
                   COUNT(*) AS orders
            FROM Orders o
            JOIN Users u ON u.userID = o.customerID
            JOIN Store s ON s.storeID = o.storeID
            {filter}
            GROUP BY u.userID, u.name
            ORDER BY COUNT(*) DESC, u.userID
            LIMIT ${limit_at}
            "#
        );

        debug!(?scope, limit, "Popular customers report");
        self.gateway.fetch_table(&sql, &params).await
    }
}

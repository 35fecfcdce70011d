//! # Order Repository
//!
//! Placing orders and reading a customer's order history.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place(NewOrder { store 1, Widget, 3 })               │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    SELECT product (store 1, Widget)      → None? NotFound               │
//! │    check_fulfil(3)                       → InsufficientStock?           │
//! │    INSERT INTO Orders ... RETURNING orderNumber                         │
//! │    UPDATE Product SET numberOfUnits = numberOfUnits - 3                 │
//! │      WHERE ... AND numberOfUnits >= 3    → 0 rows? InsufficientStock    │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any error drops the transaction: no order row, stock untouched.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guarded `UPDATE` keeps stock from going negative even if another
//! client sold the same units between the read and the write.

use retail_core::{CoreError, NewOrder, OrderSummary, PlacedOrder, Product};
use sqlx::AnyPool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::product::{select_one_sql, ProductRow};

#[derive(Debug, sqlx::FromRow)]
struct OrderSummaryRow {
    order_number: i64,
    store_id: i32,
    store_name: String,
    product_name: String,
    units_ordered: i32,
    order_time: String,
}

impl From<OrderSummaryRow> for OrderSummary {
    fn from(row: OrderSummaryRow) -> Self {
        OrderSummary {
            order_number: row.order_number,
            store_id: row.store_id,
            store_name: row.store_name,
            product_name: row.product_name,
            units_ordered: row.units_ordered,
            order_time: row.order_time,
        }
    }
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: AnyPool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: AnyPool) -> Self {
        OrderRepository { pool }
    }

    /// Records an order and takes the units out of stock, atomically.
    ///
    /// Quantity and store range are checked by the caller; this method
    /// enforces that the product exists and that stock covers the order.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - The store doesn't carry the product
    /// * `DbError::Rule(CoreError::InsufficientStock)` - Not enough units
    pub async fn place(&self, order: &NewOrder) -> DbResult<PlacedOrder> {
        debug!(
            customer_id = order.customer_id,
            store_id = order.store_id,
            product = %order.product_name,
            units = order.units,
            "Placing order"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let product: Product = sqlx::query_as::<_, ProductRow>(&select_one_sql())
            .bind(order.store_id)
            .bind(order.product_name.as_str())
            .fetch_optional(&mut *tx)
            .await?
            .map(Product::from)
            .ok_or_else(|| {
                DbError::not_found(
                    "Product",
                    format!("{} in store {}", order.product_name, order.store_id),
                )
            })?;

        product.check_fulfil(order.units)?;

        let order_number: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO Orders (customerID, storeID, productName, unitsOrdered, orderTime)
            VALUES ($1, $2, $3, $4, CURRENT_TIMESTAMP)
            RETURNING orderNumber
            "#,
        )
        .bind(order.customer_id)
        .bind(order.store_id)
        .bind(order.product_name.as_str())
        .bind(order.units)
        .fetch_one(&mut *tx)
        .await?;

        let decremented = sqlx::query(
            r#"
            UPDATE Product
            SET numberOfUnits = numberOfUnits - $1
            WHERE storeID = $2 AND productName = $3 AND numberOfUnits >= $1
            "#,
        )
        .bind(order.units)
        .bind(order.store_id)
        .bind(order.product_name.as_str())
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() != 1 {
            // Stock changed since the SELECT above
            return Err(CoreError::InsufficientStock {
                product: product.name,
                available: product.units,
                requested: order.units,
            }
            .into());
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let placed = PlacedOrder {
            order_number,
            remaining_units: product.units_after(order.units),
        };

        info!(
            order_number,
            customer_id = order.customer_id,
            store_id = order.store_id,
            remaining = placed.remaining_units,
            "Order placed"
        );

        Ok(placed)
    }

    /// A customer's most recent orders, newest first.
    pub async fn recent_for_customer(
        &self,
        customer_id: i32,
        limit: i64,
    ) -> DbResult<Vec<OrderSummary>> {
        let rows = sqlx::query_as::<_, OrderSummaryRow>(
            r#"
            SELECT
                o.orderNumber AS order_number,
                o.storeID AS store_id,
                s.name AS store_name,
                o.productName AS product_name,
                o.unitsOrdered AS units_ordered,
                CAST(o.orderTime AS TEXT) AS order_time
            FROM Orders o
            JOIN Store s ON s.storeID = o.storeID
            WHERE o.customerID = $1
            ORDER BY o.orderTime DESC, o.orderNumber DESC
            LIMIT $2
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderSummary::from).collect())
    }

    /// Number of orders a customer has placed.
    pub async fn count_for_customer(&self, customer_id: i32) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Orders WHERE customerID = $1")
            .bind(customer_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

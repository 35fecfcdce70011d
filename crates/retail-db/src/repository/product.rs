//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Listing a store's stock
//! - Stock and price updates, logged in `ProductUpdates`
//!
//! ## Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    update(change, updated_by)                           │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    UPDATE Product SET numberOfUnits, pricePerUnit                       │
//! │      WHERE storeID = $3 AND productName = $4                            │
//! │         │                                                               │
//! │         ├── 0 rows → NotFound, ROLLBACK (tx dropped)                    │
//! │         ▼                                                               │
//! │    INSERT INTO ProductUpdates (managerID, storeID, productName)         │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use retail_core::{Product, ProductChange};
use sqlx::AnyPool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::product_update;

const PRODUCT_COLUMNS: &str = r#"
    storeID AS store_id,
    productName AS name,
    numberOfUnits AS units,
    pricePerUnit AS price_per_unit
"#;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    store_id: i32,
    name: String,
    units: i32,
    price_per_unit: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            store_id: row.store_id,
            name: row.name,
            units: row.units,
            price_per_unit: row.price_per_unit,
        }
    }
}

/// Selects one product by `($1 = storeID, $2 = productName)`.
pub(crate) fn select_one_sql() -> String {
    format!("SELECT {PRODUCT_COLUMNS} FROM Product WHERE storeID = $1 AND productName = $2")
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let stock = repo.list_by_store(1).await?;
/// let widget = repo.get(1, "Widget").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: AnyPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: AnyPool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` if the store already has a product of
    /// that name.
    pub async fn create(&self, product: &Product) -> DbResult<()> {
        debug!(store_id = product.store_id, name = %product.name, "Creating product");

        sqlx::query(
            r#"
            INSERT INTO Product (storeID, productName, numberOfUnits, pricePerUnit)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product.store_id)
        .bind(product.name.as_str())
        .bind(product.units)
        .bind(product.price_per_unit)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets one product of one store.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - The store doesn't carry it
    pub async fn get(&self, store_id: i32, name: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&select_one_sql())
            .bind(store_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Lists a store's products by name.
    pub async fn list_by_store(&self, store_id: i32) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM Product WHERE storeID = $1 ORDER BY productName");

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(store_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(store_id, count = rows.len(), "Fetched products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Lists every product of every store.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM Product ORDER BY storeID, productName");

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Sets a product's unit count and price and logs the change.
    ///
    /// ## Arguments
    /// * `change` - Which product and its new values
    /// * `updated_by` - User id recorded in `ProductUpdates.managerID`
    ///
    /// ## Returns
    /// The new update number.
    pub async fn update(&self, change: &ProductChange, updated_by: i32) -> DbResult<i64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE Product
            SET numberOfUnits = $1, pricePerUnit = $2
            WHERE storeID = $3 AND productName = $4
            "#,
        )
        .bind(change.units)
        .bind(change.price_per_unit)
        .bind(change.store_id)
        .bind(change.product_name.as_str())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                "Product",
                format!("{} in store {}", change.product_name, change.store_id),
            ));
        }

        let update_number =
            product_update::insert(&mut tx, updated_by, change.store_id, &change.product_name)
                .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            store_id = change.store_id,
            product = %change.product_name,
            units = change.units,
            price = change.price_per_unit,
            updated_by,
            update_number,
            "Product updated"
        );

        Ok(update_number)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::testing::{carol, seeded_db};
    use crate::DbError;
    use retail_core::{Product, ProductChange};

    #[tokio::test]
    async fn test_list_by_store_sorted_by_name() {
        let db = seeded_db().await;

        let names: Vec<String> = db
            .products()
            .list_by_store(1)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Gadget", "Widget"]);

        assert!(db.products().list_by_store(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_is_scoped_to_store() {
        let db = seeded_db().await;

        let widget = db.products().get(2, "Widget").await.unwrap().unwrap();
        assert_eq!(widget.units, 50);
        assert_eq!(widget.price_per_unit, 6);

        assert!(db.products().get(2, "Gadget").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_product_rejected() {
        let db = seeded_db().await;

        let err = db
            .products()
            .create(&Product {
                store_id: 1,
                name: "Widget".to_string(),
                units: 1,
                price_per_unit: 1,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_changes_values_and_logs() {
        let db = seeded_db().await;
        let carol = carol(&db).await;

        let update_number = db
            .products()
            .update(
                &ProductChange {
                    store_id: 1,
                    product_name: "Gadget".to_string(),
                    units: 40,
                    price_per_unit: 18,
                },
                carol.id,
            )
            .await
            .unwrap();
        assert_eq!(update_number, 1);

        let gadget = db.products().get(1, "Gadget").await.unwrap().unwrap();
        assert_eq!((gadget.units, gadget.price_per_unit), (40, 18));

        let log = db.product_updates().recent_all(5).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].manager_id, carol.id);
        assert_eq!(log[0].product_name, "Gadget");
    }

    #[tokio::test]
    async fn test_update_missing_product_rolls_back() {
        let db = seeded_db().await;

        let err = db
            .products()
            .update(
                &ProductChange {
                    store_id: 1,
                    product_name: "Gizmo".to_string(),
                    units: 1,
                    price_per_unit: 1,
                },
                1,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
        assert!(db.product_updates().recent_all(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_negative_units_rejected_by_schema() {
        let db = seeded_db().await;

        let result = db
            .products()
            .update(
                &ProductChange {
                    store_id: 1,
                    product_name: "Widget".to_string(),
                    units: -1,
                    price_per_unit: 5,
                },
                1,
            )
            .await;

        assert!(result.is_err());
        let widget = db.products().get(1, "Widget").await.unwrap().unwrap();
        assert_eq!(widget.units, 100);
    }
}

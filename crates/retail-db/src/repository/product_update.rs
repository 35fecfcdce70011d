//! # Product Update Log
//!
//! Every stock/price change made through the update screen appends a row
//! to `ProductUpdates`. Rows are written by
//! [`ProductRepository::update`](crate::repository::product::ProductRepository::update)
//! inside its transaction and read back here.

use retail_core::ProductUpdate;
use sqlx::{AnyConnection, AnyPool};

use crate::error::DbResult;

const UPDATE_COLUMNS: &str = r#"
    u.updateNumber AS update_number,
    u.managerID AS manager_id,
    u.storeID AS store_id,
    s.name AS store_name,
    u.productName AS product_name,
    CAST(u.updatedOn AS TEXT) AS updated_on
"#;

#[derive(Debug, sqlx::FromRow)]
struct ProductUpdateRow {
    update_number: i64,
    manager_id: i32,
    store_id: i32,
    store_name: String,
    product_name: String,
    updated_on: String,
}

impl From<ProductUpdateRow> for ProductUpdate {
    fn from(row: ProductUpdateRow) -> Self {
        ProductUpdate {
            update_number: row.update_number,
            manager_id: row.manager_id,
            store_id: row.store_id,
            store_name: row.store_name,
            product_name: row.product_name,
            updated_on: row.updated_on,
        }
    }
}

/// Appends one log row on an open connection or transaction.
pub(crate) async fn insert(
    conn: &mut AnyConnection,
    manager_id: i32,
    store_id: i32,
    product_name: &str,
) -> DbResult<i64> {
    let update_number: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO ProductUpdates (managerID, storeID, productName, updatedOn)
        VALUES ($1, $2, $3, CURRENT_TIMESTAMP)
        RETURNING updateNumber
        "#,
    )
    .bind(manager_id)
    .bind(store_id)
    .bind(product_name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(update_number)
}

/// Repository for the product update log.
#[derive(Debug, Clone)]
pub struct ProductUpdateRepository {
    pool: AnyPool,
}

impl ProductUpdateRepository {
    /// Creates a new ProductUpdateRepository.
    pub fn new(pool: AnyPool) -> Self {
        ProductUpdateRepository { pool }
    }

    /// Most recent updates to stores managed by `manager_id`, newest first.
    pub async fn recent_for_manager(
        &self,
        manager_id: i32,
        limit: i64,
    ) -> DbResult<Vec<ProductUpdate>> {
        let sql = format!(
            r#"
            SELECT {UPDATE_COLUMNS}
            FROM ProductUpdates u
            JOIN Store s ON s.storeID = u.storeID
            WHERE s.managerID = $1
            ORDER BY u.updatedOn DESC, u.updateNumber DESC
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, ProductUpdateRow>(&sql)
            .bind(manager_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ProductUpdate::from).collect())
    }

    /// Most recent updates across all stores, newest first.
    pub async fn recent_all(&self, limit: i64) -> DbResult<Vec<ProductUpdate>> {
        let sql = format!(
            r#"
            SELECT {UPDATE_COLUMNS}
            FROM ProductUpdates u
            JOIN Store s ON s.storeID = u.storeID
            ORDER BY u.updatedOn DESC, u.updateNumber DESC
            LIMIT $1
            "#
        );

        let rows = sqlx::query_as::<_, ProductUpdateRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ProductUpdate::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::seeded_db;
    use crate::Database;
    use retail_core::ProductChange;

    async fn bump(db: &Database, store_id: i32, name: &str, units: i32, by: i32) {
        db.products()
            .update(
                &ProductChange {
                    store_id,
                    product_name: name.to_string(),
                    units,
                    price_per_unit: 1,
                },
                by,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_capped() {
        let db = seeded_db().await;
        for units in 1..=7 {
            bump(&db, 1, "Widget", units, 1).await;
        }

        let recent = db.product_updates().recent_all(5).await.unwrap();
        let numbers: Vec<i64> = recent.iter().map(|u| u.update_number).collect();

        assert_eq!(numbers, vec![7, 6, 5, 4, 3]);
        assert!(recent[0].updated_at().is_some());
        assert_eq!(recent[0].store_name, "Corner");
    }

    #[tokio::test]
    async fn test_recent_for_manager_only_sees_own_stores() {
        let db = seeded_db().await;
        bump(&db, 1, "Widget", 1, 1).await;
        bump(&db, 3, "Gizmo", 1, 4).await;
        bump(&db, 2, "Widget", 1, 3).await;

        let carol: Vec<i32> = db
            .product_updates()
            .recent_for_manager(1, 5)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.store_id)
            .collect();
        assert_eq!(carol, vec![2, 1]);

        let dave = db.product_updates().recent_for_manager(4, 5).await.unwrap();
        assert_eq!(dave.len(), 1);
        assert_eq!(dave[0].product_name, "Gizmo");
    }
}

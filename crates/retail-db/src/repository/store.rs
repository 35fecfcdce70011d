//! # Store Repository
//!
//! Stores and who manages them. Distance filtering happens client-side in
//! [`retail_core::geo`]; this module only fetches rows.

use retail_core::{NewStore, Point, Store};
use sqlx::AnyPool;
use tracing::debug;

use crate::error::DbResult;

const STORE_COLUMNS: &str = r#"
    storeID AS id,
    name,
    CAST(latitude AS DOUBLE PRECISION) AS latitude,
    CAST(longitude AS DOUBLE PRECISION) AS longitude,
    managerID AS manager_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: i32,
    name: String,
    latitude: f64,
    longitude: f64,
    manager_id: Option<i32>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Store {
            id: row.id,
            name: row.name,
            location: Point::new(row.latitude, row.longitude),
            manager_id: row.manager_id,
        }
    }
}

/// Repository for store database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: AnyPool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: AnyPool) -> Self {
        StoreRepository { pool }
    }

    /// Inserts a store and returns it with its new id.
    pub async fn create(&self, store: &NewStore) -> DbResult<Store> {
        debug!(name = %store.name, "Creating store");

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO Store (name, latitude, longitude, managerID)
            VALUES ($1, $2, $3, $4)
            RETURNING storeID
            "#,
        )
        .bind(store.name.as_str())
        .bind(store.location.latitude)
        .bind(store.location.longitude)
        .bind(store.manager_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Store {
            id,
            name: store.name.clone(),
            location: store.location,
            manager_id: store.manager_id,
        })
    }

    /// Lists every store, by id.
    pub async fn list_all(&self) -> DbResult<Vec<Store>> {
        let sql = format!("SELECT {STORE_COLUMNS} FROM Store ORDER BY storeID");

        let rows = sqlx::query_as::<_, StoreRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Fetched stores");
        Ok(rows.into_iter().map(Store::from).collect())
    }

    /// Gets a store by id.
    pub async fn get_by_id(&self, id: i32) -> DbResult<Option<Store>> {
        let sql = format!("SELECT {STORE_COLUMNS} FROM Store WHERE storeID = $1");

        let row = sqlx::query_as::<_, StoreRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Store::from))
    }

    /// Stores whose `managerID` is this user, by id.
    pub async fn managed_by(&self, manager_id: i32) -> DbResult<Vec<Store>> {
        let sql = format!("SELECT {STORE_COLUMNS} FROM Store WHERE managerID = $1 ORDER BY storeID");

        let rows = sqlx::query_as::<_, StoreRow>(&sql)
            .bind(manager_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Store::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::seeded_db;

    #[tokio::test]
    async fn test_list_all() {
        let db = seeded_db().await;
        let stores = db.stores().list_all().await.unwrap();

        let names: Vec<&str> = stores.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Corner", "Uptown", "Faraway"]);
        assert_eq!(stores[1].location.longitude, 25.0);
        assert_eq!(stores[2].manager_id, Some(4));
    }

    #[tokio::test]
    async fn test_managed_by() {
        let db = seeded_db().await;

        let ids: Vec<i32> = db
            .stores()
            .managed_by(1)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        // alice manages nothing
        assert!(db.stores().managed_by(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = seeded_db().await;

        let store = db.stores().get_by_id(3).await.unwrap().unwrap();
        assert_eq!(store.name, "Faraway");
        assert!(db.stores().get_by_id(42).await.unwrap().is_none());
    }
}

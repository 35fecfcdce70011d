//! Shared fixtures for the repository tests.
//!
//! ```text
//! Users                               Store
//! 1 carol  manager (10,10) "pw"       1 Corner   (10,10) managed by 1
//! 2 alice  customer (10,10) "pw1"     2 Uptown   (20,25) managed by 1
//! 3 root   admin   (50,50) "admin"    3 Faraway  (80,80) managed by 4
//! 4 dave   manager (80,80) "pw"
//!
//! Product
//! (1, Widget, 100, 5)  (1, Gadget, 10, 20)  (2, Widget, 50, 6)  (3, Gizmo, 5, 100)
//! ```

use retail_core::{NewStore, NewUser, Point, Product, User, UserRole};

use crate::{Database, DbConfig};

pub(crate) async fn seeded_db() -> Database {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let users = [
        ("carol", "pw", 10.0, 10.0, UserRole::Manager),
        ("alice", "pw1", 10.0, 10.0, UserRole::Customer),
        ("root", "admin", 50.0, 50.0, UserRole::Admin),
        ("dave", "pw", 80.0, 80.0, UserRole::Manager),
    ];
    for (name, password, lat, lon, role) in users {
        db.users()
            .create(&NewUser {
                name: name.to_string(),
                password: password.to_string(),
                location: Point::new(lat, lon),
                role,
            })
            .await
            .unwrap();
    }

    let stores = [
        ("Corner", 10.0, 10.0, 1),
        ("Uptown", 20.0, 25.0, 1),
        ("Faraway", 80.0, 80.0, 4),
    ];
    for (name, lat, lon, manager) in stores {
        db.stores()
            .create(&NewStore {
                name: name.to_string(),
                location: Point::new(lat, lon),
                manager_id: Some(manager),
            })
            .await
            .unwrap();
    }

    let products = [
        (1, "Widget", 100, 5),
        (1, "Gadget", 10, 20),
        (2, "Widget", 50, 6),
        (3, "Gizmo", 5, 100),
    ];
    for (store_id, name, units, price) in products {
        db.products()
            .create(&Product {
                store_id,
                name: name.to_string(),
                units,
                price_per_unit: price,
            })
            .await
            .unwrap();
    }

    db
}

pub(crate) async fn alice(db: &Database) -> User {
    db.users().authenticate("alice", "pw1").await.unwrap().unwrap()
}

pub(crate) async fn carol(db: &Database) -> User {
    db.users().authenticate("carol", "pw").await.unwrap().unwrap()
}

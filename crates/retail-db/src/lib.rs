//! # retail-db: Database Layer for the Retail Store
//!
//! This crate provides database access for the ordering terminal. It speaks
//! to PostgreSQL in production and SQLite in tests, both through sqlx's
//! `Any` driver.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Retail Store Data Flow                           │
//! │                                                                         │
//! │  Menu handler (place order)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     retail-db (THIS CRATE)                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │    │    │
//! │  │   │   (pool.rs)   │    │  user, store  │    │  (embedded)  │    │    │
//! │  │   │               │    │  product      │    │              │    │    │
//! │  │   │   AnyPool     │◄───│  order        │    │  postgres/   │    │    │
//! │  │   │   1 conn      │    │  report       │    │  sqlite/     │    │    │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘    │    │
//! │  │           │                                                     │    │
//! │  │   ┌───────▼───────┐                                             │    │
//! │  │   │    Gateway    │  untyped: execute / fetch_table / ...       │    │
//! │  │   └───────────────┘                                             │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PostgreSQL  (postgres://user@localhost:5432/dbname)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`gateway`] - Parameterized statements rendered to strings
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Typed repositories (users, stores, products, orders, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use retail_db::{Database, DbConfig};
//!
//! let config = DbConfig::postgres("localhost", 5432, "shop", "alice", "")?;
//! let db = Database::new(config).await?;
//!
//! if let Some(user) = db.users().authenticate("alice", "pw1").await? {
//!     let orders = db.orders().recent_for_customer(user.id, 5).await?;
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod migrations;
pub mod pool;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use gateway::{Gateway, SqlParam, Table};
pub use pool::{Database, DbBackend, DbConfig};

// Repository re-exports for convenience
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use repository::product_update::ProductUpdateRepository;
pub use repository::report::{ReportRepository, ReportScope};
pub use repository::store::StoreRepository;
pub use repository::user::UserRepository;

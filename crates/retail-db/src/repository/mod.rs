//! # Repository Module
//!
//! Typed database access for the retail store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Menu handler                                                           │
//! │       │                                                                 │
//! │       │  db.orders().place(&order)                                      │
//! │       ▼                                                                 │
//! │  OrderRepository                                                        │
//! │  ├── place(&self, order)          ← one transaction                     │
//! │  └── recent_for_customer(&self, id, limit)                              │
//! │       │                                                                 │
//! │       │  Parameterized SQL ($1, $2, ...)                                │
//! │       ▼                                                                 │
//! │  PostgreSQL / SQLite (Any driver)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Column Conventions
//! Queries alias every column to the snake_case field it fills, so rows
//! decode with `#[derive(sqlx::FromRow)]` on both backends. Coordinates are
//! cast to `DOUBLE PRECISION` and timestamps to `TEXT`, the types the `Any`
//! driver can carry.
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Registration, login, admin edits
//! - [`StoreRepository`](store::StoreRepository) - Store listing and ownership
//! - [`ProductRepository`](product::ProductRepository) - Stock and price updates
//! - [`OrderRepository`](order::OrderRepository) - Placing orders, order history
//! - [`ProductUpdateRepository`](product_update::ProductUpdateRepository) - Update log
//! - [`ReportRepository`](report::ReportRepository) - Popular products/customers

pub mod order;
pub mod product;
pub mod product_update;
pub mod report;
pub mod store;
pub mod user;

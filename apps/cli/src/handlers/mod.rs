//! # Menu Handlers
//!
//! One async function per menu entry. Each one prompts through the
//! [`Terminal`], calls retail-core for rules and retail-db for data, and
//! prints the result.
//!
//! ## Handler Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  account.rs   create user, log in                     (main menu 1, 2) │
//! │  stores.rs    stores within range, product list       (user menu 1, 2) │
//! │  orders.rs    place order, recent orders              (user menu 3, 4) │
//! │  manager.rs   update product, recent updates,         (user menu 5-9)  │
//! │               popular items/customers, supply request                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers return `CliResult<()>`; the menu prints any error and carries on.

pub mod account;
pub mod manager;
pub mod orders;
pub mod stores;

use retail_core::{Product, User, UserRole};
use retail_db::{Database, DbError, Table};

use crate::config::Settings;
use crate::console::Terminal;
use crate::error::CliResult;

/// Printed whenever a non-manager reaches a manager screen.
pub const NOT_A_MANAGER: &str = "You are not a manager";

/// What every handler works with.
pub struct Context<T: Terminal> {
    pub db: Database,
    pub term: T,
    pub settings: Settings,
}

impl<T: Terminal> Context<T> {
    pub fn new(db: Database, term: T, settings: Settings) -> Self {
        Context { db, term, settings }
    }

    /// Prints a table padded to the configured column width.
    pub fn show(&mut self, table: &Table) -> CliResult<()> {
        self.term.render_table(table, self.settings.column_width)
    }

    /// The user's role as stored now. An admin may have changed it since
    /// login.
    pub async fn current_role(&self, user: &User) -> CliResult<UserRole> {
        let role = self
            .db
            .users()
            .role_of(user.id)
            .await?
            .ok_or_else(|| DbError::not_found("User", user.id.to_string()))?;
        Ok(role)
    }
}

/// `storeID`, `productName`, `numberOfUnits`, `pricePerUnit` rows.
pub(crate) fn product_table(products: &[Product]) -> Table {
    Table {
        headers: vec![
            "storeID".to_string(),
            "productName".to_string(),
            "numberOfUnits".to_string(),
            "pricePerUnit".to_string(),
        ],
        rows: products
            .iter()
            .map(|p| {
                vec![
                    p.store_id.to_string(),
                    p.name.clone(),
                    p.units.to_string(),
                    p.price_per_unit.to_string(),
                ]
            })
            .collect(),
    }
}

//! # Domain Types
//!
//! Core domain types used throughout the retail store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │      User       │   │      Store      │   │     Product     │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id             │   │  id             │   │  store_id  ┐ PK │        │
//! │  │  name           │   │  name           │   │  name      ┘    │        │
//! │  │  location       │   │  location       │   │  units          │        │
//! │  │  role           │   │  manager_id     │   │  price_per_unit │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │  OrderSummary   │   │  ProductUpdate  │   │    UserRole     │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  order_number   │   │  update_number  │   │  Customer       │        │
//! │  │  store, product │   │  manager_id     │   │  Manager        │        │
//! │  │  units, time    │   │  store, product │   │  Admin          │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entities live in the database. These structs only carry the values the
//! current screen needs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::geo::Point;

// =============================================================================
// User Role
// =============================================================================

/// The `type` column of a user row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Registered through the terminal. Can browse and order.
    #[default]
    Customer,
    /// Manages one or more stores and their products.
    Manager,
    /// Can update any product and any user.
    Admin,
}

impl UserRole {
    /// Returns the string stored in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
        }
    }

    /// Managers and admins can see store reports.
    pub const fn is_staff(&self) -> bool {
        matches!(self, UserRole::Manager | UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a role string.
///
/// Surrounding whitespace is ignored (fixed-width `CHAR` columns pad the
/// value) and case does not matter.
impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(UserRole::Customer),
            "manager" => Ok(UserRole::Manager),
            "admin" => Ok(UserRole::Admin),
            _ => Err(ValidationError::NotAllowed {
                field: "type".to_string(),
                allowed: vec![
                    "customer".to_string(),
                    "manager".to_string(),
                    "admin".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user, without their password.
///
/// This is also the authenticated identity carried by
/// [`Session::Authenticated`](crate::session::Session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub location: Point,
    pub role: UserRole,
}

/// Values for a user row that doesn't exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub password: String,
    pub location: Point,
    pub role: UserRole,
}

/// Full replacement of a user's editable fields (admin only).
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub user_id: i32,
    pub name: String,
    pub password: String,
    pub location: Point,
    pub role: UserRole,
}

// =============================================================================
// Store
// =============================================================================

/// A physical store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: i32,
    pub name: String,
    pub location: Point,
    /// `None` for stores nobody manages yet.
    pub manager_id: Option<i32>,
}

/// Values for a store row that doesn't exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub name: String,
    pub location: Point,
    pub manager_id: Option<i32>,
}

// =============================================================================
// Product
// =============================================================================

/// A product stocked by one store. `(store_id, name)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub store_id: i32,
    pub name: String,
    pub units: i32,
    pub price_per_unit: i32,
}

impl Product {
    /// Checks if the store has enough units to fill an order.
    pub fn can_fulfil(&self, quantity: i32) -> bool {
        self.units >= quantity
    }

    /// Like [`can_fulfil`](Self::can_fulfil), but returns the error to show.
    pub fn check_fulfil(&self, quantity: i32) -> CoreResult<()> {
        if self.can_fulfil(quantity) {
            return Ok(());
        }

        Err(CoreError::InsufficientStock {
            product: self.name.clone(),
            available: self.units,
            requested: quantity,
        })
    }

    /// Stock left after selling `quantity` units.
    pub fn units_after(&self, quantity: i32) -> i32 {
        self.units - quantity
    }
}

/// New unit count and price for an existing product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChange {
    pub store_id: i32,
    pub product_name: String,
    pub units: i32,
    pub price_per_unit: i32,
}

// =============================================================================
// Orders
// =============================================================================

/// An order about to be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: i32,
    pub store_id: i32,
    pub product_name: String,
    pub units: i32,
}

/// Result of a successful order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_number: i64,
    /// Units of the product left in the store afterwards.
    pub remaining_units: i32,
}

/// One line of a customer's order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_number: i64,
    pub store_id: i32,
    pub store_name: String,
    pub product_name: String,
    pub units_ordered: i32,
    /// Raw timestamp text as returned by the database.
    pub order_time: String,
}

impl OrderSummary {
    /// Parsed order time, if the database used a recognised format.
    pub fn ordered_at(&self) -> Option<NaiveDateTime> {
        parse_db_timestamp(&self.order_time)
    }

    /// Order time as shown in the history table.
    pub fn order_time_text(&self) -> String {
        display_timestamp(self.ordered_at(), &self.order_time)
    }
}

// =============================================================================
// Product Updates
// =============================================================================

/// One entry of the product update log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub update_number: i64,
    pub manager_id: i32,
    pub store_id: i32,
    pub store_name: String,
    pub product_name: String,
    pub updated_on: String,
}

impl ProductUpdate {
    /// Parsed update time.
    pub fn updated_at(&self) -> Option<NaiveDateTime> {
        parse_db_timestamp(&self.updated_on)
    }

    /// Update time as shown in the update log table.
    pub fn updated_on_text(&self) -> String {
        display_timestamp(self.updated_at(), &self.updated_on)
    }
}

// =============================================================================
// Timestamps
// =============================================================================

/// Parses a timestamp rendered as text by the database.
///
/// ## Accepted Formats
/// - SQLite `CURRENT_TIMESTAMP`: `2026-10-18 14:03:09`
/// - PostgreSQL `timestamp::text`: `2026-10-18 14:03:09.123456`
/// - PostgreSQL `timestamptz::text`: `2026-10-18 14:03:09.123456+00`
/// - ISO 8601 with a `T` separator
pub fn parse_db_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }

    // Offset suffix: "+00", "+05:30"
    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(ts) = chrono::DateTime::parse_from_str(raw, format) {
            return Some(ts.naive_utc());
        }
    }

    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.naive_utc())
}

/// Renders timestamps to the second, whichever backend produced them.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a parsed timestamp, falling back to the raw text.
fn display_timestamp(parsed: Option<NaiveDateTime>, raw: &str) -> String {
    match parsed {
        Some(ts) => ts.format(DISPLAY_TIME_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_role_parsing_trims_and_ignores_case() {
        assert_eq!("manager".parse::<UserRole>().unwrap(), UserRole::Manager);
        assert_eq!("manager   ".parse::<UserRole>().unwrap(), UserRole::Manager);
        assert_eq!("Customer".parse::<UserRole>().unwrap(), UserRole::Customer);
        assert_eq!(" ADMIN ".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("cashier".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_display_round_trips() {
        for role in [UserRole::Customer, UserRole::Manager, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
        assert!(!UserRole::Customer.is_staff());
        assert!(UserRole::Admin.is_staff());
    }

    #[test]
    fn test_product_stock_checks() {
        let product = Product {
            store_id: 1,
            name: "Widget".to_string(),
            units: 100,
            price_per_unit: 5,
        };

        assert!(product.can_fulfil(100));
        assert!(!product.can_fulfil(101));
        assert_eq!(product.units_after(3), 97);

        let err = product.check_fulfil(101).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 100,
                requested: 101,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_sqlite_timestamp() {
        let ts = parse_db_timestamp("2026-10-18 14:03:09").unwrap();
        assert_eq!(ts.year(), 2026);
        assert_eq!(ts.hour(), 14);
        assert_eq!(ts.second(), 9);
    }

    #[test]
    fn test_parse_postgres_timestamps() {
        let ts = parse_db_timestamp("2026-10-18 14:03:09.123456").unwrap();
        assert_eq!(ts.nanosecond(), 123_456_000);

        let ts = parse_db_timestamp("2026-10-18 14:03:09.5+02").unwrap();
        assert_eq!(ts.hour(), 12);

        assert!(parse_db_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_role_defaults_to_customer() {
        assert_eq!(UserRole::default(), UserRole::Customer);
    }

    #[test]
    fn test_timestamps_shown_to_the_second() {
        let mut order = OrderSummary {
            order_number: 1,
            store_id: 1,
            store_name: "Corner".to_string(),
            product_name: "Widget".to_string(),
            units_ordered: 3,
            order_time: "2026-10-18 14:03:09.123456".to_string(),
        };
        assert_eq!(order.order_time_text(), "2026-10-18 14:03:09");

        order.order_time = "not a time".to_string();
        assert_eq!(order.order_time_text(), "not a time");

        let update = ProductUpdate {
            update_number: 2,
            manager_id: 1,
            store_id: 1,
            store_name: "Corner".to_string(),
            product_name: "Widget".to_string(),
            updated_on: "2026-10-18T14:03:09+00:00".to_string(),
        };
        assert_eq!(update.updated_on_text(), "2026-10-18 14:03:09");
    }
}

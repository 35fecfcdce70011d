//! # retail-core: Pure Domain Logic for the Retail Store
//!
//! This crate holds the rules of the ordering application as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Retail Store Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    Terminal (apps/cli)                          │    │
//! │  │    Main menu ──► Login ──► User menu ──► Handlers               │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ retail-core (THIS CRATE) ★                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │    geo    │  │  session  │  │ validation│    │    │
//! │  │   │   User    │  │ distance  │  │ Anonymous │  │   input   │    │    │
//! │  │   │   Store   │  │  nearby   │  │  Authed   │  │  parsing  │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS           │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                  retail-db (Database Layer)                     │    │
//! │  │        PostgreSQL / SQLite queries, migrations, repositories    │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Store, Product, Order, ProductUpdate)
//! - [`geo`] - Euclidean distance and the "stores near me" filter
//! - [`session`] - Anonymous / Authenticated session state
//! - [`validation`] - Terminal input parsing and business rule checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use retail_core::geo::{calculate_distance, Point};
//!
//! let home = Point::new(10.0, 10.0);
//! let store = Point::new(13.0, 14.0);
//!
//! assert_eq!(calculate_distance(home, store), 5.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod geo;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use geo::Point;
pub use session::Session;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stores closer than this (in coordinate units) are "near" a user.
///
/// The comparison is strict: a store exactly this far away is not listed.
pub const DEFAULT_NEARBY_RADIUS: f64 = 30.0;

/// Row cap for the "recent orders" and "recent updates" listings.
pub const DEFAULT_RECENT_LIMIT: i64 = 5;

/// Row cap for the "popular products" and "popular customers" listings.
pub const DEFAULT_POPULAR_LIMIT: i64 = 5;

/// Coordinates entered at registration must fall in `[MIN, MAX]`.
pub const MIN_COORDINATE: f64 = 0.0;

/// See [`MIN_COORDINATE`].
pub const MAX_COORDINATE: f64 = 100.0;

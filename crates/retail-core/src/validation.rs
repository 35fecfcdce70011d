//! # Validation Module
//!
//! Turns raw terminal lines into typed values and checks business rules
//! before anything reaches the database.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console (apps/cli)                                            │
//! │  └── Reads one line per prompt                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── parse_* : text → number (InvalidFormat)                            │
//! │  └── validate_* : ranges, emptiness, positivity                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                      │
//! │  ├── NOT NULL / PRIMARY KEY constraints                                 │
//! │  └── Foreign key constraints                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use retail_core::validation::{parse_coordinate, parse_quantity};
//!
//! assert_eq!(parse_coordinate("latitude", " 10.5 ").unwrap(), 10.5);
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert!(parse_quantity("0").is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_COORDINATE, MIN_COORDINATE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest name or product name accepted from the terminal.
pub const MAX_NAME_LEN: usize = 100;

/// Longest password accepted from the terminal.
pub const MAX_PASSWORD_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a user or store name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use retail_core::validation::validate_name;
///
/// assert_eq!(validate_name("  alice ").unwrap(), "alice");
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<String> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates a product name and returns it trimmed.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    validate_text("product name", name, MAX_NAME_LEN)
}

/// Validates a password.
///
/// Passwords are compared byte for byte at login, so only the trailing
/// newline is stripped by the console. Surrounding spaces are kept.
pub fn validate_password(password: &str) -> ValidationResult<String> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_LEN,
        });
    }

    Ok(password.to_string())
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a latitude or longitude.
///
/// ## Rules
/// - Must be finite
/// - Must be within `[MIN_COORDINATE, MAX_COORDINATE]`, inclusive
pub fn validate_coordinate(field: &str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() || !(MIN_COORDINATE..=MAX_COORDINATE).contains(&value) {
        return Err(ValidationError::CoordinateOutOfRange {
            field: field.to_string(),
            value,
            min: MIN_COORDINATE,
            max: MAX_COORDINATE,
        });
    }

    Ok(value)
}

/// Validates the number of units in an order.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Place order                                                            │
/// │                                                                         │
/// │  User enters quantity: 3                                                │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(3) ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"                │
/// │       │                                                                 │
/// │       └── OK → stock check inside the order transaction                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i32) -> ValidationResult<i32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(qty)
}

/// Validates a stock level. Zero is allowed (sold out).
pub fn validate_units(units: i32) -> ValidationResult<i32> {
    if units < 0 {
        return Err(ValidationError::OutOfRange {
            field: "number of units".to_string(),
            min: 0,
            max: i64::from(i32::MAX),
        });
    }

    Ok(units)
}

/// Validates a price per unit. Zero is allowed (free items).
pub fn validate_price(price: i32) -> ValidationResult<i32> {
    if price < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price per unit".to_string(),
            min: 0,
            max: i64::from(i32::MAX),
        });
    }

    Ok(price)
}

// =============================================================================
// Terminal Parsers
// =============================================================================

/// Parses an integer typed at a prompt.
pub fn parse_int(field: &str, raw: &str) -> ValidationResult<i32> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    raw.parse::<i32>().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{raw}' is not a whole number"),
    })
}

/// Parses a decimal number typed at a prompt.
pub fn parse_float(field: &str, raw: &str) -> ValidationResult<f64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    raw.parse::<f64>().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{raw}' is not a number"),
    })
}

/// Parses and range checks a coordinate.
pub fn parse_coordinate(field: &str, raw: &str) -> ValidationResult<f64> {
    validate_coordinate(field, parse_float(field, raw)?)
}

/// Parses an id (store id, user id).
pub fn parse_id(field: &str, raw: &str) -> ValidationResult<i32> {
    let id = parse_int(field, raw)?;

    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(id)
}

/// Parses an optional id. A blank line means "skip".
pub fn parse_optional_id(field: &str, raw: &str) -> ValidationResult<Option<i32>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    parse_id(field, raw).map(Some)
}

/// Parses an order quantity.
pub fn parse_quantity(raw: &str) -> ValidationResult<i32> {
    validate_quantity(parse_int("quantity", raw)?)
}

/// Parses a stock level.
pub fn parse_units(raw: &str) -> ValidationResult<i32> {
    validate_units(parse_int("number of units", raw)?)
}

/// Parses a price per unit.
pub fn parse_price(raw: &str) -> ValidationResult<i32> {
    validate_price(parse_int("price per unit", raw)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # CLI Error Type
//!
//! Everything a menu command can fail with, and the line printed for it.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Terminal                           │
//! │                                                                         │
//! │  handler (place order)                                                  │
//! │     │                                                                   │
//! │     ├── ValidationError  "quantity must be positive"                    │
//! │     ├── CoreError        "Store 3 is not within 30 units ..."           │
//! │     ├── DbError          NotFound / Rule / QueryFailed ...              │
//! │     ▼                                                                   │
//! │  CliError ──► menu boundary ──► user_message() ──► stderr               │
//! │                      │                                                  │
//! │                      └── InputClosed / Io: the loop ends instead        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Database failures the user can't act on are logged in full with
//! `tracing::error!` and shown as a short generic line.

use std::io;

use retail_core::{CoreError, ValidationError};
use retail_db::DbError;
use thiserror::Error;

/// Errors raised while running a menu command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Database operation failed.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Business rule violated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input that couldn't be used.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading from or writing to the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Standard input reached end of file.
    #[error("Input closed")]
    InputClosed,
}

/// Result alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// True when the menu loop can't continue (the terminal is gone).
    pub fn ends_session(&self) -> bool {
        matches!(self, CliError::InputClosed | CliError::Io(_))
    }

    /// The line shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Db(err) => db_message(err),
            CliError::Core(CoreError::Validation(e)) | CliError::Validation(e) => {
                format!("Your input is invalid: {e}")
            }
            CliError::Core(e) => e.to_string(),
            CliError::Io(e) => {
                tracing::error!("Terminal I/O failed: {}", e);
                "Terminal I/O failed".to_string()
            }
            CliError::InputClosed => "Input closed".to_string(),
        }
    }
}

fn db_message(err: &DbError) -> String {
    match err {
        DbError::NotFound { entity, id } => format!("{} not found: {}", entity, id),
        DbError::UniqueViolation { field, value } => {
            format!("{} '{}' already exists", field, value)
        }
        DbError::Rule(CoreError::Validation(e)) => format!("Your input is invalid: {e}"),
        DbError::Rule(e) => e.to_string(),
        DbError::ForeignKeyViolation { message } => {
            tracing::error!("Foreign key violation: {}", message);
            "Invalid reference".to_string()
        }
        DbError::ConnectionFailed(e) => {
            tracing::error!("Database connection failed: {}", e);
            "Database connection failed".to_string()
        }
        DbError::MigrationFailed(e) => {
            tracing::error!("Database migration failed: {}", e);
            "Database migration failed".to_string()
        }
        DbError::QueryFailed(e) => {
            // Log the actual error but show a generic message
            tracing::error!("Database query failed: {}", e);
            "Database operation failed".to_string()
        }
        DbError::TransactionFailed(e) => {
            tracing::error!("Transaction failed: {}", e);
            "Database transaction failed".to_string()
        }
        DbError::PoolExhausted => "Database pool exhausted".to_string(),
        DbError::Internal(e) => {
            tracing::error!("Internal database error: {}", e);
            "Database operation failed".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_errors_shown_verbatim() {
        let err = CliError::from(DbError::Rule(CoreError::InsufficientStock {
            product: "Widget".to_string(),
            available: 100,
            requested: 101,
        }));

        assert_eq!(
            err.user_message(),
            "Insufficient stock for Widget: available 100, requested 101"
        );
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = CliError::from(DbError::QueryFailed("syntax error near FROM".to_string()));
        assert_eq!(err.user_message(), "Database operation failed");
    }

    #[test]
    fn test_not_found_message() {
        let err = CliError::from(DbError::not_found("Product", "Gizmo in store 1"));
        assert_eq!(err.user_message(), "Product not found: Gizmo in store 1");
    }

    #[test]
    fn test_validation_prefixed() {
        let err = CliError::from(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
        assert!(err.user_message().starts_with("Your input is invalid: "));
        assert!(!err.ends_session());
    }

    #[test]
    fn test_closed_input_ends_session() {
        assert!(CliError::InputClosed.ends_session());
        assert!(CliError::from(io::Error::from(io::ErrorKind::BrokenPipe)).ends_session());
    }
}

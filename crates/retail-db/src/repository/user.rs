//! # User Repository
//!
//! Registration, login and admin edits of the `Users` table.
//!
//! ## Login
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  authenticate("alice", "pw1")                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... FROM Users WHERE name = $1 AND password = $2                │
//! │       │                                                                 │
//! │       ├── exactly one row  → Ok(Some(User))                             │
//! │       ├── zero rows        → Ok(None)      "wrong name or password"     │
//! │       ├── several rows     → Ok(None)      ambiguous, logged            │
//! │       └── database down    → Err(DbError)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passwords are stored and compared as plain text; they never leave this
//! module in a [`User`].

use retail_core::{NewUser, Point, User, UserRole, UserUpdate};
use sqlx::AnyPool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::gateway::Gateway;

const USER_COLUMNS: &str = r#"
    userID AS id,
    name,
    CAST(latitude AS DOUBLE PRECISION) AS latitude,
    CAST(longitude AS DOUBLE PRECISION) AS longitude,
    CAST(type AS TEXT) AS role
"#;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    latitude: f64,
    longitude: f64,
    role: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let role = row.role.parse().unwrap_or_else(|_| {
            warn!(user_id = row.id, role = %row.role, "Unknown user type, treating as customer");
            UserRole::Customer
        });

        User {
            id: row.id,
            name: row.name,
            location: Point::new(row.latitude, row.longitude),
            role,
        }
    }
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: AnyPool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: AnyPool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a user and returns it with its new id.
    pub async fn create(&self, user: &NewUser) -> DbResult<User> {
        debug!(name = %user.name, role = %user.role, "Creating user");

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO Users (name, password, latitude, longitude, type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING userID
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.password.as_str())
        .bind(user.location.latitude)
        .bind(user.location.longitude)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(User {
            id,
            name: user.name.clone(),
            location: user.location,
            role: user.role,
        })
    }

    /// Checks whether any user already has this name.
    pub async fn name_taken(&self, name: &str) -> DbResult<bool> {
        let matches = Gateway::new(self.pool.clone())
            .count_rows("SELECT userID FROM Users WHERE name = $1", &[name.into()])
            .await?;

        Ok(matches > 0)
    }

    /// True when some user other than `user_id` already has this name.
    pub async fn name_taken_by_other(&self, name: &str, user_id: i32) -> DbResult<bool> {
        let matches = Gateway::new(self.pool.clone())
            .count_rows(
                "SELECT userID FROM Users WHERE name = $1 AND userID <> $2",
                &[name.into(), user_id.into()],
            )
            .await?;

        Ok(matches > 0)
    }

    /// Looks up the user with this exact name and password.
    ///
    /// ## Returns
    /// * `Ok(Some(user))` - Exactly one row matched
    /// * `Ok(None)` - No match (or an ambiguous duplicate)
    /// * `Err(_)` - The query itself failed
    pub async fn authenticate(&self, name: &str, password: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM Users WHERE name = $1 AND password = $2");

        let mut rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(name)
            .bind(password)
            .fetch_all(&self.pool)
            .await?;

        match rows.len() {
            1 => Ok(rows.pop().map(User::from)),
            0 => {
                debug!(name, "Login failed");
                Ok(None)
            }
            n => {
                warn!(name, matches = n, "Several users share these credentials, refusing login");
                Ok(None)
            }
        }
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: i32) -> DbResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM Users WHERE userID = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    /// Reads the user's role straight from the table.
    ///
    /// The session keeps the role seen at login; permission checks call this
    /// so a role changed by an admin takes effect at once.
    pub async fn role_of(&self, id: i32) -> DbResult<Option<UserRole>> {
        Ok(self.get_by_id(id).await?.map(|user| user.role))
    }

    /// Lists every user (without passwords), by id.
    pub async fn list_all(&self) -> DbResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM Users ORDER BY userID");

        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Replaces a user's name, password, location and role.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - Another user already has `update.name`
    /// * `DbError::NotFound` - No user has `update.user_id`
    pub async fn update(&self, update: &UserUpdate) -> DbResult<()> {
        debug!(user_id = update.user_id, "Updating user");

        if self.name_taken_by_other(&update.name, update.user_id).await? {
            return Err(DbError::duplicate("name", update.name.as_str()));
        }

        let result = sqlx::query(
            r#"
            UPDATE Users
            SET name = $1, password = $2, latitude = $3, longitude = $4, type = $5
            WHERE userID = $6
            "#,
        )
        .bind(update.name.as_str())
        .bind(update.password.as_str())
        .bind(update.location.latitude)
        .bind(update.location.longitude)
        .bind(update.role.as_str())
        .bind(update.user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", update.user_id.to_string()));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

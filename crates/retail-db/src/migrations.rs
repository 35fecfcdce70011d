//! # Database Migrations
//!
//! Embedded SQL migrations, one set per backend.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  CLI Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbBackend from URL scheme                                              │
//! │       │                                                                 │
//! │       ├── postgres ──► migrations/postgres/*.sql                        │
//! │       └── sqlite   ──► migrations/sqlite/*.sql                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table, run what is pending                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CLI continues startup                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Add the same `NNN_description.sql` to BOTH backend directories
//! 2. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::migrate::Migrator;
use sqlx::AnyPool;
use tracing::info;

use crate::error::DbResult;
use crate::pool::DbBackend;

/// Embedded migrations from `migrations/postgres`.
static POSTGRES: Migrator = sqlx::migrate!("../../migrations/postgres");

/// Embedded migrations from `migrations/sqlite`.
static SQLITE: Migrator = sqlx::migrate!("../../migrations/sqlite");

fn migrator(backend: DbBackend) -> &'static Migrator {
    match backend {
        DbBackend::Postgres => &POSTGRES,
        DbBackend::Sqlite => &SQLITE,
    }
}

/// Runs all pending database migrations.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Transactional: each migration runs in a transaction
/// - Ordered: migrations run in filename order (001, 002, ...)
pub async fn run_migrations(pool: &AnyPool, backend: DbBackend) -> DbResult<()> {
    info!(%backend, "Checking for pending migrations");

    migrator(backend).run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns (total_migrations, applied_migrations).
///
/// ## Usage
/// For diagnostics: printed by the seed binary.
pub async fn migration_status(pool: &AnyPool, backend: DbBackend) -> DbResult<(usize, usize)> {
    let total = migrator(backend).migrations.len();

    // Missing table means nothing applied yet
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, usize::try_from(applied).unwrap_or(0)))
}

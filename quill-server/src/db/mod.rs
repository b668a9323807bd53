//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - One pool per process, handed to repositories by reference
//! - All list operations use JOINs - no N+1 queries
//! - Rely on DB constraints, classify violations - no check-then-insert
//! - Every user-supplied value is bound, never spliced into SQL text

pub mod filter;
pub mod repos;
pub mod seed;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

pub use filter::PostFilter;
pub use repos::*;
pub use sqlx::PgPool;

/// Pool size when `QUILL_MAX_CONNECTIONS` is not set.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Embedded schema migrations (`migrations/` at the workspace root).
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Open the process-wide pool. Built once at startup and shared by every request.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "Connecting to database");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply any pending migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    tracing::info!("Running schema migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Schema is up to date");
    Ok(())
}

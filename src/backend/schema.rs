//! Database Schema
//!
//! Creates the orderable tables and records the applied schema version.
//!
//! Positions are deliberately not covered by a UNIQUE index: SQLite checks
//! uniqueness row by row inside a bulk `UPDATE`, so a reindex could trip over
//! its own intermediate state. The ordering engine keeps positions distinct.

use sqlx::SqlitePool;

/// Current database schema version
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Statements of schema version 1
const SCHEMA_V1: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        community_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        position INTEGER NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_categories_list
        ON categories (community_id, position)",
    "CREATE TABLE IF NOT EXISTS channels (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        community_id INTEGER NOT NULL,
        category_id INTEGER REFERENCES categories (id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        kind TEXT NOT NULL,
        position INTEGER NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_channels_list
        ON channels (community_id, category_id, position)",
];

/// Check if database needs migration
pub fn needs_migration(current_version: i32) -> bool {
    current_version < CURRENT_SCHEMA_VERSION
}

/// Create tables and apply pending migrations
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    let (current_version,): (i32,) =
        sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM schema_migrations")
            .fetch_one(pool)
            .await?;

    if !needs_migration(current_version) {
        tracing::debug!(version = current_version, "Schema is up to date");
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for statement in SCHEMA_V1 {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    sqlx::query("INSERT INTO schema_migrations (version, applied_at) VALUES (?, ?)")
        .bind(CURRENT_SCHEMA_VERSION)
        .bind(chrono::Utc::now())
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    tracing::info!(version = CURRENT_SCHEMA_VERSION, "Applied database schema");
    Ok(())
}

//! Schema definitions and migration utilities.
//!
//! The schema is embedded in the binary and applied idempotently on startup.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the notes table (001_notes.sql).
pub const NOTES_MIGRATION: &str = include_str!("../../../migrations/001_notes.sql");

/// Run all migrations against the database.
///
/// Every statement uses `IF NOT EXISTS`, so this can run on each startup.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    tracing::debug!("Running notes migration (001_notes.sql)...");
    sqlx::raw_sql(NOTES_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Notes migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `notes` table exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = current_schema()
            AND table_name = 'notes'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_migration_embedded() {
        assert!(NOTES_MIGRATION.contains("CREATE TABLE IF NOT EXISTS notes"));
        assert!(NOTES_MIGRATION.contains("id          TEXT        PRIMARY KEY"));
        assert!(NOTES_MIGRATION.contains("DEFAULT '#FDE68A'"));
        assert!(NOTES_MIGRATION.contains("seq         BIGSERIAL"));
        assert!(NOTES_MIGRATION.contains("ON notes (created_at DESC, seq DESC)"));
    }
}

//! Schema definitions and migration utilities.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the page tree (001_pages.sql).
pub const PAGES_MIGRATION: &str = include_str!("../../../migrations/001_pages.sql");

/// Run all pending migrations against the database.
///
/// Idempotent: every statement checks for existing objects first.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    tracing::debug!("Running pages migration (001_pages.sql)...");
    sqlx::raw_sql(PAGES_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Pages migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_migration_embedded() {
        assert!(PAGES_MIGRATION.contains("CREATE TABLE IF NOT EXISTS pages"));
        assert!(PAGES_MIGRATION.contains("CREATE TABLE IF NOT EXISTS page_parts"));
        assert!(PAGES_MIGRATION.contains("CREATE TABLE IF NOT EXISTS page_fields"));
    }

    #[test]
    fn pages_migration_has_every_standard_column() {
        for column in folio_core::STANDARD_FIELDS {
            let column = if *column == "id" { "id BIGSERIAL" } else { column };
            assert!(PAGES_MIGRATION.contains(column), "missing column {column}");
        }
    }
}

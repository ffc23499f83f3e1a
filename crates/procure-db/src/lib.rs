//! Postgres collaborator for the nearest-supplier search: pool setup,
//! embedded migrations, site tables and the error log.

use procure_core::DatabaseSettings;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

// Relative to this crate's manifest: <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Config(#[from] procure_core::ConfigError),
}

/// Open a pool sized from `settings`. The first connection is made eagerly
/// so a bad URL fails at startup.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if no connection can be established.
pub async fn connect_pool(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(&settings.url)
        .await?;
    tracing::debug!(
        max_connections = settings.max_connections,
        min_connections = settings.min_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Apply the embedded migrations and return how many were pending.
///
/// # Errors
///
/// Returns [`DbError::Migration`] if any migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, DbError> {
    // A fresh database has no bookkeeping table yet; that reads as "none applied".
    let applied: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success")
            .fetch_all(pool)
            .await
            .unwrap_or_default();

    let pending = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration() && !applied.contains(&m.version))
        .count();

    MIGRATOR.run(pool).await?;
    Ok(pending)
}

/// Round-trip a trivial query to prove the pool can reach the database.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::MIGRATOR;

    #[test]
    fn embedded_migrations_create_sites_before_error_logs() {
        let descriptions: Vec<&str> = MIGRATOR.iter().map(|m| m.description.as_ref()).collect();
        assert_eq!(descriptions, vec!["create sites", "create error logs"]);

        let versions: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();
        assert!(versions.windows(2).all(|w| w[0] < w[1]), "{versions:?}");
    }
}

pub mod directory;
pub mod error_log;
pub mod seed;
pub mod sites;

pub use directory::PgSupplierDirectory;
pub use error_log::{insert_error_log, list_recent_error_logs, ErrorLogRow, PgErrorLog};
pub use seed::{seed_sites, SeedSummary};
pub use sites::{
    get_warehouse_geolocation, list_enabled_supplier_locations, upsert_supplier,
    upsert_warehouse, SupplierRow, WarehouseRow,
};

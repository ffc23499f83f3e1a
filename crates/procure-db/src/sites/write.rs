//! Write operations for the `warehouses` and `suppliers` tables.

use sqlx::PgExecutor;

use super::types::{SupplierRow, WarehouseRow};

/// Insert a warehouse or update the geolocation of an existing one.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn upsert_warehouse<'e, E>(
    executor: E,
    name: &str,
    geolocation: Option<&str>,
) -> Result<WarehouseRow, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, WarehouseRow>(
        "INSERT INTO warehouses (name, geolocation) \
         VALUES ($1, $2) \
         ON CONFLICT (name) DO UPDATE SET \
             geolocation = EXCLUDED.geolocation, \
             updated_at  = NOW() \
         RETURNING id, name, geolocation, created_at, updated_at",
    )
    .bind(name)
    .bind(geolocation)
    .fetch_one(executor)
    .await
}

/// Insert a supplier or update the geolocation and `disabled` flag of an
/// existing one.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn upsert_supplier<'e, E>(
    executor: E,
    name: &str,
    geolocation: Option<&str>,
    disabled: bool,
) -> Result<SupplierRow, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, SupplierRow>(
        "INSERT INTO suppliers (name, geolocation, disabled) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (name) DO UPDATE SET \
             geolocation = EXCLUDED.geolocation, \
             disabled    = EXCLUDED.disabled, \
             updated_at  = NOW() \
         RETURNING id, name, geolocation, disabled, created_at, updated_at",
    )
    .bind(name)
    .bind(geolocation)
    .bind(disabled)
    .fetch_one(executor)
    .await
}

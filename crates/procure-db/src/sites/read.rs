//! Read operations for warehouse and supplier locations.

use procure_core::SupplierLocation;
use sqlx::PgPool;

/// Fetch the raw geolocation attribute of a warehouse by name.
///
/// Returns `None` both when the warehouse does not exist and when its
/// `geolocation` column is NULL.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_warehouse_geolocation(
    pool: &PgPool,
    name: &str,
) -> Result<Option<String>, sqlx::Error> {
    let row: Option<Option<String>> =
        sqlx::query_scalar("SELECT geolocation FROM warehouses WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
    Ok(row.flatten())
}

/// List every supplier that is not disabled, with its raw geolocation.
///
/// Results are ordered by `name ASC` so ties in the nearest-supplier search
/// resolve the same way on every run.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_enabled_supplier_locations(
    pool: &PgPool,
) -> Result<Vec<SupplierLocation>, sqlx::Error> {
    let rows: Vec<(String, Option<String>)> = sqlx::query_as(
        "SELECT name, geolocation \
         FROM suppliers \
         WHERE disabled = FALSE \
         ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(name, geolocation)| SupplierLocation { name, geolocation })
        .collect())
}

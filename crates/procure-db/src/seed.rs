use procure_core::SitesFile;
use sqlx::PgPool;

use crate::sites::{upsert_supplier, upsert_warehouse};
use crate::DbError;

/// Counts of rows written by [`seed_sites`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub warehouses: usize,
    pub suppliers: usize,
}

/// Upsert every warehouse and supplier from the sites file.
///
/// All upserts run inside a single transaction; if any operation fails the
/// entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Config`] if a geolocation cannot be serialized, or
/// [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_sites(pool: &PgPool, sites: &SitesFile) -> Result<SeedSummary, DbError> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    for warehouse in &sites.warehouses {
        let geolocation = warehouse.geolocation_text()?;
        upsert_warehouse(&mut *tx, &warehouse.name, geolocation.as_deref()).await?;
        summary.warehouses += 1;
    }

    for supplier in &sites.suppliers {
        let geolocation = supplier.geolocation_text()?;
        upsert_supplier(
            &mut *tx,
            &supplier.name,
            geolocation.as_deref(),
            supplier.disabled,
        )
        .await?;
        summary.suppliers += 1;
    }

    tx.commit().await?;
    Ok(summary)
}

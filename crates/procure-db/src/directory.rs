//! Postgres-backed [`SupplierDirectory`].

use procure_core::{SupplierDirectory, SupplierLocation};
use sqlx::PgPool;

use crate::sites::{get_warehouse_geolocation, list_enabled_supplier_locations};
use crate::DbError;

#[derive(Debug, Clone)]
pub struct PgSupplierDirectory {
    pool: PgPool,
}

impl PgSupplierDirectory {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SupplierDirectory for PgSupplierDirectory {
    type Error = DbError;

    async fn warehouse_location(&self, warehouse: &str) -> Result<Option<String>, DbError> {
        Ok(get_warehouse_geolocation(&self.pool, warehouse).await?)
    }

    async fn enabled_suppliers(&self) -> Result<Vec<SupplierLocation>, DbError> {
        Ok(list_enabled_supplier_locations(&self.pool).await?)
    }
}

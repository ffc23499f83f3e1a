//! Row types for the `warehouses` and `suppliers` tables.

use chrono::{DateTime, Utc};

/// A row from the `warehouses` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WarehouseRow {
    pub id: i64,
    pub name: String,
    /// Serialized GeoJSON feature collection.
    pub geolocation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row from the `suppliers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SupplierRow {
    pub id: i64,
    pub name: String,
    pub geolocation: Option<String>,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

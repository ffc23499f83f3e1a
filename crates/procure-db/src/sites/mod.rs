//! Database operations for the `warehouses` and `suppliers` tables.

mod read;
mod types;
mod write;

pub use read::{get_warehouse_geolocation, list_enabled_supplier_locations};
pub use types::{SupplierRow, WarehouseRow};
pub use write::{upsert_supplier, upsert_warehouse};

//! Read access to warehouse and supplier location records.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// An enabled supplier and its raw location attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierLocation {
    pub name: String,
    /// Serialized GeoJSON feature collection, if one was recorded.
    pub geolocation: Option<String>,
}

/// Source of warehouse and supplier locations.
///
/// Disabled suppliers are filtered by the implementation; callers only ever
/// see candidates.
pub trait SupplierDirectory {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Raw location attribute of a warehouse. `Ok(None)` covers both an
    /// unknown warehouse and one without a recorded location.
    fn warehouse_location(
        &self,
        warehouse: &str,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

    /// All enabled suppliers, in the order they should be considered.
    fn enabled_suppliers(
        &self,
    ) -> impl Future<Output = Result<Vec<SupplierLocation>, Self::Error>> + Send;
}

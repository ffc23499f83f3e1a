//! Linear nearest-supplier search over stored GeoJSON locations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics::{ErrorLog, SUPPLIER_LOCATION_ERROR, WAREHOUSE_LOCATION_ERROR};
use crate::directory::SupplierDirectory;
use crate::geo::{extract_point, haversine_km, ParseError, Point};

/// The closest enabled supplier and its distance from the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestSupplier {
    pub name: String,
    /// Great-circle distance in kilometres.
    pub distance: f64,
}

#[derive(Debug, Error)]
enum WarehouseLocationError<E: std::error::Error + 'static> {
    #[error("lookup failed: {0}")]
    Lookup(#[source] E),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("no valid point coordinates in warehouse location")]
    NoPoint,
}

/// Find the enabled supplier closest to `warehouse`.
///
/// An empty `warehouse` returns `Ok(None)` without touching the directory.
/// Any failure to resolve the warehouse's own location (lookup error,
/// malformed GeoJSON, no point) is reported to `log` and also yields
/// `Ok(None)`. Suppliers whose location is malformed are reported and
/// skipped; suppliers without a point are skipped silently. Among equally
/// distant suppliers the first one listed wins.
///
/// # Errors
///
/// Returns the directory's error if listing enabled suppliers fails. This is
/// the only failure that reaches the caller.
pub async fn find_nearest_supplier<D, L>(
    directory: &D,
    log: &L,
    warehouse: &str,
) -> Result<Option<NearestSupplier>, D::Error>
where
    D: SupplierDirectory + Sync,
    L: ErrorLog + Sync + ?Sized,
{
    if warehouse.is_empty() {
        return Ok(None);
    }

    let origin = match resolve_warehouse(directory, warehouse).await {
        Ok(point) => point,
        Err(e) => {
            log.log_error(
                &format!("could not resolve location for warehouse '{warehouse}': {e}"),
                WAREHOUSE_LOCATION_ERROR,
            );
            return Ok(None);
        }
    };

    // Not guarded like the warehouse lookup: a failed listing is the
    // caller's problem.
    let suppliers = directory.enabled_suppliers().await?;

    let mut nearest: Option<NearestSupplier> = None;
    let mut min_distance = f64::INFINITY;

    for supplier in suppliers {
        let point = match extract_point(supplier.geolocation.as_deref()) {
            Ok(Some(point)) => point,
            Ok(None) => continue,
            Err(e) => {
                log.log_error(
                    &format!(
                        "could not process location for supplier '{}': {e}",
                        supplier.name
                    ),
                    SUPPLIER_LOCATION_ERROR,
                );
                continue;
            }
        };

        let distance = haversine_km(origin, point);
        if distance < min_distance {
            min_distance = distance;
            nearest = Some(NearestSupplier {
                name: supplier.name,
                distance,
            });
        }
    }

    match &nearest {
        Some(found) => tracing::debug!(
            warehouse,
            supplier = %found.name,
            distance_km = found.distance,
            "nearest supplier resolved"
        ),
        None => tracing::debug!(warehouse, "no supplier with a usable location"),
    }

    Ok(nearest)
}

async fn resolve_warehouse<D>(
    directory: &D,
    warehouse: &str,
) -> Result<Point, WarehouseLocationError<D::Error>>
where
    D: SupplierDirectory + Sync,
{
    let raw = directory
        .warehouse_location(warehouse)
        .await
        .map_err(WarehouseLocationError::Lookup)?;
    extract_point(raw.as_deref())?.ok_or(WarehouseLocationError::NoPoint)
}

#[cfg(test)]
#[path = "nearest_test.rs"]
mod tests;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use procure_core::{find_nearest_supplier, NearestSupplier};
use procure_db::{PgErrorLog, PgSupplierDirectory};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct NearestQuery {
    pub warehouse: Option<String>,
}

/// `GET /api/v1/nearest-supplier?warehouse=<name>`
///
/// `data` is `null` when the warehouse is missing, has no usable location,
/// or no enabled supplier has one.
pub(super) async fn nearest_supplier(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NearestQuery>,
) -> Result<Json<ApiResponse<Option<NearestSupplier>>>, ApiError> {
    let warehouse = query.warehouse.unwrap_or_default();
    respond(&state, req_id, &warehouse).await
}

/// `GET /api/v1/warehouses/{name}/nearest-supplier`
pub(super) async fn nearest_supplier_for_warehouse(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(warehouse): Path<String>,
) -> Result<Json<ApiResponse<Option<NearestSupplier>>>, ApiError> {
    respond(&state, req_id, &warehouse).await
}

async fn respond(
    state: &AppState,
    req_id: RequestId,
    warehouse: &str,
) -> Result<Json<ApiResponse<Option<NearestSupplier>>>, ApiError> {
    let directory = PgSupplierDirectory::new(state.pool.clone());
    let log = PgErrorLog::new(state.pool.clone());

    let data = find_nearest_supplier(&directory, &log, warehouse)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ErrorLogQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ErrorLogItem {
    pub id: i64,
    pub category: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

pub(super) async fn list_error_logs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ErrorLogQuery>,
) -> Result<Json<ApiResponse<Vec<ErrorLogItem>>>, ApiError> {
    let rows = procure_db::list_recent_error_logs(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &procure_db::DbError::from(e)))?;

    let data = rows
        .into_iter()
        .map(|row| ErrorLogItem {
            id: row.id,
            category: row.category,
            message: row.message,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

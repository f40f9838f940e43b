use axum::{Json, extract::State};
use serde_json::Value;

use crate::cache::View;
use crate::core::ServerState;
use crate::db::repository::order;
use shared::error::{ApiResponse, AppError, AppResult};

/// GET /api/admin/orders - newest first (cached)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Value>>> {
    let pool = state.db.pool.clone();
    let body = state
        .cache
        .get_or_compute(View::Orders, || async move {
            let rows = order::list_summaries(&pool).await?;
            serde_json::to_value(rows).map_err(|e| AppError::internal(e.to_string()))
        })
        .await?;
    Ok(Json(ApiResponse::success((*body).clone())))
}
